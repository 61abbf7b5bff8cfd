//! Plain-text rendering of the summary for the terminal.

use crate::aggregator::summary::DashboardSummary;

/// Widest bar drawn in the text charts
const BAR_WIDTH: usize = 40;

/// Create a text summary with event counts per year and top locations
pub fn generate_text_summary(summary: &DashboardSummary, max_lines: usize) -> String {
    let mut lines = Vec::new();

    lines.push("  EVENTS PER YEAR".to_string());
    lines.push(format!("  ┏{}┳{}┓", "━".repeat(8), "━".repeat(BAR_WIDTH + 10)));

    let max_count = summary
        .events_per_year
        .iter()
        .map(|y| y.count)
        .max()
        .unwrap_or(0)
        .max(1);

    for year in summary.events_per_year.iter().take(max_lines) {
        let bar = "█".repeat(year.count * BAR_WIDTH / max_count);
        lines.push(format!(
            "  ┃ {:>6} ┃ {:<width$} {:>7} ┃",
            year.year,
            bar,
            year.count,
            width = BAR_WIDTH
        ));
    }
    lines.push(format!("  ┗{}┻{}┛", "━".repeat(8), "━".repeat(BAR_WIDTH + 10)));

    if summary.events_per_year.len() > max_lines {
        lines.push(format!(
            "   (Showing first {} of {} years)",
            max_lines,
            summary.events_per_year.len()
        ));
    }

    lines.push(String::new());
    lines.push("  TOP LOCATIONS".to_string());
    if summary.top_locations.is_empty() {
        lines.push("  (no locations recorded)".to_string());
    }
    for (rank, location) in summary.top_locations.iter().take(max_lines).enumerate() {
        let display = if location.location.chars().count() > 30 {
            let head: String = location.location.chars().take(27).collect();
            format!("{}...", head)
        } else {
            location.location.clone()
        };
        lines.push(format!(
            "  {:>2}. {:<30} {:>6} events",
            rank + 1,
            display,
            location.count
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "  Total property damage: ${:.0} across {} damaging events",
        summary.total_damage(),
        summary.counts.damaging
    ));

    lines.join("\n")
}
