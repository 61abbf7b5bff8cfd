//! HTML page generation for the dashboard.
//!
//! Produces one self-contained page: tab chrome, one container per chart
//! and a script that hands each figure to plotly.js.

use super::charts::{build_figure, ChartKind};
use super::layout::{Cell, DashboardVariant, Panel, Tab};
use crate::aggregator::summary::DashboardSummary;
use crate::utils::config::{DEFAULT_MAP_URL, DEFAULT_PAGE_TITLE, FLATLY_CSS_URL, PLOTLY_CDN_URL};
use log::{debug, info};

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Browser tab title
    pub page_title: String,
    /// Header text; the variant's default when absent
    pub brand: Option<String>,
    pub map_url: String,
    pub variant: DashboardVariant,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_title: DEFAULT_PAGE_TITLE.to_string(),
            brand: None,
            map_url: DEFAULT_MAP_URL.to_string(),
            variant: DashboardVariant::default(),
        }
    }
}

impl DashboardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_title(mut self, page_title: impl Into<String>) -> Self {
        self.page_title = page_title.into();
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_map_url(mut self, map_url: impl Into<String>) -> Self {
        self.map_url = map_url.into();
        self
    }

    pub fn with_variant(mut self, variant: DashboardVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Header text shown above the tabs
    pub fn brand(&self) -> &str {
        self.brand
            .as_deref()
            .unwrap_or_else(|| self.variant.default_brand())
    }
}

/// Render the full dashboard page
///
/// **Public** - main entry point for presentation
pub fn render_dashboard(summary: &DashboardSummary, config: &DashboardConfig) -> String {
    let tabs = config.variant.tabs();
    info!(
        "Rendering {:?} dashboard with {} tabs",
        config.variant,
        tabs.len()
    );

    let mut html = String::new();
    let mut scripts = String::new();
    let brand = escape_html(config.brand());

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>{}</title>\n",
        escape_html(&config.page_title)
    ));
    html.push_str(&format!("<script src=\"{}\"></script>\n", PLOTLY_CDN_URL));
    if config.variant == DashboardVariant::Bootstrap {
        html.push_str(&format!("<link rel=\"stylesheet\" href=\"{}\">\n", FLATLY_CSS_URL));
    }
    html.push_str(PAGE_STYLE);
    html.push_str("</head>\n<body>\n");

    // Header
    match config.variant {
        DashboardVariant::Classic => {
            html.push_str(&format!("<h1 style=\"text-align:center\">{}</h1>\n", brand));
        }
        DashboardVariant::Bootstrap => {
            html.push_str(&format!(
                "<nav class=\"navbar navbar-dark bg-primary mb-4\"><div class=\"container-fluid\"><span class=\"navbar-brand\">{}</span></div></nav>\n",
                brand
            ));
        }
    }

    html.push_str("<div class=\"container-fluid\">\n");
    render_tab_bar(&tabs, &mut html);

    for (index, tab) in tabs.iter().enumerate() {
        render_tab(tab, index, summary, config, &mut html, &mut scripts);
    }
    html.push_str("</div>\n");

    html.push_str("<script>\n");
    html.push_str(&scripts);
    html.push_str(TAB_SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");

    info!("Dashboard rendered ({} bytes)", html.len());
    html
}

fn render_tab_bar(tabs: &[Tab], out: &mut String) {
    out.push_str("<ul class=\"nav nav-tabs dash-tabs\">\n");
    for (index, tab) in tabs.iter().enumerate() {
        let active = if index == 0 { " active" } else { "" };
        out.push_str(&format!(
            "<li class=\"nav-item\"><button class=\"nav-link{}\" data-tab=\"tab-{}\">{}</button></li>\n",
            active,
            index,
            escape_html(tab.label)
        ));
    }
    out.push_str("</ul>\n");
}

fn render_tab(
    tab: &Tab,
    index: usize,
    summary: &DashboardSummary,
    config: &DashboardConfig,
    out: &mut String,
    scripts: &mut String,
) {
    let hidden = if index == 0 { "" } else { " hidden" };
    out.push_str(&format!(
        "<section class=\"dash-tab\" id=\"tab-{}\"{}>\n",
        index, hidden
    ));

    for row in &tab.rows {
        out.push_str("<div class=\"row mb-4\">\n");
        for cell in row {
            render_cell(cell, summary, config, out, scripts);
        }
        out.push_str("</div>\n");
    }

    out.push_str("</section>\n");
}

fn render_cell(
    cell: &Cell,
    summary: &DashboardSummary,
    config: &DashboardConfig,
    out: &mut String,
    scripts: &mut String,
) {
    out.push_str(&format!("<div class=\"col-md-{}\">", cell.width));

    match cell.panel {
        Panel::Chart(kind) => {
            out.push_str(&format!(
                "<div class=\"card card-body\"><div class=\"chart\" id=\"chart-{}\"></div></div>",
                kind.slug()
            ));
            scripts.push_str(&figure_script(kind, summary));
        }
        Panel::Map => {
            let url = escape_html(&config.map_url);
            out.push_str("<p>Interactive Map embedded from hosted folium HTML:</p>");
            out.push_str(&format!(
                "<iframe src=\"{}\" style=\"height:600px;width:100%;border:0\"></iframe>",
                url
            ));
        }
    }

    out.push_str("</div>\n");
}

/// Script line drawing one chart
///
/// **Private** - figures are embedded as JSON literals
fn figure_script(kind: ChartKind, summary: &DashboardSummary) -> String {
    let figure = build_figure(kind, summary);
    debug!(
        "Chart {}: {} traces{}",
        kind.slug(),
        figure.data.len(),
        if figure.is_placeholder() { " (placeholder)" } else { "" }
    );

    let json = serde_json::to_string(&figure)
        .unwrap_or_else(|_| r#"{"data":[],"layout":{}}"#.to_string());

    format!(
        "drawChart(\"chart-{}\", {});\n",
        kind.slug(),
        escape_script(&json)
    )
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Keep embedded JSON from closing the surrounding script element
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

const PAGE_STYLE: &str = r#"<style>
.dash-tabs { list-style: none; display: flex; flex-wrap: wrap; padding: 0; margin-bottom: 1rem; }
.dash-tabs .nav-link { cursor: pointer; }
.chart { min-height: 450px; }
</style>
"#;

const TAB_SCRIPT: &str = r#"function drawChart(id, figure) {
  Plotly.newPlot(id, figure.data, figure.layout, { responsive: true });
}
document.querySelectorAll(".dash-tabs button").forEach(function (button) {
  button.addEventListener("click", function () {
    document.querySelectorAll(".dash-tabs button").forEach(function (b) { b.classList.remove("active"); });
    document.querySelectorAll(".dash-tab").forEach(function (s) { s.hidden = true; });
    button.classList.add("active");
    var section = document.getElementById(button.dataset.tab);
    section.hidden = false;
    section.querySelectorAll(".chart").forEach(function (c) { Plotly.Plots.resize(c); });
  });
});
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::summary::build_summary;
    use crate::parser::derive::derive_batch;
    use crate::parser::schema::StormRecord;
    use chrono::NaiveDate;

    fn summary() -> DashboardSummary {
        let ts = NaiveDate::from_ymd_opt(2015, 9, 9)
            .unwrap()
            .and_hms_opt(4, 0, 0)
            .unwrap();
        let record = StormRecord {
            begin_timestamp: ts,
            end_timestamp: ts,
            begin_latitude: None,
            begin_longitude: None,
            begin_location: Some("</script><b>PRP".to_string()),
            begin_time_raw: Some("400".to_string()),
            damage_property_amount: None,
            deaths_direct: None,
            injuries_direct: None,
        };
        build_summary(&derive_batch(vec![record]), "test.csv")
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_render_classic() {
        let config = DashboardConfig::new()
            .with_variant(DashboardVariant::Classic)
            .with_brand("Floods & More");
        let html = render_dashboard(&summary(), &config);

        assert!(html.contains("<h1 style=\"text-align:center\">Floods &amp; More</h1>"));
        assert!(!html.contains(FLATLY_CSS_URL));
        assert!(html.contains("Map View (External)"));
        assert_eq!(html.matches("class=\"dash-tab\"").count(), 12);
        for kind in ChartKind::ALL {
            assert!(html.contains(&format!("id=\"chart-{}\"", kind.slug())));
        }
    }

    #[test]
    fn test_default_titles_follow_variant() {
        let classic = DashboardConfig::new().with_variant(DashboardVariant::Classic);
        let html = render_dashboard(&summary(), &classic);
        assert!(html.contains("<title>Flash Flood Dashboard</title>"));
        assert!(html.contains(
            "<h1 style=\"text-align:center\">Jefferson County Flash Flood Dashboard</h1>"
        ));

        let bootstrap = DashboardConfig::new().with_page_title("Floods");
        let html = render_dashboard(&summary(), &bootstrap);
        assert!(html.contains("<title>Floods</title>"));
        assert!(html.contains(
            "<span class=\"navbar-brand\">Jefferson County Flash Flood Dashboard- Shreepati Jha</span>"
        ));
    }

    #[test]
    fn test_render_bootstrap() {
        let config = DashboardConfig::new().with_map_url("https://maps.example.org/floods");
        let html = render_dashboard(&summary(), &config);

        assert!(html.contains(FLATLY_CSS_URL));
        assert!(html.contains("navbar-brand"));
        assert!(html.contains("src=\"https://maps.example.org/floods\""));
        assert_eq!(html.matches("class=\"dash-tab\"").count(), 7);
        assert!(html.contains("No Property Damage Data Available"));
    }

    #[test]
    fn test_embedded_json_cannot_close_script() {
        let html = render_dashboard(&summary(), &DashboardConfig::default());
        assert!(!html.contains("</script><b>PRP"));
        assert!(html.contains("<\\/script><b>PRP"));
    }
}
