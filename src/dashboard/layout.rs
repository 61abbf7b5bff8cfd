//! Tab layouts of the two dashboard variants.
//!
//! Both variants draw from the same chart catalogue; they only differ in
//! how charts are grouped into tabs and rows, in page chrome and in their
//! default bind address.

use super::charts::ChartKind;
use crate::utils::config::{BOOTSTRAP_BRAND, CLASSIC_BRAND};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// Which dashboard layout to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardVariant {
    /// Plain page, one tab per chart
    Classic,
    /// Themed navbar page with grouped tabs
    #[default]
    Bootstrap,
}

impl DashboardVariant {
    /// Address the served dashboard binds to unless overridden
    pub fn default_bind(self) -> (IpAddr, u16) {
        match self {
            Self::Classic => (IpAddr::V4(Ipv4Addr::LOCALHOST), 8050),
            Self::Bootstrap => (IpAddr::V4(Ipv4Addr::UNSPECIFIED), 10000),
        }
    }

    /// Page header text unless overridden
    pub fn default_brand(self) -> &'static str {
        match self {
            Self::Classic => CLASSIC_BRAND,
            Self::Bootstrap => BOOTSTRAP_BRAND,
        }
    }

    /// Tabs in display order
    pub fn tabs(self) -> Vec<Tab> {
        match self {
            Self::Classic => classic_tabs(),
            Self::Bootstrap => bootstrap_tabs(),
        }
    }
}

/// Content of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Chart(ChartKind),
    /// Embedded external map
    Map,
}

/// A panel and its width in a 12-column grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub panel: Panel,
    pub width: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub label: &'static str,
    pub rows: Vec<Vec<Cell>>,
}

impl Tab {
    fn single(label: &'static str, panel: Panel) -> Self {
        Self {
            label,
            rows: vec![vec![full(panel)]],
        }
    }

    /// All panels of the tab, row by row
    pub fn panels(&self) -> impl Iterator<Item = Panel> + '_ {
        self.rows.iter().flatten().map(|cell| cell.panel)
    }
}

fn half(kind: ChartKind) -> Cell {
    Cell {
        panel: Panel::Chart(kind),
        width: 6,
    }
}

fn full(panel: Panel) -> Cell {
    Cell { panel, width: 12 }
}

fn classic_tabs() -> Vec<Tab> {
    use ChartKind::*;

    vec![
        Tab::single("Annual Event Frequency", Panel::Chart(AnnualEvents)),
        Tab::single("Monthly Distribution", Panel::Chart(MonthlyDistribution)),
        Tab::single("Property Damage (Log)", Panel::Chart(DamageOverTime)),
        Tab::single("Top Affected Locations", Panel::Chart(TopLocations)),
        Tab::single("Event Duration Distribution", Panel::Chart(DurationDistribution)),
        Tab::single("Damage vs Duration", Panel::Chart(DamageVsDuration)),
        Tab::single("Cumulative Events Over Time", Panel::Chart(CumulativeEvents)),
        Tab::single("Deaths & Injuries", Panel::Chart(HumanImpact)),
        Tab::single("Hourly Distribution", Panel::Chart(HourlyDistribution)),
        Tab::single("Damage by Location", Panel::Chart(DamageByLocation)),
        Tab::single("Yearly Damage (Log)", Panel::Chart(YearlyDamage)),
        Tab::single("Map View (External)", Panel::Map),
    ]
}

fn bootstrap_tabs() -> Vec<Tab> {
    use ChartKind::*;

    vec![
        Tab {
            label: "Event Frequency & Seasonality",
            rows: vec![vec![half(AnnualEvents), half(MonthlyDistribution)]],
        },
        Tab {
            label: "Damage & Duration",
            rows: vec![
                vec![half(DamageOverTime), half(DurationDistribution)],
                vec![full(Panel::Chart(DamageVsDuration))],
            ],
        },
        Tab {
            label: "Location Analysis",
            rows: vec![vec![half(TopLocations), half(DamageByLocation)]],
        },
        Tab {
            label: "Temporal Trends",
            rows: vec![vec![half(CumulativeEvents), half(HourlyDistribution)]],
        },
        Tab::single("Human Impact", Panel::Chart(HumanImpact)),
        Tab::single("Yearly Damage (Log)", Panel::Chart(YearlyDamage)),
        Tab::single("Map View", Panel::Map),
    ]
}
