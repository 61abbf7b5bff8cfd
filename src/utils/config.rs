//! Configuration and constants for the dashboard.

/// Current summary schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Input file used when none is given on the command line
pub const DEFAULT_INPUT_PATH: &str = "storm_data_search_results3.csv";

/// Output path for the rendered page
pub const DEFAULT_OUTPUT_PATH: &str = "dashboard.html";

/// Browser tab title
pub const DEFAULT_PAGE_TITLE: &str = "Flash Flood Dashboard";

/// Heading of the classic layout
pub const CLASSIC_BRAND: &str = "Jefferson County Flash Flood Dashboard";

/// Navbar brand of the bootstrap layout
pub const BOOTSTRAP_BRAND: &str = "Jefferson County Flash Flood Dashboard- Shreepati Jha";

/// Externally hosted folium map shown in the map tab
pub const DEFAULT_MAP_URL: &str = "https://your-map-link.com";

/// Whisker reach of the duration box plot, in interquartile ranges
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Largest bubble diameter (px) of the damage vs duration chart
pub const BUBBLE_SIZE_MAX: f64 = 20.0;

/// Number of locations kept by the top-N location charts
pub const TOP_LOCATIONS: usize = 10;

/// Buckets in the begin-hour histogram (one per hour of day)
pub const HOURS_PER_DAY: usize = 24;

pub const SECONDS_PER_HOUR: f64 = 3600.0;

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// Column names in NOAA storm event search exports
pub const COL_BEGIN_DATE: &str = "BEGIN_DATE";
pub const COL_END_DATE: &str = "END_DATE";
pub const COL_BEGIN_TIME: &str = "BEGIN_TIME";
pub const COL_BEGIN_LAT: &str = "BEGIN_LAT";
pub const COL_BEGIN_LON: &str = "BEGIN_LON";
pub const COL_BEGIN_LOCATION: &str = "BEGIN_LOCATION";
pub const COL_DAMAGE_PROPERTY: &str = "DAMAGE_PROPERTY_NUM";
pub const COL_DEATHS_DIRECT: &str = "DEATHS_DIRECT";
pub const COL_INJURIES_DIRECT: &str = "INJURIES_DIRECT";

/// Columns that must be present in the header row
pub const REQUIRED_COLUMNS: &[&str] = &[
    COL_BEGIN_DATE,
    COL_END_DATE,
    COL_BEGIN_TIME,
    COL_BEGIN_LAT,
    COL_BEGIN_LON,
    COL_BEGIN_LOCATION,
    COL_DAMAGE_PROPERTY,
    COL_DEATHS_DIRECT,
    COL_INJURIES_DIRECT,
];

// Timestamp layouts accepted for BEGIN_DATE / END_DATE, tried in order
pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Plotly bundle loaded by the rendered page
pub const PLOTLY_CDN_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Bootswatch FLATLY theme used by the bootstrap layout
pub const FLATLY_CSS_URL: &str =
    "https://cdn.jsdelivr.net/npm/bootswatch@5.3.3/dist/flatly/bootstrap.min.css";
