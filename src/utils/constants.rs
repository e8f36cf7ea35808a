/// Default output file names
pub const CLEANED_FILE: &str = "data.csv";
pub const HOURLY_FILE: &str = "hourly_stats.csv";
pub const DAILY_FILE: &str = "daily_stats.csv";
pub const MONTHLY_FILE: &str = "monthly_stats.csv";
pub const QUALITY_REPORT_FILE: &str = "quality_report.json";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Source defaults
pub const DEFAULT_SOURCE_TABLE: &str = "pm10";
pub const CSV_EXTENSION: &str = "csv";
pub const SQLITE_EXTENSIONS: [&str; 3] = ["db", "sqlite", "sqlite3"];

/// Timezones
pub const DEFAULT_TIMEZONE: &str = "Europe/Vienna";
pub const DEFAULT_NAIVE_TIMEZONE: &str = "UTC";

/// Default time window (local dates in the canonical timezone)
pub const DEFAULT_WINDOW_START: &str = "2019-04-01";

/// Completeness gate: 18 of 24 hourly averages (75%)
pub const HOURS_PER_DAY: u32 = 24;
pub const DEFAULT_MIN_HOURS: u32 = 18;

/// Daily PM10 norm in µg/m³
pub const DEFAULT_NORM: i64 = 50;

/// Fixed exceedance thresholds in µg/m³
pub const ALERT_THRESHOLD_200: i64 = 200;
pub const ALERT_THRESHOLD_300: i64 = 300;

/// Precision of every reported value
pub const REPORT_DECIMAL_PLACES: u32 = 0;
