//! Pipeline configuration
//!
//! Settings are layered: built-in defaults, an optional TOML/JSON file,
//! `PM10_*` environment variables, then command-line overrides applied by
//! the caller.

use crate::error::{ProcessingError, Result};
use crate::utils::constants::*;
use crate::utils::datetime::{one_month_after, parse_timezone, parse_window_bound};
use chrono::DateTime;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct PipelineConfig {
    /// Canonical timezone for grouping and output
    pub timezone: String,

    /// Timezone assumed for timestamps without an offset
    pub naive_timezone: String,

    /// Inclusive lower bound, local to `timezone`
    pub window_start: String,

    /// Exclusive upper bound; one calendar month after the start when unset
    pub window_end: Option<String>,

    /// Hourly averages a day needs to be reported
    #[validate(range(min = 1, max = 24))]
    pub min_hours: u32,

    #[validate(custom(function = "validate_norm"))]
    pub norm: Decimal,

    #[validate(custom(function = "validate_table_name"))]
    pub source_table: String,

    #[validate(nested)]
    pub output: OutputFiles,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct OutputFiles {
    #[validate(length(min = 1))]
    pub cleaned: String,
    #[validate(length(min = 1))]
    pub hourly: String,
    #[validate(length(min = 1))]
    pub daily: String,
    #[validate(length(min = 1))]
    pub monthly: String,
    #[validate(length(min = 1))]
    pub quality_report: String,
}

/// Half-open interval `[start, end)` in the canonical timezone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Result<Self> {
        if start >= end {
            return Err(ProcessingError::InvalidWindow(format!(
                "start {} must be before end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, instant: &DateTime<Tz>) -> bool {
        self.start <= *instant && *instant < self.end
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            naive_timezone: DEFAULT_NAIVE_TIMEZONE.to_string(),
            window_start: DEFAULT_WINDOW_START.to_string(),
            window_end: None,
            min_hours: DEFAULT_MIN_HOURS,
            norm: Decimal::from(DEFAULT_NORM),
            source_table: DEFAULT_SOURCE_TABLE.to_string(),
            output: OutputFiles::default(),
        }
    }
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            cleaned: CLEANED_FILE.to_string(),
            hourly: HOURLY_FILE.to_string(),
            daily: DAILY_FILE.to_string(),
            monthly: MONTHLY_FILE.to_string(),
            quality_report: QUALITY_REPORT_FILE.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load defaults, an optional settings file and `PM10_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ProcessingError::Config(format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix("PM10")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: PipelineConfig = settings.try_deserialize()?;
        Ok(config)
    }

    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        self.canonical_tz()?;
        self.naive_tz()?;
        self.window()?;
        Ok(self)
    }

    pub fn canonical_tz(&self) -> Result<Tz> {
        parse_timezone(&self.timezone)
    }

    pub fn naive_tz(&self) -> Result<Tz> {
        parse_timezone(&self.naive_timezone)
    }

    /// Resolve the configured bounds to instants in the canonical timezone.
    pub fn window(&self) -> Result<TimeWindow> {
        let tz = self.canonical_tz()?;
        let start = parse_window_bound(&self.window_start, tz)?;
        let end = match &self.window_end {
            Some(end) => parse_window_bound(end, tz)?,
            None => one_month_after(start)?,
        };
        TimeWindow::new(start, end)
    }
}

fn validate_norm(norm: &Decimal) -> std::result::Result<(), ValidationError> {
    if norm.is_sign_positive() && !norm.is_zero() {
        Ok(())
    } else {
        Err(ValidationError::new("norm_must_be_positive"))
    }
}

fn validate_table_name(name: &str) -> std::result::Result<(), ValidationError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_table_name"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};

    // Environment variables are process-wide; tests that load settings take this lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct EnvGuard {
        previous: HashMap<&'static str, Option<String>>,
        _lock: MutexGuard<'static, ()>,
    }

    impl EnvGuard {
        fn set(vars: &[(&'static str, &str)]) -> Self {
            let lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            let mut previous = HashMap::new();
            for &(key, value) in vars {
                previous.insert(key, std::env::var(key).ok());
                std::env::set_var(key, value);
            }
            Self {
                previous,
                _lock: lock,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (&key, value) in &self.previous {
                match value {
                    Some(val) => std::env::set_var(key, val),
                    None => std::env::remove_var(key),
                }
            }
        }
    }

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default().validated().unwrap();
        assert_eq!(config.min_hours, 18);
        assert_eq!(config.norm, Decimal::from(50));
        assert_eq!(config.timezone, "Europe/Vienna");

        let window = config.window().unwrap();
        assert_eq!(window.start.to_rfc3339(), "2019-04-01T00:00:00+02:00");
        assert_eq!(window.end.to_rfc3339(), "2019-05-01T00:00:00+02:00");
    }

    #[test]
    fn test_window_is_half_open() {
        let window = PipelineConfig::default().window().unwrap();
        assert!(window.contains(&window.start));
        assert!(!window.contains(&window.end));
    }

    #[test]
    fn test_inverted_window_rejected() {
        let config = PipelineConfig {
            window_start: "2019-05-01".to_string(),
            window_end: Some("2019-04-01".to_string()),
            ..PipelineConfig::default()
        };
        assert!(matches!(
            config.validated(),
            Err(ProcessingError::InvalidWindow(_))
        ));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let config = PipelineConfig {
            min_hours: 25,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            config.validated(),
            Err(ProcessingError::Validation(_))
        ));

        let config = PipelineConfig {
            norm: Decimal::ZERO,
            ..PipelineConfig::default()
        };
        assert!(config.validated().is_err());

        let config = PipelineConfig {
            source_table: "pm10; DROP TABLE pm10".to_string(),
            ..PipelineConfig::default()
        };
        assert!(config.validated().is_err());

        let config = PipelineConfig {
            timezone: "Nowhere/Special".to_string(),
            ..PipelineConfig::default()
        };
        assert!(matches!(
            config.validated(),
            Err(ProcessingError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let _env = EnvGuard::set(&[]);
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "min_hours = 20")?;
        writeln!(file, "window_start = \"2019-03-01\"")?;
        writeln!(file, "[output]")?;
        writeln!(file, "daily = \"days.csv\"")?;

        let config = PipelineConfig::load(Some(file.path()))?.validated()?;
        assert_eq!(config.min_hours, 20);
        assert_eq!(config.output.daily, "days.csv");
        assert_eq!(config.output.hourly, HOURLY_FILE);
        assert_eq!(config.norm, Decimal::from(50));

        let window = config.window()?;
        assert_eq!(window.end.to_rfc3339(), "2019-04-01T00:00:00+02:00");
        Ok(())
    }

    #[test]
    fn test_environment_overrides_file() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "min_hours = 20")?;
        writeln!(file, "norm = 40")?;
        writeln!(file, "[output]")?;
        writeln!(file, "daily = \"days.csv\"")?;

        let _env = EnvGuard::set(&[
            ("PM10_MIN_HOURS", "22"),
            ("PM10_NORM", "45"),
            ("PM10_OUTPUT__DAILY", "env_days.csv"),
        ]);

        let config = PipelineConfig::load(Some(file.path()))?.validated()?;
        assert_eq!(config.min_hours, 22);
        assert_eq!(config.norm, Decimal::from(45));
        assert_eq!(config.output.daily, "env_days.csv");
        assert_eq!(config.output.hourly, HOURLY_FILE);
        assert_eq!(config.timezone, "Europe/Vienna");
        Ok(())
    }

    #[test]
    fn test_missing_config_file() {
        let result = PipelineConfig::load(Some(Path::new("/nonexistent/pm10.toml")));
        assert!(matches!(result, Err(ProcessingError::Config(_))));
    }
}
