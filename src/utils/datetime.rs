use crate::error::{ProcessingError, Result};
use chrono::{DateTime, Datelike, LocalResult, Months, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// Timestamp layouts that carry an explicit offset
const OFFSET_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%d %H:%M%z",
];

/// Naive layouts, interpreted in the configured naive timezone
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| ProcessingError::InvalidTimezone(format!("'{}': {}", name, e)))
}

/// Parse an ISO-8601 timestamp with or without offset and convert it to `target`.
///
/// Returns `None` when the text matches no accepted layout or names a local
/// time that does not exist in `naive_tz`.
pub fn parse_measure_time(raw: &str, naive_tz: Tz, target: Tz) -> Option<DateTime<Tz>> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&target));
    }

    // chrono's %z accepts neither a bare 'Z' nor an hour-only offset
    let normalized = match text.strip_suffix('Z').or_else(|| text.strip_suffix('z')) {
        Some(stripped) => Some(format!("{}+00:00", stripped)),
        None => pad_hour_offset(text),
    };

    for candidate in std::iter::once(text).chain(normalized.as_deref()) {
        for format in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(candidate, format) {
                return Some(dt.with_timezone(&target));
            }
        }
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    localize(naive, naive_tz).map(|dt| dt.with_timezone(&target))
}

/// Expand a trailing `+HH`/`-HH` offset to `+HH:00`.
fn pad_hour_offset(text: &str) -> Option<String> {
    let split = text.len().checked_sub(3)?;
    let (time, offset) = (text.get(..split)?, text.get(split..)?);
    let mut chars = offset.chars();
    let signed = matches!(chars.next(), Some('+' | '-'));
    let hours = chars.all(|c| c.is_ascii_digit());
    (signed && hours && time.contains(':')).then(|| format!("{}:00", text))
}

/// Attach a timezone to a local datetime. Ambiguous times (DST fall-back)
/// resolve to the earlier instant; non-existent times yield `None`.
pub fn localize(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => None,
    }
}

/// Parse a window bound given as a local date or datetime in `tz`.
pub fn parse_window_bound(raw: &str, tz: Tz) -> Result<DateTime<Tz>> {
    let text = raw.trim();
    let naive = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        })
        .ok_or_else(|| {
            ProcessingError::InvalidWindow(format!(
                "'{}' is not a date (YYYY-MM-DD) or datetime (YYYY-MM-DD HH:MM[:SS])",
                raw
            ))
        })?;

    localize(naive, tz).ok_or_else(|| {
        ProcessingError::InvalidWindow(format!("'{}' does not exist in timezone {}", raw, tz))
    })
}

/// The same local wall-clock time one calendar month later.
pub fn one_month_after(start: DateTime<Tz>) -> Result<DateTime<Tz>> {
    let tz = start.timezone();
    start
        .naive_local()
        .checked_add_months(Months::new(1))
        .and_then(|naive| localize(naive, tz))
        .ok_or_else(|| {
            ProcessingError::InvalidWindow(format!("cannot add one month to {}", start))
        })
}

/// Truncate a date to the first day of its month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Format a timestamp as written to the cleaned dataset.
pub fn format_measure_time(dt: &DateTime<Tz>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S%:z").to_string()
}
