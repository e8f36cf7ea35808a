use crate::config::TimeWindow;
use crate::error::{ProcessingError, Result};
use crate::models::{CleanedDataset, RawDataset, Reading};
use crate::utils::datetime::parse_measure_time;
use chrono::DateTime;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleaningStats {
    pub rows_loaded: usize,
    pub duplicates_removed: usize,
    pub outside_window: usize,
    pub rows_retained: usize,
}

/// Normalizes, deduplicates, sorts and windows raw readings.
pub struct DataCleaner {
    timezone: Tz,
    naive_timezone: Tz,
    window: TimeWindow,
}

impl DataCleaner {
    pub fn new(timezone: Tz, naive_timezone: Tz, window: TimeWindow) -> Self {
        Self {
            timezone,
            naive_timezone,
            window,
        }
    }

    pub fn clean(&self, raw: RawDataset) -> Result<(CleanedDataset, CleaningStats)> {
        let rows_loaded = raw.len();

        let readings = self.convert_datetime(raw)?;
        let (readings, duplicates_removed) = remove_duplicates(readings);
        let readings = sort_readings(readings);
        let (readings, outside_window) = self.limit_time_range(readings);

        let stats = CleaningStats {
            rows_loaded,
            duplicates_removed,
            outside_window,
            rows_retained: readings.len(),
        };
        Ok((readings, stats))
    }

    /// Parse every timestamp and convert it to the canonical timezone.
    /// A single unparseable timestamp aborts the run.
    pub fn convert_datetime(&self, raw: RawDataset) -> Result<CleanedDataset> {
        let readings = raw
            .into_iter()
            .map(|r| {
                parse_measure_time(&r.measure_time, self.naive_timezone, self.timezone)
                    .map(|measure_time| Reading::new(r.station_id, measure_time, r.value))
                    .ok_or(ProcessingError::TimestampParse {
                        row: r.row,
                        value: r.measure_time,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        info!("Converted {} timestamps to {}", readings.len(), self.timezone);
        Ok(readings)
    }

    /// Keep readings in `[start, end)`.
    pub fn limit_time_range(&self, readings: CleanedDataset) -> (CleanedDataset, usize) {
        let before = readings.len();
        let retained: CleanedDataset = readings
            .into_iter()
            .filter(|r| self.window.contains(&r.measure_time))
            .collect();
        let dropped = before - retained.len();

        info!(
            "Limited data to the time period between {} and {} ({} rows outside)",
            self.window.start, self.window.end, dropped
        );
        (retained, dropped)
    }
}

/// Drop exact duplicates (same station, instant and value), keeping the first.
pub fn remove_duplicates(readings: CleanedDataset) -> (CleanedDataset, usize) {
    let before = readings.len();
    let mut seen: HashSet<(u32, DateTime<Tz>, Decimal)> = HashSet::with_capacity(before);

    let unique: CleanedDataset = readings
        .into_iter()
        .filter(|r| seen.insert((r.station_id, r.measure_time, r.value.normalize())))
        .collect();
    let removed = before - unique.len();

    info!("Removed {} duplicated rows", removed);
    (unique, removed)
}

/// Order by station, then time; value breaks ties between distinct readings.
pub fn sort_readings(mut readings: CleanedDataset) -> CleanedDataset {
    readings.sort_by(|a, b| {
        a.station_id
            .cmp(&b.station_id)
            .then_with(|| a.measure_time.cmp(&b.measure_time))
            .then_with(|| a.value.cmp(&b.value))
    });
    debug!("Sorted {} readings by station_id, measure_time", readings.len());
    readings
}
