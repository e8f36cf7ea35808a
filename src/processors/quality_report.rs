use crate::processors::cleaner::CleaningStats;
use crate::processors::daily_aggregator::IncompleteDay;
use serde::Serialize;

/// Counts of everything the pipeline dropped or could not match.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QualityReport {
    pub rows_loaded: usize,
    pub duplicates_removed: usize,
    pub rows_outside_window: usize,
    pub rows_retained: usize,
    pub hourly_records: usize,
    pub min_hours: u32,
    pub complete_days: usize,
    pub incomplete_days: Vec<IncompleteDay>,
    pub monthly_records: usize,
    pub stations_without_metadata: Vec<u32>,
}

impl QualityReport {
    pub fn new(cleaning: &CleaningStats, min_hours: u32) -> Self {
        Self {
            rows_loaded: cleaning.rows_loaded,
            duplicates_removed: cleaning.duplicates_removed,
            rows_outside_window: cleaning.outside_window,
            rows_retained: cleaning.rows_retained,
            min_hours,
            ..Self::default()
        }
    }

    /// Generate a summary report
    pub fn generate_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Data Quality Report ===\n");
        summary.push_str(&format!("Rows Loaded: {}\n", self.rows_loaded));
        summary.push_str(&format!("Duplicates Removed: {}\n", self.duplicates_removed));
        summary.push_str(&format!(
            "Rows Outside Window: {}\n",
            self.rows_outside_window
        ));
        summary.push_str(&format!(
            "Rows Retained: {} ({:.1}%)\n",
            self.rows_retained,
            percentage(self.rows_retained, self.rows_loaded)
        ));
        summary.push_str(&format!("Hourly Averages: {}\n", self.hourly_records));

        let total_days = self.complete_days + self.incomplete_days.len();
        summary.push_str(&format!(
            "Complete Days: {} of {} (min {} hourly averages)\n",
            self.complete_days, total_days, self.min_hours
        ));
        summary.push_str(&format!("Monthly Records: {}\n", self.monthly_records));

        if !self.incomplete_days.is_empty() {
            summary.push_str("\nExcluded Days (first 10):\n");
            for (i, day) in self.incomplete_days.iter().take(10).enumerate() {
                summary.push_str(&format!(
                    "  {}. Station {} on {}: {} hourly averages\n",
                    i + 1,
                    day.station_id,
                    day.date,
                    day.hours
                ));
            }
        }

        if !self.stations_without_metadata.is_empty() {
            summary.push_str(&format!(
                "\nStations Without Metadata: {:?}\n",
                self.stations_without_metadata
            ));
        }

        summary
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * part as f64 / total as f64
    }
}
