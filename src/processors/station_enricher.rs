use crate::models::{MonthlyRecord, MonthlyReportRecord, StationInfo};
use std::collections::{BTreeSet, HashMap};
use tracing::{info, warn};

/// Left-joins monthly statistics with station metadata.
pub struct StationEnricher {
    stations: HashMap<u32, StationInfo>,
}

impl StationEnricher {
    pub fn new(stations: HashMap<u32, StationInfo>) -> Self {
        Self { stations }
    }

    /// Returns the joined rows and the station ids that had no metadata.
    pub fn add_station_info(&self, monthly: &[MonthlyRecord]) -> (Vec<MonthlyReportRecord>, Vec<u32>) {
        let mut unmatched = BTreeSet::new();

        let joined: Vec<MonthlyReportRecord> = monthly
            .iter()
            .map(|record| {
                let joined =
                    MonthlyReportRecord::from_parts(record, self.stations.get(&record.station_id));
                if !joined.has_station_info() {
                    unmatched.insert(record.station_id);
                }
                joined
            })
            .collect();

        if !unmatched.is_empty() {
            warn!(
                "No station metadata for station ids {:?}; their metadata columns are left empty",
                unmatched
            );
        }
        info!("Monthly stats merged with info for {} stations", self.stations.len());

        (joined, unmatched.into_iter().collect())
    }
}
