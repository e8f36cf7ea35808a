use crate::models::{DailyDataset, DailyRecord, HourlyRecord};
use crate::utils::constants::{DEFAULT_MIN_HOURS, DEFAULT_NORM, HOURS_PER_DAY};
use crate::utils::rounding::{mean, round_report};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// A station-day dropped by the completeness gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncompleteDay {
    pub station_id: u32,
    pub date: NaiveDate,
    pub hours: u32,
}

/// Daily min/max/mean for days with enough hourly averages.
pub struct DailyAggregator {
    min_hours: u32,
    norm: Decimal,
}

impl DailyAggregator {
    pub fn new() -> Self {
        Self {
            min_hours: DEFAULT_MIN_HOURS,
            norm: Decimal::from(DEFAULT_NORM),
        }
    }

    pub fn with_min_hours(mut self, min_hours: u32) -> Self {
        self.min_hours = min_hours;
        self
    }

    pub fn with_norm(mut self, norm: Decimal) -> Self {
        self.norm = norm;
        self
    }

    pub fn daily_stats(&self, hourly: &[HourlyRecord]) -> (DailyDataset, Vec<IncompleteDay>) {
        let mut groups: BTreeMap<(u32, NaiveDate), Vec<Decimal>> = BTreeMap::new();
        for record in hourly {
            groups
                .entry((record.station_id, record.date))
                .or_default()
                .push(record.value);
        }

        let mut daily = Vec::with_capacity(groups.len());
        let mut incomplete = Vec::new();

        for ((station_id, date), values) in groups {
            let hours = values.len() as u32;
            if hours < self.min_hours {
                debug!(
                    "Station {} on {} has {} hourly averages, below {}",
                    station_id, date, hours, self.min_hours
                );
                incomplete.push(IncompleteDay {
                    station_id,
                    date,
                    hours,
                });
                continue;
            }

            if let Some(record) = self.summarize(station_id, date, &values) {
                daily.push(record);
            }
        }

        info!(
            "Calculated {} daily averages (completeness rule: at least {} of {} hourly averages; {} station-days excluded)",
            daily.len(),
            self.min_hours,
            HOURS_PER_DAY,
            incomplete.len()
        );
        (daily, incomplete)
    }

    fn summarize(&self, station_id: u32, date: NaiveDate, values: &[Decimal]) -> Option<DailyRecord> {
        let min = values.iter().min().copied()?;
        let max = values.iter().max().copied()?;
        let mean = round_report(mean(values)?);

        Some(DailyRecord {
            station_id,
            date,
            min: round_report(min),
            max: round_report(max),
            mean,
            perc_of_norm: self.perc_of_norm(mean),
        })
    }

    /// Percentage of the norm, from the already rounded daily mean.
    pub fn perc_of_norm(&self, mean: Decimal) -> Decimal {
        round_report(mean / self.norm * Decimal::ONE_HUNDRED)
    }
}

impl Default for DailyAggregator {
    fn default() -> Self {
        Self::new()
    }
}
