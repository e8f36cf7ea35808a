use crate::models::{DailyRecord, MonthlyDataset, MonthlyRecord};
use crate::utils::constants::{ALERT_THRESHOLD_200, ALERT_THRESHOLD_300, DEFAULT_NORM};
use crate::utils::datetime::month_start;
use crate::utils::rounding::{mean, round_report};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::info;

/// Monthly mean/max and exceedance-day counts per station.
pub struct MonthlyAggregator {
    norm: Decimal,
}

impl MonthlyAggregator {
    pub fn new() -> Self {
        Self {
            norm: Decimal::from(DEFAULT_NORM),
        }
    }

    pub fn with_norm(mut self, norm: Decimal) -> Self {
        self.norm = norm;
        self
    }

    /// Means and maxima are taken over the rounded daily values.
    pub fn monthly_stats(&self, daily: &[DailyRecord]) -> MonthlyDataset {
        let mut groups: BTreeMap<(u32, NaiveDate), Vec<&DailyRecord>> = BTreeMap::new();
        for record in daily {
            groups
                .entry((record.station_id, month_start(record.date)))
                .or_default()
                .push(record);
        }

        let monthly: MonthlyDataset = groups
            .into_iter()
            .filter_map(|((station_id, date), days)| self.summarize(station_id, date, &days))
            .collect();

        info!("Calculated {} monthly statistics", monthly.len());
        monthly
    }

    fn summarize(
        &self,
        station_id: u32,
        date: NaiveDate,
        days: &[&DailyRecord],
    ) -> Option<MonthlyRecord> {
        let means: Vec<Decimal> = days.iter().map(|d| d.mean).collect();
        let max = days.iter().map(|d| d.max).max()?;
        let above = |threshold: Decimal| means.iter().filter(|m| **m > threshold).count() as u32;

        Some(MonthlyRecord {
            station_id,
            date,
            mean: round_report(mean(&means)?),
            max: round_report(max),
            days_num: days.len() as u32,
            days_abv_norm: above(self.norm),
            days_abv_200: above(Decimal::from(ALERT_THRESHOLD_200)),
            days_abv_300: above(Decimal::from(ALERT_THRESHOLD_300)),
        })
    }
}

impl Default for MonthlyAggregator {
    fn default() -> Self {
        Self::new()
    }
}
