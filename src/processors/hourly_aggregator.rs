use crate::models::{HourlyDataset, HourlyRecord, Reading};
use crate::utils::rounding::{mean, round_report};
use chrono::{NaiveDate, Timelike};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::info;

/// Average readings per station and local clock hour.
///
/// Groups use the local date and hour of the (already normalized)
/// timestamps. Hours without readings produce no record.
pub fn hourly_stats(readings: &[Reading]) -> HourlyDataset {
    let mut groups: BTreeMap<(u32, NaiveDate, u32), Vec<Decimal>> = BTreeMap::new();

    for reading in readings {
        let local = reading.measure_time;
        groups
            .entry((reading.station_id, local.date_naive(), local.hour()))
            .or_default()
            .push(reading.value);
    }

    let hourly: HourlyDataset = groups
        .into_iter()
        .filter_map(|((station_id, date, hour), values)| {
            mean(&values).map(|avg| HourlyRecord::new(station_id, date, hour, round_report(avg)))
        })
        .collect();

    info!("Calculated {} hourly averages", hourly.len());
    hourly
}
