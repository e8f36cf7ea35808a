use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Mean of all readings of one station within one local clock hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRecord {
    pub station_id: u32,
    pub date: NaiveDate,
    /// Local clock hour, 0-23
    pub hour: u32,
    pub value: Decimal,
}

pub type HourlyDataset = Vec<HourlyRecord>;

impl HourlyRecord {
    pub fn new(station_id: u32, date: NaiveDate, hour: u32, value: Decimal) -> Self {
        Self {
            station_id,
            date,
            hour,
            value,
        }
    }
}
