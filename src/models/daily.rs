use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Statistics of one station-day that passed the completeness gate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    pub station_id: u32,
    pub date: NaiveDate,
    pub min: Decimal,
    pub max: Decimal,
    pub mean: Decimal,
    /// Daily mean as a percentage of the norm
    pub perc_of_norm: Decimal,
}

pub type DailyDataset = Vec<DailyRecord>;
