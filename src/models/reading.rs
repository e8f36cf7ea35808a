use crate::utils::datetime::format_measure_time;
use chrono::DateTime;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// A reading as delivered by a source, before timestamp normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReading {
    /// 1-based data row in the source, used in error messages
    pub row: u64,
    pub station_id: u32,
    pub measure_time: String,
    pub value: Decimal,
}

/// A reading with its timestamp normalized to the canonical timezone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub station_id: u32,
    #[serde(serialize_with = "serialize_measure_time")]
    pub measure_time: DateTime<Tz>,
    pub value: Decimal,
}

pub type RawDataset = Vec<RawReading>;
pub type CleanedDataset = Vec<Reading>;

impl RawReading {
    pub fn new(row: u64, station_id: u32, measure_time: impl Into<String>, value: Decimal) -> Self {
        Self {
            row,
            station_id,
            measure_time: measure_time.into(),
            value,
        }
    }
}

impl Reading {
    pub fn new(station_id: u32, measure_time: DateTime<Tz>, value: Decimal) -> Self {
        Self {
            station_id,
            measure_time,
            value,
        }
    }
}

fn serialize_measure_time<S>(dt: &DateTime<Tz>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_measure_time(dt))
}
