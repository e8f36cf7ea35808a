use crate::models::StationInfo;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Monthly statistics of one station, computed from its complete days.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRecord {
    pub station_id: u32,
    /// First day of the month
    pub date: NaiveDate,
    pub mean: Decimal,
    pub max: Decimal,
    pub days_num: u32,
    pub days_abv_norm: u32,
    pub days_abv_200: u32,
    pub days_abv_300: u32,
}

pub type MonthlyDataset = Vec<MonthlyRecord>;

/// Monthly statistics joined with station metadata, in export column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReportRecord {
    pub station_id: u32,
    pub date: NaiveDate,
    pub station_name: Option<String>,
    pub station_address: Option<String>,
    pub district_id: Option<u32>,
    pub district: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub days_num: u32,
    pub days_abv_norm: u32,
    pub days_abv_200: u32,
    pub days_abv_300: u32,
    pub max: Decimal,
    pub mean: Decimal,
}

impl MonthlyReportRecord {
    /// Left-join semantics: a missing station keeps empty metadata.
    pub fn from_parts(monthly: &MonthlyRecord, station: Option<&StationInfo>) -> Self {
        Self {
            station_id: monthly.station_id,
            date: monthly.date,
            station_name: station.map(|s| s.name.clone()),
            station_address: station.map(|s| s.address.clone()),
            district_id: station.map(|s| s.district_id),
            district: station.map(|s| s.district.clone()),
            lat: station.map(|s| s.lat),
            lon: station.map(|s| s.lon),
            days_num: monthly.days_num,
            days_abv_norm: monthly.days_abv_norm,
            days_abv_200: monthly.days_abv_200,
            days_abv_300: monthly.days_abv_300,
            max: monthly.max,
            mean: monthly.mean,
        }
    }

    pub fn has_station_info(&self) -> bool {
        self.station_name.is_some()
    }
}
