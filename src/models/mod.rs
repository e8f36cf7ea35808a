pub mod daily;
pub mod hourly;
pub mod monthly;
pub mod reading;
pub mod station;

pub use daily::{DailyDataset, DailyRecord};
pub use hourly::{HourlyDataset, HourlyRecord};
pub use monthly::{MonthlyDataset, MonthlyRecord, MonthlyReportRecord};
pub use reading::{CleanedDataset, RawDataset, RawReading, Reading};
pub use station::StationInfo;

/// A record written as one row of a delimited output file.
pub trait ExportRecord: serde::Serialize {
    /// Header row, in field order
    const COLUMNS: &'static [&'static str];
}

impl ExportRecord for Reading {
    const COLUMNS: &'static [&'static str] = &["station_id", "measure_time", "value"];
}

impl ExportRecord for HourlyRecord {
    const COLUMNS: &'static [&'static str] = &["station_id", "date", "hour", "value"];
}

impl ExportRecord for DailyRecord {
    const COLUMNS: &'static [&'static str] =
        &["station_id", "date", "min", "max", "mean", "perc_of_norm"];
}

impl ExportRecord for MonthlyReportRecord {
    const COLUMNS: &'static [&'static str] = &[
        "station_id",
        "date",
        "station_name",
        "station_address",
        "district_id",
        "district",
        "lat",
        "lon",
        "days_num",
        "days_abv_norm",
        "days_abv_200",
        "days_abv_300",
        "max",
        "mean",
    ];
}
