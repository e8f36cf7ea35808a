use serde::{Deserialize, Serialize};
use validator::Validate;

/// Reference metadata for a monitoring station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct StationInfo {
    pub id: u32,

    pub name: String,

    pub address: String,

    pub district_id: u32,

    pub district: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
}

impl StationInfo {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        address: impl Into<String>,
        district_id: u32,
        district: impl Into<String>,
        lat: f64,
        lon: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            address: address.into(),
            district_id,
            district: district.into(),
            lat,
            lon,
        }
    }
}
