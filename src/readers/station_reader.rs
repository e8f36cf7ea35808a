use crate::error::{ProcessingError, Result};
use crate::models::StationInfo;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};
use validator::Validate;

pub struct StationReader;

impl StationReader {
    pub fn new() -> Self {
        Self
    }

    /// Read station metadata from a UTF-8 delimited file with a header row
    pub fn read_stations(&self, path: &Path) -> Result<Vec<StationInfo>> {
        if !path.exists() {
            return Err(ProcessingError::StationFileNotFound(path.to_path_buf()));
        }

        let bytes = std::fs::read(path)?;
        let stations = self.parse_stations(&bytes)?;
        info!(
            "Loaded {} stations from {}",
            stations.len(),
            path.display()
        );
        Ok(stations)
    }

    fn parse_stations(&self, bytes: &[u8]) -> Result<Vec<StationInfo>> {
        let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
        if had_errors {
            return Err(ProcessingError::InvalidFormat(
                "Station file is not valid UTF-8".to_string(),
            ));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let mut stations = Vec::new();
        for result in reader.deserialize::<StationInfo>() {
            let station = result?;
            station.validate()?;
            stations.push(station);
        }

        debug!("Parsed {} station rows", stations.len());
        Ok(stations)
    }

    /// Read station metadata keyed by station id
    pub fn read_stations_map(&self, path: &Path) -> Result<HashMap<u32, StationInfo>> {
        let stations = self.read_stations(path)?;
        Self::index_stations(stations)
    }

    fn index_stations(stations: Vec<StationInfo>) -> Result<HashMap<u32, StationInfo>> {
        let mut map = HashMap::with_capacity(stations.len());

        for station in stations {
            let id = station.id;
            if map.insert(id, station).is_some() {
                return Err(ProcessingError::DuplicateStation(id));
            }
        }

        Ok(map)
    }
}

impl Default for StationReader {
    fn default() -> Self {
        Self::new()
    }
}
