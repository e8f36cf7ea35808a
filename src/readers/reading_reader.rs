use crate::error::{ProcessingError, Result};
use crate::models::{RawDataset, RawReading};
use crate::readers::fields::{parse_station_id, parse_value};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Number of columns in a readings file: station_id, measure_time, value
const READING_COLUMNS: usize = 3;

/// Reads PM10 readings from a delimited file.
///
/// The first line is a header and is skipped regardless of its content;
/// columns are taken positionally.
pub struct CsvReadingReader {
    delimiter: u8,
}

impl CsvReadingReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn read_readings(&self, path: &Path) -> Result<RawDataset> {
        let file = File::open(path)?;
        let readings = self.read_from(file)?;
        info!(
            "Loaded {} readings from csv file {}",
            readings.len(),
            path.display()
        );
        Ok(readings)
    }

    pub fn read_from<R: Read>(&self, input: R) -> Result<RawDataset> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        let mut readings = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row = record
                .position()
                .map(|p| p.line())
                .unwrap_or(readings.len() as u64 + 2);

            if record.len() != READING_COLUMNS {
                return Err(ProcessingError::malformed(
                    row,
                    format!(
                        "expected {} columns (station_id, measure_time, value), found {}",
                        READING_COLUMNS,
                        record.len()
                    ),
                ));
            }

            let station_id = parse_station_id(&record[0], row)?;
            let value = parse_value(&record[2], row)?;
            readings.push(RawReading::new(row, station_id, &record[1], value));
        }

        debug!("Parsed {} csv rows", readings.len());
        Ok(readings)
    }
}

impl Default for CsvReadingReader {
    fn default() -> Self {
        Self::new()
    }
}
