use crate::error::{ProcessingError, Result};
use crate::models::{RawDataset, RawReading};
use crate::readers::fields::{parse_station_id, parse_value};
use crate::utils::constants::DEFAULT_SOURCE_TABLE;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Connection, Row};
use std::path::Path;
use tracing::{debug, info};

/// Reads PM10 readings from a single SQLite table.
///
/// Columns are cast to text and parsed here, so integer, real and text
/// storage classes are all handled the same way as the csv source.
pub struct SqliteReadingReader {
    table: String,
}

impl SqliteReadingReader {
    pub fn new() -> Self {
        Self {
            table: DEFAULT_SOURCE_TABLE.to_string(),
        }
    }

    /// `table` must already be validated as a plain identifier.
    pub fn with_table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }

    fn query(&self) -> String {
        format!(
            "SELECT CAST(station_id AS TEXT) AS station_id, \
             CAST(measure_time AS TEXT) AS measure_time, \
             CAST(value AS TEXT) AS value \
             FROM {}",
            self.table
        )
    }

    pub async fn read_readings(&self, path: &Path) -> Result<RawDataset> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let mut conn = SqliteConnection::connect_with(&options).await?;
        debug!("Opened database {}", path.display());

        let sql = self.query();
        let fetched = sqlx::query(&sql).fetch_all(&mut conn).await;
        conn.close().await?;

        let rows = fetched?;
        let readings = rows
            .iter()
            .enumerate()
            .map(|(index, row)| Self::parse_row(row, index as u64 + 1))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Loaded {} readings from table '{}' in {}",
            readings.len(),
            self.table,
            path.display()
        );
        Ok(readings)
    }

    fn parse_row(row: &SqliteRow, index: u64) -> Result<RawReading> {
        let text = |column: &str| -> Result<String> {
            row.try_get::<Option<String>, _>(column)?
                .ok_or_else(|| ProcessingError::malformed(index, format!("{} is NULL", column)))
        };

        let station_id = parse_station_id(&text("station_id")?, index)?;
        let measure_time = text("measure_time")?;
        let value = parse_value(&text("value")?, index)?;

        Ok(RawReading::new(index, station_id, measure_time, value))
    }
}

impl Default for SqliteReadingReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    async fn create_database(path: &Path, statements: &[&str]) -> Result<()> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let mut conn = SqliteConnection::connect_with(&options).await?;
        for statement in statements {
            sqlx::query(statement).execute(&mut conn).await?;
        }
        conn.close().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_read_sqlite_readings() -> Result<()> {
        let dir = TempDir::new()?;
        let db = dir.path().join("pm10.db");
        create_database(
            &db,
            &[
                "CREATE TABLE pm10 (id INTEGER PRIMARY KEY, station_id INTEGER, measure_time TEXT, value REAL)",
                "INSERT INTO pm10 (station_id, measure_time, value) VALUES (4, '2019-04-01T10:00:00+02:00', 23.4)",
                "INSERT INTO pm10 (station_id, measure_time, value) VALUES ('7', '2019-04-01 08:00:00', 41)",
            ],
        )
        .await?;

        let readings = SqliteReadingReader::new().read_readings(&db).await?;

        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].station_id, 4);
        assert_eq!(readings[0].value, Decimal::new(234, 1));
        assert_eq!(readings[1].station_id, 7);
        assert_eq!(readings[1].measure_time, "2019-04-01 08:00:00");
        assert_eq!(readings[1].value, Decimal::from(41));
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_table_is_fatal() -> Result<()> {
        let dir = TempDir::new()?;
        let db = dir.path().join("empty.db");
        create_database(&db, &["CREATE TABLE other (x INTEGER)"]).await?;

        let result = SqliteReadingReader::new().read_readings(&db).await;
        assert!(matches!(result, Err(ProcessingError::Database(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_null_value_is_fatal() -> Result<()> {
        let dir = TempDir::new()?;
        let db = dir.path().join("nulls.db");
        create_database(
            &db,
            &[
                "CREATE TABLE measurements (station_id INTEGER, measure_time TEXT, value REAL)",
                "INSERT INTO measurements VALUES (4, '2019-04-01T10:00:00Z', NULL)",
            ],
        )
        .await?;

        let result = SqliteReadingReader::with_table("measurements")
            .read_readings(&db)
            .await;
        assert!(matches!(
            result,
            Err(ProcessingError::MalformedRow { row: 1, .. })
        ));
        Ok(())
    }
}
