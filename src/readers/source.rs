use crate::error::{ProcessingError, Result};
use crate::models::RawDataset;
use crate::readers::{CsvReadingReader, SqliteReadingReader};
use crate::utils::constants::{CSV_EXTENSION, SQLITE_EXTENSIONS};
use std::path::{Path, PathBuf};

/// A readings source, selected by file extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadingSource {
    Csv(PathBuf),
    Sqlite { path: PathBuf, table: String },
}

impl ReadingSource {
    /// Resolve an input path; the file must exist and have a supported extension.
    pub fn from_path(path: &Path, table: &str) -> Result<Self> {
        if !path.exists() {
            return Err(ProcessingError::InputNotFound(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        if extension == CSV_EXTENSION {
            Ok(ReadingSource::Csv(path.to_path_buf()))
        } else if SQLITE_EXTENSIONS.contains(&extension.as_str()) {
            Ok(ReadingSource::Sqlite {
                path: path.to_path_buf(),
                table: table.to_string(),
            })
        } else {
            Err(ProcessingError::UnsupportedExtension {
                path: path.to_path_buf(),
                extension,
            })
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ReadingSource::Csv(path) => path,
            ReadingSource::Sqlite { path, .. } => path,
        }
    }

    pub async fn load(&self) -> Result<RawDataset> {
        match self {
            ReadingSource::Csv(path) => CsvReadingReader::new().read_readings(path),
            ReadingSource::Sqlite { path, table } => {
                SqliteReadingReader::with_table(table.as_str())
                    .read_readings(path)
                    .await
            }
        }
    }
}
