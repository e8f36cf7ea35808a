use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error(
        "Invalid source extension '{extension}' for {}. Permitted extensions are .csv, .db, .sqlite and .sqlite3",
        path.display()
    )]
    UnsupportedExtension { path: PathBuf, extension: String },

    #[error("Station file does not exist: {}", .0.display())]
    StationFileNotFound(PathBuf),

    #[error("Malformed row {row}: {message}")]
    MalformedRow { row: u64, message: String },

    #[error("Unparseable timestamp '{value}' in row {row}")]
    TimestampParse { row: u64, value: String },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid time window: {0}")]
    InvalidWindow(String),

    #[error("Duplicate station id {0} in station file")]
    DuplicateStation(u32),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Failed to export {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ProcessingError {
    pub fn malformed(row: u64, message: impl Into<String>) -> Self {
        ProcessingError::MalformedRow {
            row,
            message: message.into(),
        }
    }

    pub fn export(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        ProcessingError::Export {
            path: path.into(),
            source: source.into(),
        }
    }
}
