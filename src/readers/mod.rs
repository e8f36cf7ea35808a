pub mod fields;
pub mod reading_reader;
pub mod source;
pub mod sqlite_reader;
pub mod station_reader;

pub use reading_reader::CsvReadingReader;
pub use source::ReadingSource;
pub use sqlite_reader::SqliteReadingReader;
pub use station_reader::StationReader;
