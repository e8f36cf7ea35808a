pub mod csv_writer;

pub use csv_writer::CsvExporter;
