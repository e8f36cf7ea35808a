use crate::config::OutputFiles;
use crate::error::{ProcessingError, Result};
use crate::models::ExportRecord;
use crate::processors::{PipelineOutput, QualityReport};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes stage results as delimited files with a header row.
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory if it doesn't exist
    pub fn prepare(&self) -> Result<()> {
        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| ProcessingError::export(&self.output_dir, e))
    }

    /// Serialize `records` to `file_name`; the header is written even when empty.
    pub fn write_records<T: ExportRecord>(&self, records: &[T], file_name: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        write_csv(records, &path).map_err(|e| ProcessingError::export(&path, e))?;

        info!("Exported {} rows to the file {}", records.len(), path.display());
        Ok(path)
    }

    pub fn write_quality_report(&self, report: &QualityReport, file_name: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        let write = || -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, report)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            Ok(())
        };
        write().map_err(|e| ProcessingError::Export {
            path: path.clone(),
            source: e,
        })?;

        info!("Exported data quality report to the file {}", path.display());
        Ok(path)
    }

    /// Write every dataset of a run; returns the written paths in order.
    pub fn export_all(&self, output: &PipelineOutput, files: &OutputFiles) -> Result<Vec<PathBuf>> {
        self.prepare()?;

        let mut written = vec![
            self.write_records(&output.cleaned, &files.cleaned)?,
            self.write_records(&output.hourly, &files.hourly)?,
            self.write_records(&output.daily, &files.daily)?,
        ];
        if let Some(monthly) = &output.monthly_report {
            written.push(self.write_records(monthly, &files.monthly)?);
        }
        written.push(self.write_quality_report(&output.quality, &files.quality_report)?);

        Ok(written)
    }
}

fn write_csv<T: ExportRecord>(records: &[T], path: &Path) -> std::result::Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(T::COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
