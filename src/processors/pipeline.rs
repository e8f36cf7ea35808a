use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{
    CleanedDataset, DailyDataset, HourlyDataset, MonthlyDataset, MonthlyReportRecord, RawDataset,
};
use crate::processors::{
    hourly_stats, DailyAggregator, DataCleaner, MonthlyAggregator, QualityReport, StationEnricher,
};
use crate::readers::{ReadingSource, StationReader};
use crate::utils::progress::ProgressReporter;
use std::path::Path;
use tracing::{info, warn};

/// Every dataset produced by one run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub cleaned: CleanedDataset,
    pub hourly: HourlyDataset,
    pub daily: DailyDataset,
    pub monthly: MonthlyDataset,
    /// `None` when no station file was supplied
    pub monthly_report: Option<Vec<MonthlyReportRecord>>,
    pub quality: QualityReport,
}

/// Runs loader → cleaner → hourly → daily → monthly → enricher in sequence.
pub struct PipelineProcessor {
    config: PipelineConfig,
    cleaner: DataCleaner,
    daily: DailyAggregator,
    monthly: MonthlyAggregator,
}

impl PipelineProcessor {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let config = config.validated()?;
        let cleaner = DataCleaner::new(config.canonical_tz()?, config.naive_tz()?, config.window()?);
        let daily = DailyAggregator::new()
            .with_min_hours(config.min_hours)
            .with_norm(config.norm);
        let monthly = MonthlyAggregator::new().with_norm(config.norm);

        Ok(Self {
            config,
            cleaner,
            daily,
            monthly,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load stations first so a bad station file fails before any work is done.
    pub async fn run(
        &self,
        source: &ReadingSource,
        stations_file: Option<&Path>,
        progress: Option<&ProgressReporter>,
    ) -> Result<PipelineOutput> {
        let enricher = match stations_file {
            Some(path) => Some(StationEnricher::new(
                StationReader::new().read_stations_map(path)?,
            )),
            None => {
                warn!("No station file given; monthly statistics will not be produced");
                None
            }
        };

        set_message(progress, "Loading readings...");
        let raw = source.load().await?;

        set_message(progress, "Cleaning readings...");
        let (cleaned, quality) = self.clean(raw)?;

        set_message(progress, "Aggregating...");
        Ok(self.aggregate(cleaned, quality, enricher.as_ref()))
    }

    pub fn clean(&self, raw: RawDataset) -> Result<(CleanedDataset, QualityReport)> {
        let (cleaned, stats) = self.cleaner.clean(raw)?;
        Ok((cleaned, QualityReport::new(&stats, self.config.min_hours)))
    }

    pub fn aggregate(
        &self,
        cleaned: CleanedDataset,
        mut quality: QualityReport,
        enricher: Option<&StationEnricher>,
    ) -> PipelineOutput {
        let hourly = hourly_stats(&cleaned);
        quality.hourly_records = hourly.len();

        let (daily, incomplete) = self.daily.daily_stats(&hourly);
        quality.complete_days = daily.len();
        quality.incomplete_days = incomplete;

        let monthly = self.monthly.monthly_stats(&daily);
        quality.monthly_records = monthly.len();

        let monthly_report = enricher.map(|enricher| {
            let (joined, unmatched) = enricher.add_station_info(&monthly);
            quality.stations_without_metadata = unmatched;
            joined
        });

        info!(
            "Pipeline produced {} cleaned, {} hourly, {} daily and {} monthly records",
            cleaned.len(),
            hourly.len(),
            daily.len(),
            monthly.len()
        );

        PipelineOutput {
            cleaned,
            hourly,
            daily,
            monthly,
            monthly_report,
            quality,
        }
    }
}

fn set_message(progress: Option<&ProgressReporter>, message: &str) {
    if let Some(p) = progress {
        p.set_message(message);
    }
}
