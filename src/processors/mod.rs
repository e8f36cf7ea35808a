pub mod cleaner;
pub mod daily_aggregator;
pub mod hourly_aggregator;
pub mod monthly_aggregator;
pub mod pipeline;
pub mod quality_report;
pub mod station_enricher;

pub use cleaner::{remove_duplicates, sort_readings, CleaningStats, DataCleaner};
pub use daily_aggregator::{DailyAggregator, IncompleteDay};
pub use hourly_aggregator::hourly_stats;
pub use monthly_aggregator::MonthlyAggregator;
pub use pipeline::{PipelineOutput, PipelineProcessor};
pub use quality_report::QualityReport;
pub use station_enricher::StationEnricher;
