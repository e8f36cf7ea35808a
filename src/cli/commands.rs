use crate::cli::args::{Cli, Commands, InputArgs};
use crate::cli::logging::init_logging;
use crate::config::PipelineConfig;
use crate::error::{ProcessingError, Result};
use crate::processors::PipelineProcessor;
use crate::readers::ReadingSource;
use crate::utils::progress::ProgressReporter;
use crate::writers::CsvExporter;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub async fn run(cli: Cli) -> Result<()> {
    let _log_guard = init_logging(cli.log_level());
    let quiet = cli.quiet;

    let result = match cli.command {
        Commands::Process {
            input,
            stations_file,
            output_dir,
        } => process(&input, stations_file.as_deref(), &output_dir, quiet).await,
        Commands::Validate { input } => validate(&input, quiet).await,
    };

    if let Err(e) = &result {
        error!("{}", e);
    }
    result
}

async fn process(
    input: &InputArgs,
    stations_file: Option<&Path>,
    output_dir: &Path,
    quiet: bool,
) -> Result<()> {
    // Fail fast on paths before any stage runs
    if let Some(path) = stations_file {
        if !path.exists() {
            return Err(ProcessingError::StationFileNotFound(path.to_path_buf()));
        }
    }
    let (processor, source) = prepare(input)?;

    info!("Input: {}", source.path().display());
    info!("Output directory: {}", output_dir.display());

    let progress = ProgressReporter::new_spinner("Processing PM10 readings...", quiet);
    let output = processor
        .run(&source, stations_file, Some(&progress))
        .await
        .inspect_err(|_| progress.abandon())?;

    progress.set_message("Writing output files...");
    let exporter = CsvExporter::new(output_dir);
    let written: Vec<PathBuf> = exporter
        .export_all(&output, &processor.config().output)
        .inspect_err(|_| progress.abandon())?;
    progress.finish_with_message(&format!(
        "Wrote {} files to {}",
        written.len(),
        exporter.output_dir().display()
    ));

    info!("\n{}", output.quality.generate_summary());
    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}

async fn validate(input: &InputArgs, quiet: bool) -> Result<()> {
    let (processor, source) = prepare(input)?;
    let window = processor.config().window()?;

    let progress = ProgressReporter::new_spinner("Validating PM10 readings...", quiet);
    let raw = source.load().await.inspect_err(|_| progress.abandon())?;
    let (cleaned, report) = processor.clean(raw).inspect_err(|_| progress.abandon())?;
    progress.finish_with_message("Validation complete");

    println!("{}", report.generate_summary());
    println!(
        "{} readings usable in window {} .. {}",
        cleaned.len(),
        window.start,
        window.end
    );
    Ok(())
}

/// Build the effective configuration and resolve the input source.
fn prepare(input: &InputArgs) -> Result<(PipelineProcessor, ReadingSource)> {
    let config = apply_overrides(PipelineConfig::load(input.config.as_deref())?, input);
    let processor = PipelineProcessor::new(config)?;
    let source = ReadingSource::from_path(&input.input_file, &processor.config().source_table)?;
    Ok((processor, source))
}

fn apply_overrides(mut config: PipelineConfig, input: &InputArgs) -> PipelineConfig {
    if let Some(from) = &input.from {
        config.window_start = from.clone();
    }
    if let Some(to) = &input.to {
        config.window_end = Some(to.clone());
    }
    if let Some(min_hours) = input.min_hours {
        config.min_hours = min_hours;
    }
    if let Some(norm) = input.norm {
        config.norm = norm;
    }
    if let Some(timezone) = &input.timezone {
        config.timezone = timezone.clone();
    }
    if let Some(table) = &input.table {
        config.source_table = table.clone();
    }
    config
}
