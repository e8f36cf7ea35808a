use crate::utils::constants::DEFAULT_OUTPUT_DIR;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "pm10-processor")]
#[command(about = "PM10 air-quality aggregation: hourly, daily and monthly statistics")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose (debug) logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Only log warnings and errors, no spinner")]
    pub quiet: bool,

    #[arg(long, global = true, value_enum, help = "Log level [default: info]")]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean readings and write hourly, daily and monthly statistics
    Process {
        #[command(flatten)]
        input: InputArgs,

        #[arg(short, long, help = "Station metadata csv (needed for monthly statistics)")]
        stations_file: Option<PathBuf>,

        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,
    },

    /// Load and clean readings, report data quality without writing output
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    #[arg(short, long, help = "Readings source (.csv, .db, .sqlite, .sqlite3)")]
    pub input_file: PathBuf,

    #[arg(short, long, help = "Settings file (TOML or JSON)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Inclusive window start, local date or datetime [default: 2019-04-01]")]
    pub from: Option<String>,

    #[arg(long, help = "Exclusive window end [default: one month after start]")]
    pub to: Option<String>,

    #[arg(long, help = "Hourly averages a day needs to be reported [default: 18]")]
    pub min_hours: Option<u32>,

    #[arg(long, help = "Daily norm in µg/m³ [default: 50]")]
    pub norm: Option<Decimal>,

    #[arg(long, help = "Canonical timezone [default: Europe/Vienna]")]
    pub timezone: Option<String>,

    #[arg(long, help = "Table holding readings in a database source [default: pm10]")]
    pub table: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

impl Cli {
    /// An explicit `--log-level` wins over `--verbose` and `--quiet`.
    pub fn log_level(&self) -> Level {
        match self.log_level {
            Some(level) => level.into(),
            None if self.verbose => Level::DEBUG,
            None if self.quiet => Level::WARN,
            None => Level::INFO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_process_command() {
        let cli = Cli::try_parse_from([
            "pm10-processor",
            "process",
            "--input-file",
            "pm10.csv",
            "--stations-file",
            "stations.csv",
            "--norm",
            "40",
        ])
        .unwrap();

        match cli.command {
            Commands::Process {
                input,
                stations_file,
                output_dir,
            } => {
                assert_eq!(input.input_file, PathBuf::from("pm10.csv"));
                assert_eq!(stations_file, Some(PathBuf::from("stations.csv")));
                assert_eq!(output_dir, PathBuf::from("output"));
                assert_eq!(input.norm, Some(Decimal::from(40)));
            }
            Commands::Validate { .. } => panic!("expected process"),
        }
    }

    #[test]
    fn test_input_file_required() {
        assert!(Cli::try_parse_from(["pm10-processor", "process"]).is_err());
    }

    #[test]
    fn test_log_level_precedence() {
        let cli = Cli::try_parse_from([
            "pm10-processor",
            "--verbose",
            "validate",
            "--input-file",
            "pm10.csv",
        ])
        .unwrap();
        assert_eq!(cli.log_level(), Level::DEBUG);

        let cli = Cli::try_parse_from([
            "pm10-processor",
            "validate",
            "-i",
            "pm10.csv",
            "--quiet",
            "--log-level",
            "error",
        ])
        .unwrap();
        assert_eq!(cli.log_level(), Level::ERROR);
    }
}
