use chrono::{Duration, NaiveDate};
use clap::Parser;
use pm10_processor::cli::{run, Cli};
use pm10_processor::processors::PipelineProcessor;
use pm10_processor::readers::ReadingSource;
use pm10_processor::writers::CsvExporter;
use pm10_processor::{PipelineConfig, ProcessingError};
use pretty_assertions::assert_eq;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const STATIONS: &str = "\
id,name,address,district_id,district,lat,lon
4,Plac Grunwaldzki,\"ul. Grunwaldzka 8, Katowice\",2,Koszutka,50.2683632,19.0239601
";

/// Readings for station 4 on 2 and 3 April (complete), station 9 on 2 April
/// (complete, no metadata) and station 4 on 4 April (only 17 hours).
fn readings_csv() -> String {
    let mut csv = String::from("station_id,measure_time,value\n");
    for hour in 0..24 {
        // two readings per hour: hourly mean 60
        writeln!(csv, "4,2019-04-02T{:02}:10:00+02:00,55", hour).unwrap();
        writeln!(csv, "4,2019-04-02T{:02}:40:00+02:00,65", hour).unwrap();
        writeln!(csv, "4,2019-04-03T{:02}:10:00+02:00,210", hour).unwrap();
        writeln!(csv, "9,2019-04-02T{:02}:10:00+02:00,20.5", hour).unwrap();
    }
    for hour in 0..17 {
        writeln!(csv, "4,2019-04-04T{:02}:10:00+02:00,300", hour).unwrap();
    }
    // duplicate of the first row with an equivalent UTC timestamp
    writeln!(csv, "4,2019-04-01T22:10:00Z,55").unwrap();
    // outside the April window
    writeln!(csv, "4,2019-05-01T00:00:00+02:00,999").unwrap();
    csv
}

fn write_inputs(dir: &Path) -> (PathBuf, PathBuf) {
    let input = dir.join("pm10.csv");
    let stations = dir.join("stations.csv");
    std::fs::write(&input, readings_csv()).unwrap();
    std::fs::write(&stations, STATIONS).unwrap();
    (input, stations)
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[tokio::test]
async fn test_full_pipeline_csv() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let (input, stations) = write_inputs(dir.path());
    let output_dir = dir.path().join("output");

    let processor = PipelineProcessor::new(PipelineConfig::default()).unwrap();
    let source = ReadingSource::from_path(&input, "pm10").unwrap();
    let output = processor.run(&source, Some(&stations), None).await.unwrap();
    let written = CsvExporter::new(&output_dir)
        .export_all(&output, &processor.config().output)
        .unwrap();

    assert_eq!(written.len(), 5);
    assert_eq!(output.quality.duplicates_removed, 1);
    assert_eq!(output.quality.rows_outside_window, 1);
    assert_eq!(output.quality.incomplete_days.len(), 1);
    assert_eq!(output.quality.stations_without_metadata, vec![9]);

    let cleaned = read(&output_dir.join("data.csv"));
    let mut lines = cleaned.lines();
    assert_eq!(lines.next(), Some("station_id,measure_time,value"));
    assert_eq!(lines.next(), Some("4,2019-04-02 00:10:00+02:00,55"));

    let hourly = read(&output_dir.join("hourly_stats.csv"));
    assert_eq!(
        hourly.lines().take(2).collect::<Vec<_>>(),
        vec!["station_id,date,hour,value", "4,2019-04-02,0,60"]
    );
    // station 9: 20.5 rounds half up
    assert!(hourly.contains("9,2019-04-02,0,21\n"));

    let daily = read(&output_dir.join("daily_stats.csv"));
    assert_eq!(
        daily,
        "station_id,date,min,max,mean,perc_of_norm\n\
         4,2019-04-02,60,60,60,120\n\
         4,2019-04-03,210,210,210,420\n\
         9,2019-04-02,21,21,21,42\n"
    );

    let monthly = read(&output_dir.join("monthly_stats.csv"));
    assert_eq!(
        monthly,
        "station_id,date,station_name,station_address,district_id,district,lat,lon,days_num,days_abv_norm,days_abv_200,days_abv_300,max,mean\n\
         4,2019-04-01,Plac Grunwaldzki,\"ul. Grunwaldzka 8, Katowice\",2,Koszutka,50.2683632,19.0239601,2,2,1,0,210,135\n\
         9,2019-04-01,,,,,,,1,0,0,0,21,21\n"
    );

    let report: serde_json::Value =
        serde_json::from_str(&read(&output_dir.join("quality_report.json"))).unwrap();
    assert_eq!(report["incomplete_days"][0]["hours"], 17);
}

#[tokio::test]
async fn test_full_pipeline_sqlite() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("pm10.db");
    let options = SqliteConnectOptions::new()
        .filename(&db)
        .create_if_missing(true);
    let mut conn = SqliteConnection::connect_with(&options).await.unwrap();
    sqlx::query("CREATE TABLE pm10 (station_id INTEGER, measure_time TEXT, value REAL)")
        .execute(&mut conn)
        .await
        .unwrap();
    // naive timestamps are UTC: 22:00 UTC on 1 April is midnight in Vienna
    let first = NaiveDate::from_ymd_opt(2019, 4, 1)
        .unwrap()
        .and_hms_opt(22, 0, 0)
        .unwrap();
    for hour in 0..18 {
        let time = (first + Duration::hours(hour)).format("%Y-%m-%d %H:%M:%S").to_string();
        sqlx::query("INSERT INTO pm10 VALUES (?, ?, ?)")
            .bind(4_i64)
            .bind(time)
            .bind(75.0_f64)
            .execute(&mut conn)
            .await
            .unwrap();
    }
    conn.close().await.unwrap();

    let processor = PipelineProcessor::new(PipelineConfig::default()).unwrap();
    let source = ReadingSource::from_path(&db, "pm10").unwrap();
    let output = processor.run(&source, None, None).await.unwrap();

    assert_eq!(output.hourly.len(), 18);
    assert!(output.hourly.iter().all(|h| h.date.to_string() == "2019-04-02"));
    assert_eq!(output.daily.len(), 1);
    assert_eq!(output.daily[0].perc_of_norm.to_string(), "150");
    assert!(output.monthly_report.is_none());
}

#[tokio::test]
async fn test_cli_process_command() {
    let dir = TempDir::new().unwrap();
    let (input, stations) = write_inputs(dir.path());
    let output_dir = dir.path().join("out");

    let cli = Cli::try_parse_from([
        "pm10-processor",
        "--quiet",
        "process",
        "--input-file",
        input.to_str().unwrap(),
        "--stations-file",
        stations.to_str().unwrap(),
        "--output-dir",
        output_dir.to_str().unwrap(),
        "--min-hours",
        "17",
    ])
    .unwrap();

    run(cli).await.unwrap();

    // with a 17 hour threshold the 4 April day counts too
    let daily = read(&output_dir.join("daily_stats.csv"));
    assert!(daily.contains("4,2019-04-04,300,300,300,600\n"));
}

#[tokio::test]
async fn test_cli_missing_station_file_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let (input, _) = write_inputs(dir.path());
    let output_dir = dir.path().join("out");

    let cli = Cli::try_parse_from([
        "pm10-processor",
        "--quiet",
        "process",
        "-i",
        input.to_str().unwrap(),
        "-s",
        dir.path().join("missing.csv").to_str().unwrap(),
        "-o",
        output_dir.to_str().unwrap(),
    ])
    .unwrap();

    let err = run(cli).await.unwrap_err();

    assert!(matches!(err, ProcessingError::StationFileNotFound(_)));
    assert!(!output_dir.exists());
}

#[tokio::test]
async fn test_cli_rejects_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pm10.xlsx");
    std::fs::write(&input, "").unwrap();

    let cli = Cli::try_parse_from([
        "pm10-processor",
        "--quiet",
        "validate",
        "-i",
        input.to_str().unwrap(),
    ])
    .unwrap();

    let err = run(cli).await.unwrap_err();
    assert!(matches!(err, ProcessingError::UnsupportedExtension { .. }));
}

#[tokio::test]
async fn test_bad_timestamp_aborts_run() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("pm10.csv");
    std::fs::write(
        &input,
        "station_id,measure_time,value\n4,2019-04-02T10:00:00+02:00,10\n4,not a time,10\n",
    )
    .unwrap();

    let processor = PipelineProcessor::new(PipelineConfig::default()).unwrap();
    let source = ReadingSource::from_path(&input, "pm10").unwrap();
    let err = processor.run(&source, None, None).await.unwrap_err();

    assert!(matches!(err, ProcessingError::TimestampParse { row: 3, .. }));
}
