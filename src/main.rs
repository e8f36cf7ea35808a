use anyhow::Context;
use clap::Parser;
use pm10_processor::cli::{run, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).await.context("PM10 processing failed")
}
