//! esg-snapshot CLI: reads a ticker list, fetches one record per ticker, writes a CSV.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use esg_snapshot::config::{DEFAULT_INPUT, PipelineConfig};
use esg_snapshot::pipeline::{self, StdoutProgress, report};
use esg_snapshot::YfClient;

#[derive(Parser, Debug)]
#[command(
    name = "esg-snapshot",
    about = "ESG and financial metrics snapshot of listed companies, exported as CSV"
)]
struct Cli {
    /// Ticker list, one symbol per line. Blank lines and `#` comments are ignored.
    #[arg(long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Snapshot date (YYYY-MM-DD).
    #[arg(long, default_value = "2024-12-31")]
    target_date: NaiveDate,

    /// Directory the CSV is written into.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Pause between tickers, in milliseconds.
    #[arg(long, default_value_t = 1500)]
    delay_ms: u64,

    /// Number of records shown in the preview table.
    #[arg(long, default_value_t = 5)]
    preview_rows: usize,

    /// HTTP request timeout, in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

impl From<Cli> for PipelineConfig {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.input,
            output_dir: cli.output_dir,
            target_date: cli.target_date,
            delay: Duration::from_millis(cli.delay_ms),
            preview_rows: cli.preview_rows,
            timeout: Duration::from_secs(cli.timeout_secs),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Suggested: RUST_LOG=esg_snapshot=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    let config = PipelineConfig::from(Cli::parse());

    let client = YfClient::builder()
        .timeout(config.timeout)
        .build()
        .context("failed to build HTTP client")?;

    println!(
        "ESG & financial snapshot as of {} ({})",
        config.target_date,
        config.input.display()
    );

    let outcome = pipeline::run(&client, &config, &StdoutProgress)
        .await
        .context("batch run failed")?;

    let completeness = outcome.results.completeness();
    println!("\nData completeness:");
    for line in report::completeness_lines(&completeness) {
        println!("  {line}");
    }

    println!("\nSaved {} records to {}", outcome.results.len(), outcome.csv_path.display());

    if config.preview_rows > 0 {
        println!("\nPreview:");
        println!(
            "{}",
            report::preview_table(outcome.results.records(), config.preview_rows)
        );
    }

    Ok(())
}
