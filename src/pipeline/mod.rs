//! Batch processing: ticker list in, one record per ticker out, CSV on disk.
//!
//! Tickers are processed strictly one after another with a fixed pause between them.
//! A failing ticker yields an error record and the batch moves on; only an unreadable
//! ticker list or a failed export aborts the run.

mod error;
pub mod export;
pub mod progress;
pub mod report;

pub use error::PipelineError;
pub use progress::{Progress, StdoutProgress};

use chrono::Local;
use std::path::{Path, PathBuf};

use crate::config::PipelineConfig;
use crate::provider::MarketDataProvider;
use crate::record::{FinancialRecord, build_record};

/// Trims every line and drops blank lines and `#` comments.
pub fn parse_tickers(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Reads the ticker list at `path`.
///
/// # Errors
///
/// [`PipelineError::TickerFile`] when the file cannot be read, [`PipelineError::NoTickers`]
/// when it holds no ticker.
pub fn read_tickers(path: &Path) -> Result<Vec<String>, PipelineError> {
    let text = std::fs::read_to_string(path).map_err(|source| PipelineError::TickerFile {
        path: path.to_path_buf(),
        source,
    })?;
    let tickers = parse_tickers(&text);
    if tickers.is_empty() {
        return Err(PipelineError::NoTickers {
            path: path.to_path_buf(),
        });
    }
    Ok(tickers)
}

/// Records of one batch, in ticker order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet(Vec<FinancialRecord>);

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: FinancialRecord) {
        self.0.push(record);
    }

    pub fn records(&self) -> &[FinancialRecord] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FinancialRecord> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn completeness(&self) -> Completeness {
        Completeness::of(&self.0)
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a FinancialRecord;
    type IntoIter = std::slice::Iter<'a, FinancialRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// How many records carry the headline figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Completeness {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub with_esg: usize,
    pub with_price: usize,
    pub with_roe: usize,
    pub with_beta: usize,
}

impl Completeness {
    pub fn of(records: &[FinancialRecord]) -> Self {
        let count = |f: fn(&FinancialRecord) -> bool| records.iter().filter(|r| f(r)).count();
        let succeeded = count(FinancialRecord::is_success);
        Self {
            total: records.len(),
            succeeded,
            failed: records.len() - succeeded,
            with_esg: count(|r| r.total_esg_score.is_some()),
            with_price: count(|r| r.stock_price.is_some()),
            with_roe: count(|r| r.roe_pct.is_some()),
            with_beta: count(|r| r.beta.is_some()),
        }
    }

    /// `count / total`, or `0.0` for an empty batch.
    pub fn ratio(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64
        }
    }
}

/// Builds one record per ticker, in order, pausing `config.delay` between tickers.
#[tracing::instrument(skip_all, fields(tickers = tickers.len(), target = %config.target_date))]
pub async fn collect<P, R>(
    provider: &P,
    tickers: &[String],
    config: &PipelineConfig,
    progress: &R,
) -> ResultSet
where
    P: MarketDataProvider + ?Sized,
    R: Progress + ?Sized,
{
    let total = tickers.len();
    let mut results = ResultSet::new();

    for (index, symbol) in tickers.iter().enumerate() {
        progress.on_start(symbol, index, total);
        let record = build_record(provider, symbol, config.target_date).await;
        progress.on_record(&record, index, total);
        results.push(record);

        if index + 1 < total && !config.delay.is_zero() {
            tokio::time::sleep(config.delay).await;
        }
    }

    progress.on_batch_complete(&results.completeness());
    results
}

/// Outcome of a full run.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub results: ResultSet,
    pub csv_path: PathBuf,
}

/// Reads the ticker list, collects all records and writes the CSV.
///
/// # Errors
///
/// Fails on an unreadable or empty ticker list (no CSV is written) or when the export fails.
pub async fn run<P, R>(
    provider: &P,
    config: &PipelineConfig,
    progress: &R,
) -> Result<BatchOutcome, PipelineError>
where
    P: MarketDataProvider + ?Sized,
    R: Progress + ?Sized,
{
    let tickers = read_tickers(&config.input)?;
    tracing::info!(count = tickers.len(), input = %config.input.display(), "tickers loaded");

    let results = collect(provider, &tickers, config, progress).await;
    let csv_path = export::export_csv(
        &config.output_dir,
        config.target_date,
        Local::now().naive_local(),
        results.records(),
    )?;

    Ok(BatchOutcome { results, csv_path })
}
