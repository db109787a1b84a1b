use chrono::NaiveDate;
use std::path::PathBuf;
use std::time::Duration;

/// Settings of one batch run. The binary fills this from its command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Ticker list, one symbol per line.
    pub input: PathBuf,
    /// Directory the CSV is written into.
    pub output_dir: PathBuf,
    /// Date the snapshot describes.
    pub target_date: NaiveDate,
    /// Pause between consecutive tickers.
    pub delay: Duration,
    /// Number of records shown in the console preview.
    pub preview_rows: usize,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
}

pub const DEFAULT_INPUT: &str = "Company List/swiss_companies.txt";
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);
pub const DEFAULT_PREVIEW_ROWS: usize = 5;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// 2024-12-31.
pub fn default_target_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or(NaiveDate::MIN)
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
            target_date: default_target_date(),
            delay: DEFAULT_DELAY,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
