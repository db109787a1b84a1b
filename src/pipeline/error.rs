use std::path::PathBuf;
use thiserror::Error;

/// Fatal batch failures. Per-ticker fetch failures never surface here; they become error records.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The ticker list could not be read.
    #[error("cannot read ticker file {}: {source}", path.display())]
    TickerFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The ticker list was readable but held no tickers.
    #[error("no tickers found in {}", path.display())]
    NoTickers { path: PathBuf },

    /// The CSV writer failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
