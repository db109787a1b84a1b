//! esg-snapshot: ESG scores and financial metrics of listed companies, as of a target date.
//!
//! The crate is layered the same way a run flows:
//!
//! - [`core`], [`info`], [`esg`], [`fundamentals`], [`history`]: a small Yahoo Finance client
//!   (cookie/crumb auth, quoteSummary, fundamentals timeseries, chart).
//! - [`provider`]: the [`MarketDataProvider`] seam the snapshot logic is written against.
//! - [`extract`]: null-safe extraction of single metrics.
//! - [`record`]: one fixed-schema [`FinancialRecord`] per ticker, never failing.
//! - [`pipeline`]: ticker list in, CSV out, progress and summary on the console.
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use esg_snapshot::{PipelineConfig, YfClient, pipeline};
//!
//! let client = YfClient::builder().build()?;
//! let config = PipelineConfig::default();
//! let outcome = pipeline::run(&client, &config, &pipeline::StdoutProgress).await?;
//! println!("wrote {}", outcome.csv_path.display());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod esg;
pub mod extract;
pub mod fundamentals;
pub mod history;
pub mod info;
pub mod pipeline;
pub mod provider;
pub mod record;

pub use config::PipelineConfig;
pub use crate::core::{
    Candle, FieldMap, FinancialStatement, PeriodValue, YfClient, YfClientBuilder, YfError,
};
pub use esg::EsgBuilder;
pub use fundamentals::FundamentalsBuilder;
pub use history::HistoryBuilder;
pub use info::InfoBuilder;
pub use pipeline::{Completeness, PipelineError, Progress, ResultSet, StdoutProgress};
pub use provider::{MarketDataProvider, RawCompanyData};
pub use record::{FinancialRecord, build_record};
