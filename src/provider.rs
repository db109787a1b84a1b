//! The seam between the snapshot core and a market-data source.

use chrono::NaiveDate;
use futures::future::BoxFuture;

use crate::core::{Candle, FieldMap, FinancialStatement, YfClient, YfError};
use crate::esg::EsgBuilder;
use crate::extract::snapshot_window;
use crate::fundamentals::FundamentalsBuilder;
use crate::history::HistoryBuilder;
use crate::info::InfoBuilder;

/// A source of per-symbol company data.
///
/// Implemented by [`YfClient`]; tests plug in in-memory doubles. Every method may fail
/// or return partially populated data, and callers treat every access as fallible.
pub trait MarketDataProvider: Send + Sync {
    /// Flat company metadata (`longName`, `beta`, `returnOnEquity`, ...).
    fn info<'a>(&'a self, symbol: &'a str) -> BoxFuture<'a, Result<FieldMap, YfError>>;

    /// Sustainability scores keyed by label. Empty when the company has no ESG coverage.
    fn sustainability<'a>(&'a self, symbol: &'a str) -> BoxFuture<'a, Result<FieldMap, YfError>>;

    /// Dated financial statement indexed by line-item label.
    fn financials<'a>(
        &'a self,
        symbol: &'a str,
    ) -> BoxFuture<'a, Result<FinancialStatement, YfError>>;

    /// Daily bars for the sessions in `[start, end)`, oldest first.
    fn history<'a>(
        &'a self,
        symbol: &'a str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BoxFuture<'a, Result<Vec<Candle>, YfError>>;
}

impl MarketDataProvider for YfClient {
    fn info<'a>(&'a self, symbol: &'a str) -> BoxFuture<'a, Result<FieldMap, YfError>> {
        Box::pin(InfoBuilder::new(self, symbol).fetch())
    }

    fn sustainability<'a>(&'a self, symbol: &'a str) -> BoxFuture<'a, Result<FieldMap, YfError>> {
        Box::pin(EsgBuilder::new(self, symbol).fetch())
    }

    fn financials<'a>(
        &'a self,
        symbol: &'a str,
    ) -> BoxFuture<'a, Result<FinancialStatement, YfError>> {
        Box::pin(FundamentalsBuilder::new(self, symbol).annual_financials())
    }

    fn history<'a>(
        &'a self,
        symbol: &'a str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BoxFuture<'a, Result<Vec<Candle>, YfError>> {
        Box::pin(
            HistoryBuilder::new(self, symbol)
                .between_dates(start, end)
                .fetch(),
        )
    }
}

/// Everything fetched for one ticker; lives for a single record build.
#[derive(Debug, Clone, Default)]
pub struct RawCompanyData {
    pub info: FieldMap,
    pub sustainability: FieldMap,
    /// `None` when the statement could not be fetched.
    pub financials: Option<FinancialStatement>,
    /// Daily bars of the snapshot window; `None` when the history could not be fetched.
    pub prices: Option<Vec<Candle>>,
}

impl RawCompanyData {
    /// Fetches all parts for `symbol`, one request after another.
    ///
    /// The info map and the sustainability table are required: their failure fails the whole
    /// fetch. Statement and price failures are logged and leave the part empty.
    ///
    /// # Errors
    ///
    /// Returns the provider error of the info or sustainability request.
    pub async fn fetch<P>(provider: &P, symbol: &str, target: NaiveDate) -> Result<Self, YfError>
    where
        P: MarketDataProvider + ?Sized,
    {
        let info = provider.info(symbol).await?;
        let sustainability = provider.sustainability(symbol).await?;
        let financials = log_err(provider.financials(symbol).await, "financials", symbol);

        let (start, end) = snapshot_window(target);
        let prices = log_err(provider.history(symbol, start, end).await, "history", symbol);

        Ok(Self {
            info,
            sustainability,
            financials,
            prices,
        })
    }
}

fn log_err<T>(res: Result<T, YfError>, name: &str, symbol: &str) -> Option<T> {
    match res {
        Ok(data) => Some(data),
        Err(e) => {
            tracing::debug!(symbol, part = name, error = %e, "optional fetch failed");
            None
        }
    }
}
