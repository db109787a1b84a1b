mod api;
mod wire;

use crate::{YfClient, YfError, core::FinancialStatement};

/// Statement line items requested from the timeseries endpoint, with the label they are
/// stored under in the [`FinancialStatement`].
pub const LINE_ITEMS: [(&str, &str); 4] = [
    ("TotalRevenue", "Total Revenue"),
    ("NetIncome", "Net Income"),
    ("EBITDA", "EBITDA"),
    ("OperatingIncome", "Operating Income"),
];

/// How many fiscal years back the statement request reaches.
pub const YEARS: i64 = 5;

/// A builder for fetching the annual financial statement of a symbol.
pub struct FundamentalsBuilder<'a> {
    client: &'a YfClient,
    symbol: String,
}

impl<'a> FundamentalsBuilder<'a> {
    /// Creates a new `FundamentalsBuilder` covering the last five fiscal years.
    pub fn new(client: &'a YfClient, symbol: impl Into<String>) -> Self {
        Self {
            client,
            symbol: symbol.into(),
        }
    }

    /// Fetches the annual statement rows listed in [`LINE_ITEMS`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn annual_financials(self) -> Result<FinancialStatement, YfError> {
        api::annual_financials(self.client, &self.symbol, YEARS).await
    }
}
