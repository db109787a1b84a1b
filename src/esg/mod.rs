mod api;

use crate::{YfClient, YfError, core::FieldMap};

/// Row labels of the sustainability table that the snapshot reads.
pub mod labels {
    pub const TOTAL_ESG: &str = "totalEsg";
    pub const ENVIRONMENT_SCORE: &str = "environmentScore";
    pub const SOCIAL_SCORE: &str = "socialScore";
    pub const GOVERNANCE_SCORE: &str = "governanceScore";
    pub const ESG_PERFORMANCE: &str = "esgPerformance";
    pub const HIGHEST_CONTROVERSY: &str = "highestControversy";
}

/// A builder for fetching the sustainability (ESG) table of a specific symbol.
pub struct EsgBuilder<'a> {
    client: &'a YfClient,
    symbol: String,
}

impl<'a> EsgBuilder<'a> {
    /// Creates a new `EsgBuilder` for a given symbol.
    pub fn new(client: &'a YfClient, symbol: impl Into<String>) -> Self {
        Self {
            client,
            symbol: symbol.into(),
        }
    }

    /// Fetches the sustainability table, keyed by score label (`totalEsg`, `socialScore`, ...).
    ///
    /// Many listings carry no ESG coverage at all. When Yahoo answers that it has no data
    /// (missing `esgScores` module, or an error object in the envelope) the table is empty
    /// rather than an error.
    ///
    /// # Errors
    ///
    /// Transport failures and unparseable responses are returned as errors.
    pub async fn fetch(self) -> Result<FieldMap, YfError> {
        api::fetch_sustainability(self.client, &self.symbol).await
    }
}
