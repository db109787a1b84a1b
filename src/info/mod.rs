//! Company metadata ("info"): quoteSummary modules merged into one flat [`FieldMap`].

mod api;

use crate::core::{FieldMap, YfClient, YfError};

/// quoteSummary modules that together make up the info map, in precedence order.
///
/// When two modules carry the same key (e.g. `beta`, `marketCap`, `currency`), the earlier
/// module wins.
pub const INFO_MODULES: [&str; 6] = [
    "assetProfile",
    "price",
    "summaryDetail",
    "defaultKeyStatistics",
    "financialData",
    "quoteType",
];

/// A builder for fetching the info map of a symbol.
pub struct InfoBuilder<'a> {
    client: &'a YfClient,
    symbol: String,
}

impl<'a> InfoBuilder<'a> {
    /// Creates a new `InfoBuilder` for a given symbol.
    pub fn new(client: &'a YfClient, symbol: impl Into<String>) -> Self {
        Self {
            client,
            symbol: symbol.into(),
        }
    }

    /// Fetches and flattens the info modules.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, on a Yahoo error envelope (e.g. unknown symbol), and when
    /// none of the modules carried a single usable value.
    pub async fn fetch(self) -> Result<FieldMap, YfError> {
        api::fetch_info(self.client, &self.symbol).await
    }
}
