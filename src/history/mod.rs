//! Daily price history via the chart v8 endpoint.

mod fetch;
mod wire;

use chrono::{DateTime, NaiveDate, Utc};

use crate::core::{Candle, YfClient, YfError};

/// A builder for fetching daily bars of a symbol over an absolute period.
pub struct HistoryBuilder<'a> {
    client: &'a YfClient,
    symbol: String,
    period: Option<(i64, i64)>,
}

impl<'a> HistoryBuilder<'a> {
    pub fn new(client: &'a YfClient, symbol: impl Into<String>) -> Self {
        Self {
            client,
            symbol: symbol.into(),
            period: None,
        }
    }

    /// Restricts the request to `[start, end)`.
    #[must_use]
    pub fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.period = Some((start.timestamp(), end.timestamp()));
        self
    }

    /// Restricts the request to the sessions from `start` (inclusive) to `end` (exclusive),
    /// both taken at midnight UTC.
    #[must_use]
    pub fn between_dates(self, start: NaiveDate, end: NaiveDate) -> Self {
        self.between(
            start.and_time(chrono::NaiveTime::MIN).and_utc(),
            end.and_time(chrono::NaiveTime::MIN).and_utc(),
        )
    }

    /// Fetches the bars, oldest first. Bars with a missing open/high/low/close are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`YfError::InvalidDates`] when no period was set or it is empty, and an
    /// error if the request fails or the response cannot be parsed.
    pub async fn fetch(self) -> Result<Vec<Candle>, YfError> {
        let (p1, p2) = self.period.ok_or(YfError::InvalidDates)?;
        fetch::fetch_chart(self.client, &self.symbol, p1, p2).await
    }
}
