use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::LINE_ITEMS;
use super::wire::{TimeseriesEnvelope, TimeseriesPoint};
use crate::core::{FinancialStatement, YfClient, YfError, net, wire::from_raw};

const PREFIX: &str = "annual";

#[tracing::instrument(skip(client), err)]
pub(super) async fn annual_financials(
    client: &YfClient,
    symbol: &str,
    years: i64,
) -> Result<FinancialStatement, YfError> {
    let types: Vec<String> = LINE_ITEMS
        .iter()
        .map(|(key, _)| format!("{PREFIX}{key}"))
        .collect();

    let now = Utc::now();
    let end_ts = now.timestamp();
    let start_ts = now
        .checked_sub_signed(Duration::days(365 * years))
        .map_or(0, |dt| dt.timestamp());

    let mut url = client.base_timeseries().join(symbol)?;
    url.query_pairs_mut()
        .append_pair("symbol", symbol)
        .append_pair("type", &types.join(","))
        .append_pair("period1", &start_ts.to_string())
        .append_pair("period2", &end_ts.to_string());

    client.ensure_credentials().await?;
    if let Some(crumb) = client.crumb().await {
        url.query_pairs_mut().append_pair("crumb", &crumb);
    }

    let resp = client.send_checked(client.http().get(url)).await?;
    let body = net::get_text(resp, "timeseries_financials", symbol).await?;

    decode_statement(&body)
}

/// Decodes a timeseries body into statement rows.
///
/// The period end comes from `asOfDate` when present, falling back to the parallel
/// `timestamp` array. Null points still count as a period with no figure.
pub(crate) fn decode_statement(body: &str) -> Result<FinancialStatement, YfError> {
    let envelope: TimeseriesEnvelope = serde_json::from_str(body)?;

    let mut statement = FinancialStatement::new();
    let items = envelope
        .timeseries
        .and_then(|ts| ts.result)
        .unwrap_or_default();

    for item in items {
        let timestamps = item.timestamp.unwrap_or_default();
        for (key, label) in LINE_ITEMS {
            let Some(values_json) = item.values.get(&format!("{PREFIX}{key}")) else {
                continue;
            };
            let points: Vec<Option<TimeseriesPoint>> =
                serde_json::from_value(values_json.clone()).map_err(|e| {
                    YfError::Data(format!("timeseries {PREFIX}{key} points: {e}"))
                })?;

            for (i, point) in points.into_iter().enumerate() {
                let as_of = point
                    .as_ref()
                    .and_then(|p| p.as_of_date.as_deref())
                    .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
                let Some(period_end) = as_of.or_else(|| {
                    timestamps
                        .get(i)
                        .and_then(|ts| DateTime::from_timestamp(*ts, 0))
                        .map(|dt| dt.date_naive())
                }) else {
                    continue;
                };
                let value = point
                    .and_then(|p| from_raw(p.reported_value))
                    .filter(|v| v.is_finite());
                statement.push(label, period_end, value);
            }
        }
    }

    Ok(statement)
}
