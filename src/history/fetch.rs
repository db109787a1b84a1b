use super::wire::ChartEnvelope;
use crate::core::{Candle, YfClient, YfError, net};

#[tracing::instrument(skip(client), err)]
pub(super) async fn fetch_chart(
    client: &YfClient,
    symbol: &str,
    period1: i64,
    period2: i64,
) -> Result<Vec<Candle>, YfError> {
    if period1 >= period2 {
        return Err(YfError::InvalidDates);
    }

    let mut url = client.base_chart().join(symbol)?;
    url.query_pairs_mut()
        .append_pair("period1", &period1.to_string())
        .append_pair("period2", &period2.to_string())
        .append_pair("interval", "1d")
        .append_pair("includePrePost", "false");

    let resp = client.send_checked(client.http().get(url)).await?;
    let body = net::get_text(resp, "history_chart", symbol).await?;

    decode_chart(&body)
}

pub(crate) fn decode_chart(body: &str) -> Result<Vec<Candle>, YfError> {
    let parsed: ChartEnvelope = serde_json::from_str(body)
        .map_err(|e| YfError::Data(format!("json parse error: {e}")))?;

    let chart = parsed
        .chart
        .ok_or_else(|| YfError::Data("missing chart".into()))?;

    if let Some(err) = chart.error {
        return Err(YfError::Api(format!("{} - {}", err.code, err.description)));
    }

    let Some(r0) = chart.result.and_then(|mut v| v.pop()) else {
        return Ok(Vec::new());
    };

    let ts = r0.timestamp.unwrap_or_default();
    let Some(q) = r0.indicators.quote.into_iter().next() else {
        return Ok(Vec::new());
    };

    let mut candles: Vec<Candle> = ts
        .iter()
        .enumerate()
        .filter_map(|(i, &t)| {
            let open = q.open.get(i).copied().flatten()?;
            let high = q.high.get(i).copied().flatten()?;
            let low = q.low.get(i).copied().flatten()?;
            let close = q.close.get(i).copied().flatten()?;
            Some(Candle {
                ts: t,
                open,
                high,
                low,
                close,
                volume: q.volume.get(i).copied().flatten(),
            })
        })
        .collect();
    candles.sort_by_key(|c| c.ts);

    Ok(candles)
}
