use crate::core::client::redact_crumb;
use crate::core::{YfClient, YfError, net};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct V10Envelope {
    #[serde(rename = "quoteSummary")]
    pub(crate) quote_summary: Option<V10QuoteSummary>,
}

#[derive(Deserialize)]
pub struct V10QuoteSummary {
    pub(crate) result: Option<Vec<serde_json::Value>>,
    pub(crate) error: Option<V10Error>,
}

#[derive(Deserialize)]
pub struct V10Error {
    pub(crate) description: String,
}

/// Fetches the quoteSummary envelope for `modules`, refreshing the crumb once if Yahoo rejects it.
///
/// Yahoo reports unknown symbols with a non-2xx status *and* an error object in the body, so the
/// body is parsed first and the status only decides when no error object is present.
pub async fn fetch(
    client: &YfClient,
    symbol: &str,
    modules: &str,
    caller: &str,
) -> Result<V10Envelope, YfError> {
    async fn attempt_fetch(
        client: &YfClient,
        symbol: &str,
        modules: &str,
        caller: &str,
    ) -> Result<(V10Envelope, reqwest::StatusCode, String), YfError> {
        client.ensure_credentials().await?;

        let crumb = client
            .crumb()
            .await
            .ok_or_else(|| YfError::Auth("Crumb is not set".into()))?;

        let mut url = client.base_quote_api().join(symbol)?;
        {
            let mut qp = url.query_pairs_mut();
            qp.append_pair("modules", modules);
            qp.append_pair("crumb", &crumb);
        }

        let resp = client.http().get(url.clone()).send().await?;
        let status = resp.status();
        let text = net::get_text(resp, &format!("{caller}_quotesummary"), symbol).await?;

        match serde_json::from_str::<V10Envelope>(&text) {
            Ok(env) => Ok((env, status, redact_crumb(&url))),
            Err(_) if !status.is_success() => Err(YfError::Status {
                status: status.as_u16(),
                url: redact_crumb(&url),
            }),
            Err(e) => Err(YfError::Data(format!("quoteSummary json parse: {e}"))),
        }
    }

    for attempt in 0..=1 {
        let (env, status, url) = attempt_fetch(client, symbol, modules, caller).await?;

        if let Some(error) = env.quote_summary.as_ref().and_then(|qs| qs.error.as_ref()) {
            let desc = error.description.to_ascii_lowercase();
            if desc.contains("invalid crumb") && attempt == 0 {
                tracing::debug!(caller, symbol, "invalid crumb; refreshing and retrying");
                client.clear_crumb().await;
                continue;
            }
            return Err(YfError::Api(error.description.clone()));
        }

        if !status.is_success() {
            return Err(YfError::Status {
                status: status.as_u16(),
                url,
            });
        }

        return Ok(env);
    }

    Err(YfError::Auth(format!("{caller} API call failed after crumb refresh")))
}

/// Fetches `modules` and returns the single result object, still untyped.
pub async fn fetch_result_value(
    client: &YfClient,
    symbol: &str,
    modules: &str,
    caller: &str,
) -> Result<serde_json::Value, YfError> {
    let env = fetch(client, symbol, modules, caller).await?;

    env.quote_summary
        .and_then(|qs| qs.result)
        .and_then(|mut v| v.pop())
        .ok_or_else(|| YfError::MissingData(format!("empty quoteSummary result for {symbol}")))
}
