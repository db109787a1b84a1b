/// Read the response body as text, tracing its size against the endpoint it came from.
pub(crate) async fn get_text(
    resp: reqwest::Response,
    endpoint: &str,
    symbol: &str,
) -> Result<String, reqwest::Error> {
    let text = resp.text().await?;
    tracing::trace!(endpoint, symbol, bytes = text.len(), "response body received");
    Ok(text)
}
