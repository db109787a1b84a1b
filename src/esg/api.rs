use serde_json::Value;

use crate::core::{FieldMap, YfClient, YfError, quotesummary, wire::flatten_value};

#[tracing::instrument(skip(client), err)]
pub(super) async fn fetch_sustainability(
    client: &YfClient,
    symbol: &str,
) -> Result<FieldMap, YfError> {
    let root = match quotesummary::fetch_result_value(client, symbol, "esgScores", "esg").await {
        Ok(root) => root,
        Err(YfError::Api(desc) | YfError::MissingData(desc)) => {
            tracing::debug!(symbol, reason = %desc, "no sustainability data");
            return Ok(FieldMap::new());
        }
        Err(e) => return Err(e),
    };

    Ok(esg_table(&root))
}

fn esg_table(root: &Value) -> FieldMap {
    let Some(Value::Object(scores)) = root.get("esgScores") else {
        return FieldMap::new();
    };
    scores
        .iter()
        .filter_map(|(k, v)| flatten_value(v).map(|v| (k.clone(), v)))
        .collect()
}
