use serde_json::Value;

use super::INFO_MODULES;
use crate::core::{FieldMap, YfClient, YfError, quotesummary, wire::flatten_value};

#[tracing::instrument(skip(client), err)]
pub(super) async fn fetch_info(client: &YfClient, symbol: &str) -> Result<FieldMap, YfError> {
    let modules = INFO_MODULES.join(",");
    let root = quotesummary::fetch_result_value(client, symbol, &modules, "info").await?;

    let info = flatten_modules(&root, &INFO_MODULES);
    if info.is_empty() {
        return Err(YfError::MissingData(format!(
            "no info modules returned for {symbol}"
        )));
    }
    Ok(info)
}

/// Merges the named module objects of a quoteSummary result into one flat map.
pub(crate) fn flatten_modules(root: &Value, order: &[&str]) -> FieldMap {
    let mut out = FieldMap::new();
    for module in order {
        let Some(Value::Object(fields)) = root.get(*module) else {
            continue;
        };
        for (key, value) in fields {
            if let Some(v) = flatten_value(value) {
                out.insert_if_absent(key.clone(), v);
            }
        }
    }
    out
}
