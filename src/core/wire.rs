use serde::Deserialize;
use serde_json::Value;

/// Yahoo's `{ "raw": 1.23, "fmt": "1.23" }` number wrapper.
#[derive(Deserialize, Clone, Copy)]
pub struct RawNum<T> {
    pub(crate) raw: Option<T>,
}

pub fn from_raw<T>(raw: Option<RawNum<T>>) -> Option<T> {
    raw.and_then(|n| n.raw)
}

/// Collapses one quoteSummary value into a scalar.
///
/// `{ "raw": x, .. }` becomes `x`; strings, numbers and booleans pass through;
/// nulls, arrays and objects without `raw` (e.g. `{}` for a missing figure) are dropped.
pub fn flatten_value(v: &Value) -> Option<Value> {
    match v {
        Value::Null | Value::Array(_) => None,
        Value::Object(obj) => match obj.get("raw") {
            Some(Value::Null) | None => None,
            Some(raw @ (Value::Number(_) | Value::String(_) | Value::Bool(_))) => Some(raw.clone()),
            Some(_) => None,
        },
        scalar => Some(scalar.clone()),
    }
}
