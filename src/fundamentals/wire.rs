use serde::Deserialize;
use std::collections::HashMap;

use crate::core::wire::RawNum;

/* ---------------- Serde mapping for /ws/fundamentals-timeseries ---------------- */

#[derive(Deserialize)]
pub(crate) struct TimeseriesEnvelope {
    pub(crate) timeseries: Option<TimeseriesResult>,
}

#[derive(Deserialize)]
pub(crate) struct TimeseriesResult {
    pub(crate) result: Option<Vec<TimeseriesData>>,
}

/// One requested type. The payload sits under a key named after the type itself
/// (e.g. `"annualTotalRevenue": [...]`), hence the flattened map.
#[derive(Deserialize)]
pub(crate) struct TimeseriesData {
    #[serde(default)]
    pub(crate) timestamp: Option<Vec<i64>>,
    #[serde(flatten)]
    pub(crate) values: HashMap<String, serde_json::Value>,
}

#[derive(Deserialize)]
pub(crate) struct TimeseriesPoint {
    #[serde(rename = "asOfDate")]
    pub(crate) as_of_date: Option<String>,
    #[serde(rename = "reportedValue")]
    pub(crate) reported_value: Option<RawNum<f64>>,
}
