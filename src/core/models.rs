use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/* ----- KEY/VALUE TABLES (shared by info/ and esg/) ----- */

/// A flat `label -> scalar` table, as Yahoo's info and sustainability payloads look once
/// their `{ raw, fmt }` wrappers are collapsed.
///
/// Every accessor is fallible: a missing label and a value of the wrong type both read as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap(Map<String, Value>);

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Inserts `value` only if `key` is not present yet.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.entry(key.into()).or_insert_with(|| value.into());
    }

    /// Numeric value under `key`. Strings, booleans and non-finite numbers are `None`.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.0
            .get(key)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
    }

    /// Text value under `key`. Numbers are not stringified.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/* ----- FINANCIAL STATEMENTS (fundamentals/) ----- */

/// One reported figure of a statement line item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodValue {
    pub period_end: NaiveDate,
    /// `None` when the period exists but Yahoo reported no figure for it.
    pub value: Option<f64>,
}

/// Dated financial statement, indexed by line-item label (e.g. `Total Revenue`).
///
/// Periods within a row are kept in the order they were inserted; consumers that need
/// chronology sort by `period_end` themselves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinancialStatement {
    rows: BTreeMap<String, Vec<PeriodValue>>,
}

impl FinancialStatement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, period_end: NaiveDate, value: Option<f64>) {
        self.rows
            .entry(label.into())
            .or_default()
            .push(PeriodValue { period_end, value });
    }

    pub fn row(&self, label: &str) -> Option<&[PeriodValue]> {
        self.rows.get(label).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.values().all(Vec::is_empty)
    }
}

/* ----- HISTORY (history/) ----- */

/// One daily bar. `ts` is the Unix timestamp Yahoo reports for the session.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub ts: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}
