use super::Completeness;
use crate::record::FinancialRecord;

/// Callback for reporting batch progress.
pub trait Progress: Send + Sync {
    /// Called before a ticker is fetched. `index` is zero-based.
    fn on_start(&self, symbol: &str, index: usize, total: usize);

    /// Called once the record of a ticker is built.
    fn on_record(&self, record: &FinancialRecord, index: usize, total: usize);

    /// Called when the entire batch is done.
    fn on_batch_complete(&self, completeness: &Completeness);
}

/// Simple progress reporter that prints to stdout.
pub struct StdoutProgress;

impl Progress for StdoutProgress {
    fn on_start(&self, symbol: &str, index: usize, total: usize) {
        println!("[{}/{}] Processing {symbol}...", index + 1, total);
    }

    fn on_record(&self, record: &FinancialRecord, _index: usize, _total: usize) {
        for line in describe(record) {
            println!("  {line}");
        }
    }

    fn on_batch_complete(&self, completeness: &Completeness) {
        println!(
            "\nBatch complete: {}/{} succeeded, {} failed",
            completeness.succeeded, completeness.total, completeness.failed
        );
    }
}

/// Human-readable summary lines for one record.
pub fn describe(record: &FinancialRecord) -> Vec<String> {
    if !record.is_success() {
        return vec![format!("✗ {}", record.status)];
    }

    let name = record.company_name.as_deref().unwrap_or("N/A");
    let mut lines = vec![format!("✓ {name}")];

    if let Some(total) = record.total_esg_score {
        lines.push(format!(
            "ESG: {total} (E: {}, S: {}, G: {})",
            or_na(record.environmental_score),
            or_na(record.social_score),
            or_na(record.governance_score)
        ));
    }
    if let Some(price) = record.stock_price {
        let currency = record.currency.as_deref().unwrap_or("");
        lines.push(format!("Price: {price:.2} {currency}").trim_end().to_string());
    }
    if let Some(cap) = record.market_cap {
        lines.push(format!("Market cap: {}", thousands(cap)));
    }
    if record.roe_pct.is_some() || record.beta.is_some() {
        lines.push(format!(
            "ROE: {}%, Beta: {}",
            or_na(record.roe_pct),
            or_na(record.beta)
        ));
    }
    lines
}

fn or_na(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

/// Formats the integral part of `value` with `,` thousands separators.
pub fn thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0.0 {
        out.insert(0, '-');
    }
    out
}
