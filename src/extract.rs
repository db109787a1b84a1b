//! Field extraction: one metric at a time, never failing.
//!
//! Every function here returns `None` instead of an error. Missing keys, wrong types, empty
//! series, division by zero and non-finite intermediate results all read as "no value".
//!
//! Several passthroughs treat a numeric `0` as absent, the way the historical exports did
//! (`beta`, `ebitda`, `totalRevenue`, `currentPrice`, and the rounding passthroughs). The
//! percentage conversion is the exception: a `0` fraction is kept as `0` rather than dropped.

use chrono::{Datelike, Duration, NaiveDate};

use crate::core::{Candle, FieldMap, FinancialStatement, PeriodValue};

/// Statement row the revenue growth is computed from.
pub const TOTAL_REVENUE: &str = "Total Revenue";

/// Trading days per year used to annualize daily volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Rounds half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Drops zero (and non-finite) values, mirroring a truthiness check on the raw figure.
pub fn truthy(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && v.is_finite())
}

/// Converts a provider fraction to a percentage with 2 decimals.
///
/// Only a truthy value is converted: `Some(0.0)` stays `Some(0.0)` and `None` stays `None`.
pub fn percent(fraction: Option<f64>) -> Option<f64> {
    match fraction {
        Some(f) if f != 0.0 => finite(round_to(f * 100.0, 2)),
        other => other,
    }
}

/// Rounds a truthy value to `places` decimals; zero and `None` pass through unchanged.
pub fn round_truthy(value: Option<f64>, places: i32) -> Option<f64> {
    match value {
        Some(v) if v != 0.0 => finite(round_to(v, places)),
        other => other,
    }
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

/// Year-over-year growth of the `Total Revenue` row, in percent with 2 decimals.
pub fn revenue_growth(financials: Option<&FinancialStatement>) -> Option<f64> {
    revenue_growth_from(financials?.row(TOTAL_REVENUE)?)
}

/// `(latest - previous) / |previous| * 100` over the last two periods by period end.
///
/// `None` with fewer than two periods, when either figure is missing, or when the previous
/// figure is zero.
pub fn revenue_growth_from(series: &[PeriodValue]) -> Option<f64> {
    if series.len() < 2 {
        return None;
    }
    let mut sorted = series.to_vec();
    sorted.sort_by_key(|p| p.period_end);

    let latest = sorted[sorted.len() - 1].value?;
    let previous = sorted[sorted.len() - 2].value?;
    if previous == 0.0 {
        return None;
    }
    finite(round_to((latest - previous) / previous.abs() * 100.0, 2))
}

/// `ebitda / totalRevenue * 100` with 2 decimals; both figures must be present and non-zero.
pub fn ebitda_margin(info: &FieldMap) -> Option<f64> {
    let ebitda = truthy(info.number("ebitda"))?;
    let revenue = truthy(info.number("totalRevenue"))?;
    finite(round_to(ebitda / revenue * 100.0, 2))
}

/// Session window the snapshot price is read from: `[target - 11 days, target + 10 days)`.
///
/// For a target of 2024-12-31 that is 2024-12-20 up to (excluding) 2025-01-10.
pub fn snapshot_window(target: NaiveDate) -> (NaiveDate, NaiveDate) {
    (target - Duration::days(11), target + Duration::days(10))
}

/// Close of the last session in the window, with 2 decimals.
pub fn stock_price_at(prices: Option<&[Candle]>) -> Option<f64> {
    let last = prices?.iter().max_by_key(|c| c.ts)?;
    finite(round_to(last.close, 2))
}

/// Market beta with 3 decimals; zero reads as absent.
pub fn beta(info: &FieldMap) -> Option<f64> {
    truthy(info.number("beta")).map(|b| round_to(b, 3))
}

/// `currentPrice` if truthy, otherwise `regularMarketPrice` as is.
pub fn current_price(info: &FieldMap) -> Option<f64> {
    truthy(info.number("currentPrice")).or_else(|| info.number("regularMarketPrice"))
}

/// Identity text under `key`, or the literal `"N/A"`.
pub fn text_or_na(info: &FieldMap, key: &str) -> String {
    info.text(key).unwrap_or("N/A").to_string()
}

/// Window the annualized volatility is measured over: January 1st of the target's year up to
/// (excluding) the target date.
pub fn volatility_window(target: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(target.year(), 1, 1).unwrap_or(target);
    (start, target)
}

/// Sample standard deviation of daily simple returns, scaled by `sqrt(252)`, with 2 decimals.
///
/// `closes` are consecutive daily closes, oldest first. `None` when fewer than two returns
/// can be formed or a return is not finite.
pub fn annualized_volatility(closes: &[f64]) -> Option<f64> {
    let returns: Vec<f64> = closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect();
    if returns.len() < 2 || returns.iter().any(|r| !r.is_finite()) {
        return None;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    finite(round_to(variance.sqrt() * TRADING_DAYS_PER_YEAR.sqrt(), 2))
}
