use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use super::Completeness;
use crate::record::FinancialRecord;

#[derive(Tabled)]
struct PreviewRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Company_Name")]
    company_name: String,
    #[tabled(rename = "Total_ESG_Score")]
    total_esg_score: String,
    #[tabled(rename = "Stock_Price")]
    stock_price: String,
    #[tabled(rename = "Market_Cap")]
    market_cap: String,
    #[tabled(rename = "ROE_Pct")]
    roe_pct: String,
    #[tabled(rename = "Beta")]
    beta: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&FinancialRecord> for PreviewRow {
    fn from(r: &FinancialRecord) -> Self {
        Self {
            ticker: r.ticker.clone(),
            company_name: r.company_name.clone().unwrap_or_default(),
            total_esg_score: cell(r.total_esg_score),
            stock_price: cell(r.stock_price),
            market_cap: cell(r.market_cap),
            roe_pct: cell(r.roe_pct),
            beta: cell(r.beta),
            status: r.status.clone(),
        }
    }
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Renders the first `rows` records as a table.
pub fn preview_table(records: &[FinancialRecord], rows: usize) -> String {
    let rows: Vec<PreviewRow> = records.iter().take(rows).map(PreviewRow::from).collect();
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string()
}

/// Per-field coverage lines, e.g. `ESG scores: 3/4 (75.0%)`.
pub fn completeness_lines(c: &Completeness) -> Vec<String> {
    [
        ("ESG scores", c.with_esg),
        ("Stock prices", c.with_price),
        ("ROE", c.with_roe),
        ("Beta", c.with_beta),
    ]
    .into_iter()
    .map(|(label, count)| {
        format!(
            "{label}: {count}/{} ({:.1}%)",
            c.total,
            c.ratio(count) * 100.0
        )
    })
    .collect()
}
