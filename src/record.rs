//! The normalized per-company record and the builder that always produces one.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Display;

use crate::esg::labels;
use crate::extract;
use crate::provider::{MarketDataProvider, RawCompanyData};

/// Status of a record whose fetch went through.
pub const STATUS_SUCCESS: &str = "Success";
/// Prefix of the status of a record whose fetch failed.
pub const STATUS_ERROR_PREFIX: &str = "Error: ";

/// Column names of [`FinancialRecord`], in CSV order.
pub const FIELD_NAMES: [&str; 34] = [
    "Ticker",
    "Company_Name",
    "Currency",
    "Data_Date",
    "Industry",
    "Sector",
    "Country",
    "Total_ESG_Score",
    "Environmental_Score",
    "Social_Score",
    "Governance_Score",
    "ESG_Performance",
    "Highest_Controversy",
    "Stock_Price",
    "Current_Price",
    "Market_Cap",
    "PE_Ratio",
    "PB_Ratio",
    "Annual_Return_Pct",
    "Revenue",
    "Net_Income",
    "Operating_Margin_Pct",
    "Gross_Margin_Pct",
    "ROE_Pct",
    "ROA_Pct",
    "Profit_Margin_Pct",
    "EBITDA_Margin_Pct",
    "EPS",
    "Beta",
    "Debt_to_Equity",
    "Current_Ratio",
    "Operating_Cash_Flow",
    "Revenue_Growth_Pct",
    "Status",
];

/// One row of the snapshot.
///
/// Every column always exists; a missing figure is `None` and serializes as an empty cell.
/// Identity columns read `"N/A"` on a successful fetch that lacked them, and are `None` on an
/// error record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialRecord {
    /* identity */
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Company_Name")]
    pub company_name: Option<String>,
    #[serde(rename = "Currency")]
    pub currency: Option<String>,
    #[serde(rename = "Data_Date")]
    pub data_date: String,
    #[serde(rename = "Industry")]
    pub industry: Option<String>,
    #[serde(rename = "Sector")]
    pub sector: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,

    /* ESG */
    #[serde(rename = "Total_ESG_Score")]
    pub total_esg_score: Option<f64>,
    #[serde(rename = "Environmental_Score")]
    pub environmental_score: Option<f64>,
    #[serde(rename = "Social_Score")]
    pub social_score: Option<f64>,
    #[serde(rename = "Governance_Score")]
    pub governance_score: Option<f64>,
    #[serde(rename = "ESG_Performance")]
    pub esg_performance: Option<String>,
    #[serde(rename = "Highest_Controversy")]
    pub highest_controversy: Option<f64>,

    /* price */
    #[serde(rename = "Stock_Price")]
    pub stock_price: Option<f64>,
    #[serde(rename = "Current_Price")]
    pub current_price: Option<f64>,

    /* valuation & size */
    #[serde(rename = "Market_Cap")]
    pub market_cap: Option<f64>,
    #[serde(rename = "PE_Ratio")]
    pub pe_ratio: Option<f64>,
    #[serde(rename = "PB_Ratio")]
    pub pb_ratio: Option<f64>,
    #[serde(rename = "Annual_Return_Pct")]
    pub annual_return_pct: Option<f64>,

    /* profitability */
    #[serde(rename = "Revenue")]
    pub revenue: Option<f64>,
    #[serde(rename = "Net_Income")]
    pub net_income: Option<f64>,
    #[serde(rename = "Operating_Margin_Pct")]
    pub operating_margin_pct: Option<f64>,
    #[serde(rename = "Gross_Margin_Pct")]
    pub gross_margin_pct: Option<f64>,
    #[serde(rename = "ROE_Pct")]
    pub roe_pct: Option<f64>,
    #[serde(rename = "ROA_Pct")]
    pub roa_pct: Option<f64>,
    #[serde(rename = "Profit_Margin_Pct")]
    pub profit_margin_pct: Option<f64>,
    #[serde(rename = "EBITDA_Margin_Pct")]
    pub ebitda_margin_pct: Option<f64>,
    #[serde(rename = "EPS")]
    pub eps: Option<f64>,

    /* risk & stability */
    #[serde(rename = "Beta")]
    pub beta: Option<f64>,
    #[serde(rename = "Debt_to_Equity")]
    pub debt_to_equity: Option<f64>,
    #[serde(rename = "Current_Ratio")]
    pub current_ratio: Option<f64>,
    #[serde(rename = "Operating_Cash_Flow")]
    pub operating_cash_flow: Option<f64>,

    /* growth */
    #[serde(rename = "Revenue_Growth_Pct")]
    pub revenue_growth_pct: Option<f64>,

    #[serde(rename = "Status")]
    pub status: String,
}

impl FinancialRecord {
    /// Normalizes fetched data into a successful record.
    pub fn from_raw(symbol: &str, target: NaiveDate, raw: &RawCompanyData) -> Self {
        let info = &raw.info;
        let esg = &raw.sustainability;

        Self {
            ticker: symbol.to_string(),
            company_name: Some(extract::text_or_na(info, "longName")),
            currency: Some(extract::text_or_na(info, "currency")),
            data_date: data_date(target),
            industry: Some(extract::text_or_na(info, "industry")),
            sector: Some(extract::text_or_na(info, "sector")),
            country: Some(extract::text_or_na(info, "country")),

            total_esg_score: esg.number(labels::TOTAL_ESG),
            environmental_score: esg.number(labels::ENVIRONMENT_SCORE),
            social_score: esg.number(labels::SOCIAL_SCORE),
            governance_score: esg.number(labels::GOVERNANCE_SCORE),
            esg_performance: esg.text(labels::ESG_PERFORMANCE).map(str::to_string),
            highest_controversy: esg.number(labels::HIGHEST_CONTROVERSY),

            stock_price: extract::stock_price_at(raw.prices.as_deref()),
            current_price: extract::current_price(info),

            market_cap: info.number("marketCap"),
            pe_ratio: extract::round_truthy(info.number("trailingPE"), 2),
            pb_ratio: extract::round_truthy(info.number("priceToBook"), 2),
            annual_return_pct: extract::percent(info.number("52WeekChange")),

            revenue: info.number("totalRevenue"),
            net_income: info.number("netIncomeToCommon"),
            operating_margin_pct: extract::percent(info.number("operatingMargins")),
            gross_margin_pct: extract::percent(info.number("grossMargins")),
            roe_pct: extract::percent(info.number("returnOnEquity")),
            roa_pct: extract::percent(info.number("returnOnAssets")),
            profit_margin_pct: extract::percent(info.number("profitMargins")),
            ebitda_margin_pct: extract::ebitda_margin(info),
            eps: extract::round_truthy(info.number("trailingEps"), 2),

            beta: extract::beta(info),
            debt_to_equity: extract::round_truthy(info.number("debtToEquity"), 2),
            current_ratio: extract::round_truthy(info.number("currentRatio"), 2),
            operating_cash_flow: info.number("operatingCashflow"),

            revenue_growth_pct: extract::revenue_growth(raw.financials.as_ref()),

            status: STATUS_SUCCESS.to_string(),
        }
    }

    /// A record for a ticker whose fetch failed: only `Ticker`, `Data_Date` and `Status` are set.
    pub fn error(symbol: &str, target: NaiveDate, reason: impl Display) -> Self {
        Self {
            ticker: symbol.to_string(),
            company_name: None,
            currency: None,
            data_date: data_date(target),
            industry: None,
            sector: None,
            country: None,
            total_esg_score: None,
            environmental_score: None,
            social_score: None,
            governance_score: None,
            esg_performance: None,
            highest_controversy: None,
            stock_price: None,
            current_price: None,
            market_cap: None,
            pe_ratio: None,
            pb_ratio: None,
            annual_return_pct: None,
            revenue: None,
            net_income: None,
            operating_margin_pct: None,
            gross_margin_pct: None,
            roe_pct: None,
            roa_pct: None,
            profit_margin_pct: None,
            ebitda_margin_pct: None,
            eps: None,
            beta: None,
            debt_to_equity: None,
            current_ratio: None,
            operating_cash_flow: None,
            revenue_growth_pct: None,
            status: format!("{STATUS_ERROR_PREFIX}{reason}"),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

fn data_date(target: NaiveDate) -> String {
    target.format("%Y-%m-%d").to_string()
}

/// Builds the record for `symbol`. Never fails: a failed fetch yields [`FinancialRecord::error`].
#[tracing::instrument(skip(provider, target), fields(target = %target))]
pub async fn build_record<P>(provider: &P, symbol: &str, target: NaiveDate) -> FinancialRecord
where
    P: MarketDataProvider + ?Sized,
{
    match RawCompanyData::fetch(provider, symbol, target).await {
        Ok(raw) => FinancialRecord::from_raw(symbol, target, &raw),
        Err(e) => {
            tracing::warn!(symbol, error = %e, "fetch failed; emitting error record");
            FinancialRecord::error(symbol, target, e)
        }
    }
}
