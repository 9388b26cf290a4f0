use crate::ingest::types::{parse_number, CompanyOverview, EarningsResponse, QuarterlyEarning};
use crate::narrative::{explain_earnings, fixed1, EarningsFacts, PlainEnglish};
use serde::{Deserialize, Serialize};

const RECENT_QUARTERS: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsSummary {
    pub symbol: String,
    pub company_name: String,
    pub sector: String,
    pub latest_quarter: QuarterSnapshot,
    pub previous_quarter: Option<QuarterSnapshot>,
    pub financial_metrics: FinancialMetrics,
    pub plain_english: PlainEnglish,
    pub recent_earnings: Vec<RecentEarning>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterSnapshot {
    pub fiscal_date_ending: String,
    pub reported_date: Option<String>,
    #[serde(rename = "reportedEPS")]
    pub reported_eps: Option<f64>,
    #[serde(rename = "estimatedEPS")]
    pub estimated_eps: Option<f64>,
    pub surprise: f64,
    pub surprise_percent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialMetrics {
    pub market_cap: Option<String>,
    pub pe_ratio: Option<String>,
    pub peg_ratio: Option<String>,
    pub profit_margin: Option<String>,
    pub operating_margin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentEarning {
    pub quarter: String,
    #[serde(rename = "reportedEPS")]
    pub reported_eps: Option<f64>,
    #[serde(rename = "estimatedEPS")]
    pub estimated_eps: Option<f64>,
    pub surprise: f64,
}

impl QuarterSnapshot {
    pub fn from_quarter(q: &QuarterlyEarning) -> Self {
        let (reported_eps, estimated_eps) = eps_pair(q);
        let surprise = surprise_percent(reported_eps, estimated_eps);
        Self {
            fiscal_date_ending: q.fiscal_date_ending.clone(),
            reported_date: q.reported_date.clone(),
            reported_eps,
            estimated_eps,
            surprise,
            surprise_percent: format_surprise(surprise),
        }
    }
}

impl RecentEarning {
    pub fn from_quarter(q: &QuarterlyEarning) -> Self {
        let (reported_eps, estimated_eps) = eps_pair(q);
        Self {
            quarter: q.fiscal_date_ending.clone(),
            reported_eps,
            estimated_eps,
            surprise: surprise_percent(reported_eps, estimated_eps),
        }
    }
}

impl EarningsSummary {
    pub fn build(
        symbol: &str,
        earnings: &EarningsResponse,
        overview: &CompanyOverview,
    ) -> anyhow::Result<Self> {
        let quarters = earnings.quarters();
        let latest = quarters
            .first()
            .ok_or_else(|| anyhow::anyhow!("no quarterly earnings reported for {symbol}"))?;

        let latest_quarter = QuarterSnapshot::from_quarter(latest);
        let previous_quarter = quarters.get(1).map(QuarterSnapshot::from_quarter);

        let company_name = overview
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("{symbol} Inc."));

        let plain_english = explain_earnings(&EarningsFacts {
            symbol,
            company_name: &company_name,
            sector: overview.sector(),
            reported_eps: latest_quarter.reported_eps,
            estimated_eps: latest_quarter.estimated_eps,
            surprise_percent: latest_quarter.surprise,
            pe_ratio: parse_number(overview.pe_ratio.as_deref()),
            pe_ratio_text: overview.pe_ratio.as_deref().map(str::trim),
            profit_margin: parse_number(overview.profit_margin.as_deref()),
        });

        Ok(Self {
            symbol: symbol.to_string(),
            sector: overview.sector().unwrap_or("Unknown").to_string(),
            company_name,
            latest_quarter,
            previous_quarter,
            financial_metrics: FinancialMetrics {
                market_cap: overview.market_capitalization.clone(),
                pe_ratio: overview.pe_ratio.clone(),
                peg_ratio: overview.peg_ratio.clone(),
                profit_margin: overview.profit_margin.clone(),
                operating_margin: overview.operating_margin_ttm.clone(),
            },
            plain_english,
            recent_earnings: quarters
                .iter()
                .take(RECENT_QUARTERS)
                .map(RecentEarning::from_quarter)
                .collect(),
        })
    }
}

/// Reported and estimated EPS; a missing or zero estimate falls back to the
/// reported figure.
fn eps_pair(q: &QuarterlyEarning) -> (Option<f64>, Option<f64>) {
    let reported = parse_number(q.reported_eps.as_deref());
    let estimated = parse_number(q.estimated_eps.as_deref())
        .filter(|v| *v != 0.0)
        .or(reported);
    (reported, estimated)
}

/// `(reported - estimated) / estimated * 100`, one decimal. 0 when either
/// side is missing or the estimate is zero.
pub fn surprise_percent(reported: Option<f64>, estimated: Option<f64>) -> f64 {
    match (reported, estimated) {
        (Some(r), Some(e)) if e != 0.0 => round1((r - e) / e * 100.0),
        _ => 0.0,
    }
}

pub fn format_surprise(surprise: f64) -> String {
    let sign = if surprise > 0.0 { "+" } else { "" };
    format!("{sign}{}%", fixed1(surprise))
}

fn round1(v: f64) -> f64 {
    // `+ 0.0` folds -0.0 into 0.0 so it never prints as "-0.0".
    fixed1(v).parse::<f64>().unwrap_or(0.0) + 0.0
}
