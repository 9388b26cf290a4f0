use serde::Deserialize;

// Quote provider (chart endpoint).

#[derive(Debug, Clone, Deserialize)]
pub struct ChartEnvelope {
    pub chart: ChartBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartBody {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: ChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: String,
    #[serde(default)]
    pub regular_market_price: Option<f64>,
    #[serde(default)]
    pub previous_close: Option<f64>,
    #[serde(default)]
    pub chart_previous_close: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<QuoteSeries>,
}

/// Parallel per-day arrays; every entry may be null on halted days.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteSeries {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

// Earnings provider.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EarningsResponse {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, rename = "quarterlyEarnings")]
    pub quarterly_earnings: Option<Vec<QuarterlyEarning>>,
    #[serde(default, rename = "Note")]
    pub note: Option<String>,
    #[serde(default, rename = "Information")]
    pub information: Option<String>,
    #[serde(default, rename = "Error Message")]
    pub error_message: Option<String>,
}

impl EarningsResponse {
    /// The provider answers throttled or unknown-symbol calls with 200 and a
    /// message body instead of data.
    pub fn rate_limit_marker(&self) -> Option<&str> {
        self.note
            .as_deref()
            .or(self.information.as_deref())
            .or(self.error_message.as_deref())
    }

    pub fn quarters(&self) -> &[QuarterlyEarning] {
        self.quarterly_earnings.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuarterlyEarning {
    #[serde(rename = "fiscalDateEnding")]
    pub fiscal_date_ending: String,
    #[serde(default, rename = "reportedDate")]
    pub reported_date: Option<String>,
    #[serde(default, rename = "reportedEPS")]
    pub reported_eps: Option<String>,
    #[serde(default, rename = "estimatedEPS")]
    pub estimated_eps: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyOverview {
    #[serde(default, rename = "Name")]
    pub name: Option<String>,
    #[serde(default, rename = "Sector")]
    pub sector: Option<String>,
    #[serde(default, rename = "MarketCapitalization")]
    pub market_capitalization: Option<String>,
    #[serde(default, rename = "PERatio")]
    pub pe_ratio: Option<String>,
    #[serde(default, rename = "PEGRatio")]
    pub peg_ratio: Option<String>,
    #[serde(default, rename = "ProfitMargin")]
    pub profit_margin: Option<String>,
    #[serde(default, rename = "OperatingMarginTTM")]
    pub operating_margin_ttm: Option<String>,
}

impl CompanyOverview {
    pub fn name(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }

    pub fn sector(&self) -> Option<&str> {
        non_blank(self.sector.as_deref())
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Parses a provider numeric field. The provider writes `"None"` or `"-"` for
/// missing values, which come back as `None` here.
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
