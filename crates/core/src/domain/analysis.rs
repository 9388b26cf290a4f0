use crate::ticker::extract_ticker;
use rand::Rng;
use serde::{Deserialize, Serialize};

const SECTOR_POOL: [&str; 3] = ["Technology", "Healthcare", "Financial Services"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketImpact {
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "Short-term")]
    ShortTerm,
    #[serde(rename = "Medium-term")]
    MediumTerm,
    #[serde(rename = "Long-term")]
    LongTerm,
}

/// Placeholder analysis of a news event. Every figure is drawn at random; the
/// only input actually read is the ticker found in the text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub event: String,
    pub symbol: String,
    pub source: Option<String>,
    pub sentiment: Sentiment,
    /// Percent, 60..100.
    pub confidence: f64,
    pub market_impact: MarketImpact,
    pub affected_sectors: Vec<String>,
    pub timeframe: Timeframe,
    /// Percent, 5..25.
    pub volatility_prediction: f64,
}

pub fn mock_analysis<R: Rng + ?Sized>(
    rng: &mut R,
    event: &str,
    source: Option<&str>,
) -> anyhow::Result<AnalysisResult> {
    let event = event.trim();
    anyhow::ensure!(!event.is_empty(), "event text must be non-empty");

    let sentiment = if rng.gen::<f64>() > 0.5 {
        Sentiment::Positive
    } else {
        Sentiment::Negative
    };
    let confidence = round1(rng.gen::<f64>() * 40.0 + 60.0);
    let market_impact = if rng.gen::<f64>() > 0.3 {
        MarketImpact::Moderate
    } else {
        MarketImpact::High
    };
    let sector_count = rng.gen_range(1..=SECTOR_POOL.len());
    let timeframe = match rng.gen_range(0..3) {
        0 => Timeframe::ShortTerm,
        1 => Timeframe::MediumTerm,
        _ => Timeframe::LongTerm,
    };
    let volatility_prediction = round1(rng.gen::<f64>() * 20.0 + 5.0);

    Ok(AnalysisResult {
        event: event.to_string(),
        symbol: extract_ticker(event),
        source: source
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        sentiment,
        confidence,
        market_impact,
        affected_sectors: SECTOR_POOL[..sector_count]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        timeframe,
        volatility_prediction,
    })
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
