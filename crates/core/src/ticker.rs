use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const FALLBACK_TICKER: &str = "AAPL";

fn ticker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // ASCII word boundaries: accented letters do not count as word characters.
    PATTERN.get_or_init(|| {
        Regex::new(r"(?-u:\b)[A-Z]{1,5}(?-u:\b)").expect("static ticker regex")
    })
}

/// First standalone run of one to five upper-case letters in `text`.
pub fn extract_ticker(text: &str) -> String {
    ticker_pattern()
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| FALLBACK_TICKER.to_string())
}

/// Trims and upper-cases a user supplied symbol. `None` when nothing is left.
pub fn normalize_symbol(raw: &str) -> Option<String> {
    let symbol = raw.trim().to_ascii_uppercase();
    if symbol.is_empty() {
        None
    } else {
        Some(symbol)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMatch {
    pub symbol: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

pub fn search_stock(query: &str) -> Vec<StockMatch> {
    let symbol = extract_ticker(query);
    vec![StockMatch {
        name: format!("{symbol} Inc."),
        symbol,
        kind: "EQUITY".to_string(),
    }]
}
