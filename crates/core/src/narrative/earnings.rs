use crate::narrative::{fixed1, sector_context, valuation_context};
use serde::{Deserialize, Serialize};

/// Surprise (in percent) beyond which a quarter counts as a beat or a miss.
const SURPRISE_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Beat,
    Miss,
    InLine,
}

impl Outcome {
    pub fn from_surprise(surprise_percent: f64) -> Self {
        if surprise_percent > SURPRISE_THRESHOLD {
            Self::Beat
        } else if surprise_percent < -SURPRISE_THRESHOLD {
            Self::Miss
        } else {
            Self::InLine
        }
    }
}

#[derive(Debug, Clone)]
pub struct EarningsFacts<'a> {
    pub symbol: &'a str,
    pub company_name: &'a str,
    pub sector: Option<&'a str>,
    pub reported_eps: Option<f64>,
    pub estimated_eps: Option<f64>,
    pub surprise_percent: f64,
    pub pe_ratio: Option<f64>,
    /// Provider's own P/E text, echoed as written (`"28.40"` stays `28.40`).
    pub pe_ratio_text: Option<&'a str>,
    pub profit_margin: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlainEnglish {
    pub what_happened: String,
    pub why_it_matters: String,
    pub sector_context: Option<String>,
    pub key_takeaway: String,
    pub investor_implication: String,
}

pub fn explain_earnings(facts: &EarningsFacts<'_>) -> PlainEnglish {
    let outcome = Outcome::from_surprise(facts.surprise_percent);
    let name = facts.company_name;
    let reported = usd(facts.reported_eps);
    let expected = usd(facts.estimated_eps);
    let magnitude = facts.surprise_percent.abs();

    let what_happened = match outcome {
        Outcome::Beat => format!(
            "{name} beat earnings expectations by {magnitude}%, reporting {reported} per share vs the expected {expected}."
        ),
        Outcome::Miss => format!(
            "{name} missed earnings expectations by {magnitude}%, reporting {reported} per share vs the expected {expected}."
        ),
        Outcome::InLine => format!(
            "{name} met earnings expectations, reporting {reported} per share, roughly in line with estimates of {expected}."
        ),
    };

    let why_it_matters = format!(
        "Earnings per share (EPS) tells you how much profit the company made for each share of stock. {}",
        match outcome {
            Outcome::Beat => "A beat usually means the business is performing better than expected.",
            Outcome::Miss => "A miss often signals operational challenges or market headwinds.",
            Outcome::InLine => "Meeting expectations suggests steady, predictable performance.",
        }
    );

    let sector_context = facts.sector.map(|sector| {
        format!(
            "As a {} company, {} is influenced by {}",
            sector.to_lowercase(),
            facts.symbol,
            sector_context(sector)
        )
    });

    let key_takeaway = match outcome {
        Outcome::Beat => "The earnings beat suggests strong business momentum and could lead to positive stock reaction.",
        Outcome::Miss => "The earnings miss may create near-term pressure on the stock price as investors reassess growth prospects.",
        Outcome::InLine => "In-line results typically generate modest market reaction, with focus shifting to forward guidance.",
    }
    .to_string();

    let pe = facts
        .pe_ratio_text
        .filter(|_| facts.pe_ratio.is_some())
        .unwrap_or("N/A");
    let margin = facts
        .profit_margin
        .map(|v| format!("{}%", fixed1(v * 100.0)))
        .unwrap_or_else(|| "N/A".to_string());
    let investor_implication = format!(
        "With a P/E ratio of {pe} and profit margin of {margin}, investors are {}",
        valuation_context(facts.pe_ratio, facts.profit_margin)
    );

    PlainEnglish {
        what_happened,
        why_it_matters,
        sector_context,
        key_takeaway,
        investor_implication,
    }
}

fn usd(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${v}"),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(surprise_percent: f64) -> EarningsFacts<'static> {
        EarningsFacts {
            symbol: "AAPL",
            company_name: "Apple Inc",
            sector: Some("TECHNOLOGY"),
            reported_eps: Some(1.64),
            estimated_eps: Some(1.5),
            surprise_percent,
            pe_ratio: Some(28.4),
            pe_ratio_text: Some("28.40"),
            profit_margin: Some(0.246),
        }
    }

    #[test]
    fn outcome_thresholds_are_exclusive() {
        assert_eq!(Outcome::from_surprise(5.0), Outcome::InLine);
        assert_eq!(Outcome::from_surprise(5.1), Outcome::Beat);
        assert_eq!(Outcome::from_surprise(-5.0), Outcome::InLine);
        assert_eq!(Outcome::from_surprise(-5.1), Outcome::Miss);
    }

    #[test]
    fn beat_sentences() {
        let out = explain_earnings(&facts(9.3));
        assert_eq!(
            out.what_happened,
            "Apple Inc beat earnings expectations by 9.3%, reporting $1.64 per share vs the expected $1.5."
        );
        assert!(out.why_it_matters.ends_with("performing better than expected."));
        assert!(out.key_takeaway.starts_with("The earnings beat"));
    }

    #[test]
    fn miss_uses_absolute_magnitude() {
        let out = explain_earnings(&facts(-12.0));
        assert_eq!(
            out.what_happened,
            "Apple Inc missed earnings expectations by 12%, reporting $1.64 per share vs the expected $1.5."
        );
        assert!(out.key_takeaway.starts_with("The earnings miss"));
    }

    #[test]
    fn in_line_sentence() {
        let out = explain_earnings(&facts(1.0));
        assert_eq!(
            out.what_happened,
            "Apple Inc met earnings expectations, reporting $1.64 per share, roughly in line with estimates of $1.5."
        );
        assert!(out.why_it_matters.ends_with("steady, predictable performance."));
    }

    #[test]
    fn sector_and_valuation_lines() {
        let out = explain_earnings(&facts(0.0));
        assert_eq!(
            out.sector_context.as_deref(),
            Some("As a technology company, AAPL is influenced by innovation cycles, competition, and growth expectations.")
        );
        assert_eq!(
            out.investor_implication,
            "With a P/E ratio of 28.40 and profit margin of 24.6%, investors are seeing fairly valued shares based on earnings multiples with strong profitability margins."
        );
    }

    #[test]
    fn missing_overview_fields() {
        let f = EarningsFacts {
            sector: None,
            pe_ratio: None,
            pe_ratio_text: Some("None"),
            profit_margin: None,
            reported_eps: None,
            ..facts(0.0)
        };
        let out = explain_earnings(&f);
        assert_eq!(out.sector_context, None);
        assert!(out.what_happened.contains("reporting N/A per share"));
        assert_eq!(
            out.investor_implication,
            "With a P/E ratio of N/A and profit margin of N/A, investors are evaluating the company based on other financial metrics."
        );
    }

    #[test]
    fn margin_half_tenth_rounds_up() {
        let f = EarningsFacts {
            profit_margin: Some(0.0125),
            ..facts(0.0)
        };
        let out = explain_earnings(&f);
        assert!(
            out.investor_implication.contains("profit margin of 1.3%,"),
            "{}",
            out.investor_implication
        );
    }
}
