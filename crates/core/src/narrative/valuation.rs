const CHEAP_PE: f64 = 15.0;
const RICH_PE: f64 = 30.0;
const THIN_MARGIN: f64 = 0.05;
const STRONG_MARGIN: f64 = 0.15;

/// Describes how investors are likely reading the stock from its P/E ratio
/// and profit margin. `profit_margin` is a fraction (0.16 = 16%).
///
/// Zero counts as missing. Boundary values (P/E 15 and 30, margin 5% and
/// 15%) land in the middle bucket.
pub fn valuation_context(pe_ratio: Option<f64>, profit_margin: Option<f64>) -> String {
    let pe = pe_ratio.filter(|v| *v != 0.0 && v.is_finite());
    let margin = profit_margin.filter(|v| *v != 0.0 && v.is_finite());

    if pe.is_none() && margin.is_none() {
        return "evaluating the company based on other financial metrics.".to_string();
    }

    let mut context = String::new();
    if let Some(pe) = pe {
        context.push_str(if pe < CHEAP_PE {
            "potentially finding value in what appears to be a reasonably priced stock"
        } else if pe > RICH_PE {
            "paying a premium for growth expectations"
        } else {
            "seeing fairly valued shares based on earnings multiples"
        });
    }

    if let Some(margin) = margin {
        let with_pe = pe.is_some();
        context.push_str(match (margin > STRONG_MARGIN, margin < THIN_MARGIN, with_pe) {
            (true, _, true) => " with strong profitability margins.",
            (true, _, false) => "impressed by strong profitability margins.",
            (_, true, true) => " despite thin profit margins.",
            (_, true, false) => "concerned about thin profit margins.",
            (_, _, true) => " with decent profitability.",
            (_, _, false) => "seeing acceptable profit margins.",
        });
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALUE: &str = "potentially finding value in what appears to be a reasonably priced stock";
    const FAIR: &str = "seeing fairly valued shares based on earnings multiples";
    const PREMIUM: &str = "paying a premium for growth expectations";

    #[test]
    fn pe_boundaries() {
        assert_eq!(valuation_context(Some(14.0), None), VALUE);
        assert_eq!(valuation_context(Some(15.0), None), FAIR);
        assert_eq!(valuation_context(Some(30.0), None), FAIR);
        assert_eq!(valuation_context(Some(31.0), None), PREMIUM);
    }

    #[test]
    fn margin_boundaries_without_pe() {
        assert_eq!(
            valuation_context(None, Some(0.04)),
            "concerned about thin profit margins."
        );
        assert_eq!(
            valuation_context(None, Some(0.05)),
            "seeing acceptable profit margins."
        );
        assert_eq!(
            valuation_context(None, Some(0.15)),
            "seeing acceptable profit margins."
        );
        assert_eq!(
            valuation_context(None, Some(0.16)),
            "impressed by strong profitability margins."
        );
    }

    #[test]
    fn pe_and_margin_are_joined() {
        assert_eq!(
            valuation_context(Some(14.0), Some(0.04)),
            format!("{VALUE} despite thin profit margins.")
        );
        assert_eq!(
            valuation_context(Some(15.0), Some(0.05)),
            format!("{FAIR} with decent profitability.")
        );
        assert_eq!(
            valuation_context(Some(30.0), Some(0.15)),
            format!("{FAIR} with decent profitability.")
        );
        assert_eq!(
            valuation_context(Some(31.0), Some(0.16)),
            format!("{PREMIUM} with strong profitability margins.")
        );
    }

    #[test]
    fn missing_or_zero_values() {
        let fallback = "evaluating the company based on other financial metrics.";
        assert_eq!(valuation_context(None, None), fallback);
        assert_eq!(valuation_context(Some(0.0), Some(0.0)), fallback);
        assert_eq!(valuation_context(Some(0.0), Some(0.2)), "impressed by strong profitability margins.");
    }

    #[test]
    fn negative_margin_is_thin() {
        assert_eq!(
            valuation_context(Some(40.0), Some(-0.12)),
            format!("{PREMIUM} despite thin profit margins.")
        );
    }
}
