//! Fixed sentence templates that turn provider figures into plain English.

pub mod earnings;
pub mod sector;
pub mod valuation;

pub use earnings::{explain_earnings, EarningsFacts, Outcome, PlainEnglish};
pub use sector::sector_context;
pub use valuation::valuation_context;

/// One-decimal rendering where an exact half rounds away from zero
/// (`1.25` -> `"1.3"`). Plain `{:.1}` rounds such ties to even.
pub fn fixed1(value: f64) -> String {
    // A binary double sits exactly halfway between two tenths only when it
    // is an odd number of quarters (x.25, x.75).
    let quarters = value * 4.0;
    let is_tie = quarters.fract() == 0.0 && (quarters % 2.0).abs() == 1.0;
    let value = if is_tie {
        (value * 10.0).round() / 10.0
    } else {
        value
    };
    format!("{value:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed1_rounds_halves_away_from_zero() {
        assert_eq!(fixed1(1.25), "1.3");
        assert_eq!(fixed1(0.75), "0.8");
        assert_eq!(fixed1(-1.25), "-1.3");
        assert_eq!(fixed1(2.5), "2.5");
    }

    #[test]
    fn fixed1_matches_plain_rounding_elsewhere() {
        assert_eq!(fixed1(24.6), "24.6");
        assert_eq!(fixed1(10.454545), "10.5");
        // 1.15 is stored just below the half, so it rounds down.
        assert_eq!(fixed1(1.15), "1.1");
        assert_eq!(fixed1(-9.999999999999998), "-10.0");
    }
}
