pub const DEFAULT_SECTOR_CONTEXT: &str = "sector-specific trends and market conditions.";

const SECTOR_CONTEXTS: [(&str, &str); 10] = [
    (
        "Technology",
        "innovation cycles, competition, and growth expectations.",
    ),
    (
        "Healthcare",
        "regulatory approvals, demographic trends, and R&D spending.",
    ),
    (
        "Financial Services",
        "interest rates, credit quality, and economic conditions.",
    ),
    (
        "Consumer Cyclical",
        "consumer spending, economic cycles, and discretionary income.",
    ),
    (
        "Consumer Defensive",
        "stable demand but margin pressure from costs and competition.",
    ),
    (
        "Energy",
        "commodity prices, regulatory changes, and global demand patterns.",
    ),
    (
        "Industrials",
        "economic growth, infrastructure spending, and supply chain efficiency.",
    ),
    (
        "Utilities",
        "interest rates, regulatory policies, and infrastructure investments.",
    ),
    (
        "Real Estate",
        "interest rates, property values, and economic growth.",
    ),
    (
        "Materials",
        "commodity cycles, global demand, and input cost pressures.",
    ),
];

/// What usually drives companies in `sector`. Case-insensitive; unknown
/// sectors get a generic sentence.
pub fn sector_context(sector: &str) -> &'static str {
    let sector = sector.trim();
    SECTOR_CONTEXTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(sector))
        .map(|(_, context)| *context)
        .unwrap_or(DEFAULT_SECTOR_CONTEXT)
}
