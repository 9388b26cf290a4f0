//! Hand-off from the landing page form to the analyzer view.

use serde::{Deserialize, Serialize};

pub const ANALYZER_PATH: &str = "/analyzer";
pub const LANDING_SOURCE: &str = "landing";

/// Query parameters the analyzer accepts for prefilling its input. Both are
/// optional; neither changes what the analyzer does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerPrefill {
    pub event: Option<String>,
    pub source: Option<String>,
}

impl AnalyzerPrefill {
    pub fn normalized(self) -> Self {
        let clean = |s: Option<String>| s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        Self {
            event: clean(self.event),
            source: clean(self.source),
        }
    }
}

pub fn analyzer_url(event: &str) -> String {
    format!(
        "{ANALYZER_PATH}?event={}&source={LANDING_SOURCE}",
        urlencoding::encode(event.trim())
    )
}
