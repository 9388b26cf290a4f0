pub mod domain;
pub mod ingest;
pub mod landing;
pub mod narrative;
pub mod ticker;

pub mod config {
    use anyhow::Context;

    const DEFAULT_ALPHA_VANTAGE_API_KEY: &str = "demo";
    const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub alpha_vantage_api_key: Option<String>,
        pub alpha_vantage_base_url: Option<String>,
        pub quote_base_url: Option<String>,
        pub upstream_timeout_secs: u64,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let upstream_timeout_secs = match std::env::var("UPSTREAM_TIMEOUT_SECS") {
                Ok(s) => s
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("UPSTREAM_TIMEOUT_SECS must be an integer, got {s:?}"))?,
                Err(_) => DEFAULT_UPSTREAM_TIMEOUT_SECS,
            };

            Ok(Self {
                alpha_vantage_api_key: non_empty_var("ALPHA_VANTAGE_API_KEY"),
                alpha_vantage_base_url: non_empty_var("ALPHA_VANTAGE_BASE_URL"),
                quote_base_url: non_empty_var("QUOTE_BASE_URL"),
                upstream_timeout_secs,
                sentry_dsn: non_empty_var("SENTRY_DSN"),
            })
        }

        /// Falls back to the provider's public demo key.
        pub fn alpha_vantage_api_key(&self) -> &str {
            self.alpha_vantage_api_key
                .as_deref()
                .unwrap_or(DEFAULT_ALPHA_VANTAGE_API_KEY)
        }

        pub fn upstream_timeout(&self) -> std::time::Duration {
            std::time::Duration::from_secs(self.upstream_timeout_secs)
        }
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                alpha_vantage_api_key: None,
                alpha_vantage_base_url: None,
                quote_base_url: None,
                upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
                sentry_dsn: None,
            }
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

}
