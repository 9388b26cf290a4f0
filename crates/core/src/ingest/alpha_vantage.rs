use crate::config::Settings;
use crate::ingest::error::{Provider, ProviderError, ProviderErrorKind};
use crate::ingest::provider::{read_json, EarningsProvider};
use crate::ingest::types::{CompanyOverview, EarningsResponse};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";

#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AlphaVantageClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings
            .alpha_vantage_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(
            base_url,
            settings.alpha_vantage_api_key(),
            settings.upstream_timeout(),
        )
    }

    pub fn new(base_url: impl Into<String>, api_key: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build earnings provider http client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.to_string(),
        })
    }

    async fn query<T: DeserializeOwned>(&self, function: &str, symbol: &str) -> Result<T> {
        let url = format!("{}/query", self.base_url.trim_end_matches('/'));
        let res = self
            .http
            .get(url)
            .query(&[
                ("function", function),
                ("symbol", symbol),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .with_context(|| format!("earnings provider {function} request failed"))?;

        read_json(Provider::Earnings, res).await
    }
}

#[async_trait::async_trait]
impl EarningsProvider for AlphaVantageClient {
    fn provider_name(&self) -> &'static str {
        "alpha_vantage"
    }

    async fn fetch_earnings(&self, symbol: &str) -> Result<(EarningsResponse, CompanyOverview)> {
        let earnings: EarningsResponse = self.query("EARNINGS", symbol).await?;

        if let Some(marker) = earnings.rate_limit_marker() {
            tracing::warn!(%symbol, marker, "earnings provider returned a message instead of data");
            return Err(ProviderError::new(Provider::Earnings, ProviderErrorKind::RateLimited, marker).into());
        }
        if earnings.quarters().is_empty() {
            return Err(ProviderError::new(
                Provider::Earnings,
                ProviderErrorKind::RateLimited,
                format!("no quarterly earnings for {symbol}"),
            )
            .into());
        }

        let overview: CompanyOverview = self.query("OVERVIEW", symbol).await?;
        tracing::info!(
            %symbol,
            quarters = earnings.quarters().len(),
            has_overview = overview.name().is_some(),
            "earnings fetched"
        );
        Ok((earnings, overview))
    }
}
