use crate::domain::chart::StockQuote;
use crate::ingest::error::{Provider, ProviderError, ProviderErrorKind};
use crate::ingest::types::{CompanyOverview, EarningsResponse};
use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

#[async_trait::async_trait]
pub trait QuoteProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// One year of daily bars for `symbol`, ending now.
    async fn fetch_chart(&self, symbol: &str) -> Result<StockQuote>;
}

#[async_trait::async_trait]
pub trait EarningsProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Quarterly earnings plus the company overview. Fails with
    /// `ProviderErrorKind::RateLimited` when the provider throttles the call
    /// or has no earnings for the symbol.
    async fn fetch_earnings(&self, symbol: &str) -> Result<(EarningsResponse, CompanyOverview)>;
}

/// Reads a provider response, classifying non-2xx statuses and decoding the
/// body as `T`.
pub(crate) async fn read_json<T: DeserializeOwned>(
    provider: Provider,
    res: reqwest::Response,
) -> Result<T> {
    let status = res.status();
    let text = res
        .text()
        .await
        .context("failed to read provider response")?;

    if !status.is_success() {
        let kind = match status {
            StatusCode::NOT_FOUND => ProviderErrorKind::NotFound,
            StatusCode::TOO_MANY_REQUESTS => ProviderErrorKind::RateLimited,
            _ => ProviderErrorKind::Http,
        };
        return Err(ProviderError::new(provider, kind, format!("HTTP {status}: {}", snippet(&text))).into());
    }

    serde_json::from_str::<T>(&text).map_err(|e| {
        ProviderError::new(
            provider,
            ProviderErrorKind::Decode,
            format!("{e}; body: {}", snippet(&text)),
        )
        .into()
    })
}

fn snippet(text: &str) -> &str {
    let end = text
        .char_indices()
        .nth(200)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    &text[..end]
}
