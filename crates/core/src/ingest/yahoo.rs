use crate::config::Settings;
use crate::domain::chart::StockQuote;
use crate::ingest::error::{Provider, ProviderError, ProviderErrorKind};
use crate::ingest::provider::{read_json, QuoteProvider};
use crate::ingest::types::ChartEnvelope;
use anyhow::{Context, Result};
use chrono::{Duration as ChronoDuration, Utc};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const LOOKBACK_DAYS: i64 = 365;
const USER_AGENT: &str = concat!("simplified/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct YahooChartClient {
    http: reqwest::Client,
    base_url: String,
}

impl YahooChartClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings
            .quote_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url, settings.upstream_timeout())
    }

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build quote provider http client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn url(&self, symbol: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(symbol)
        )
    }
}

#[async_trait::async_trait]
impl QuoteProvider for YahooChartClient {
    fn provider_name(&self) -> &'static str {
        "yahoo_chart"
    }

    async fn fetch_chart(&self, symbol: &str) -> Result<StockQuote> {
        let now = Utc::now();
        let period1 = (now - ChronoDuration::days(LOOKBACK_DAYS)).timestamp();
        let period2 = now.timestamp();

        tracing::debug!(%symbol, period1, period2, "requesting chart");

        let res = self
            .http
            .get(self.url(symbol))
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("includePrePost", "true".to_string()),
                ("events", "div,splits".to_string()),
            ])
            .send()
            .await
            .context("quote provider request failed")?;

        let envelope: ChartEnvelope = read_json(Provider::Quote, res).await?;

        let result = envelope
            .chart
            .result
            .as_ref()
            .and_then(|r| r.first());
        let Some(result) = result else {
            let detail = envelope
                .chart
                .error
                .map(|e| format!("{}: {}", e.code, e.description.unwrap_or_default()))
                .unwrap_or_else(|| "empty chart result".to_string());
            return Err(ProviderError::new(Provider::Quote, ProviderErrorKind::NotFound, detail).into());
        };

        let quote = StockQuote::from_chart_result(result);
        tracing::info!(%symbol, points = quote.data.len(), "chart fetched");
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> YahooChartClient {
        YahooChartClient::new(server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn maps_chart_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .and(query_param("interval", "1d"))
            .and(query_param("events", "div,splits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "chart": {
                    "result": [{
                        "meta": {"symbol": "AAPL", "regularMarketPrice": 191.0, "previousClose": 189.5, "currency": "USD"},
                        "timestamp": [1704067200, 1704153600, 1704240000],
                        "indicators": {"quote": [{
                            "open": [185.0, null, 187.0],
                            "high": [186.0, null, 188.0],
                            "low": [184.0, null, 186.0],
                            "close": [185.5, null, 187.5],
                            "volume": [1000, null, 1200]
                        }]}
                    }],
                    "error": null
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let quote = client(&server).fetch_chart("AAPL").await.unwrap();

        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.current_price, Some(191.0));
        assert_eq!(quote.previous_close, Some(189.5));
        assert_eq!(quote.data.len(), 2);
        assert_eq!(quote.data[1].price, 187.5);
    }

    #[tokio::test]
    async fn unknown_symbol_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/NOPE"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "chart": {"result": null, "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}}
            })))
            .mount(&server)
            .await;

        let err = client(&server).fetch_chart("NOPE").await.unwrap_err();
        assert_eq!(ProviderError::kind_of(&err), Some(ProviderErrorKind::NotFound));
    }

    #[tokio::test]
    async fn empty_result_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/EMPTY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "chart": {"result": [], "error": null}
            })))
            .mount(&server)
            .await;

        let err = client(&server).fetch_chart("EMPTY").await.unwrap_err();
        assert_eq!(ProviderError::kind_of(&err), Some(ProviderErrorKind::NotFound));
    }

    #[tokio::test]
    async fn throttling_is_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .mount(&server)
            .await;

        let err = client(&server).fetch_chart("AAPL").await.unwrap_err();
        assert_eq!(ProviderError::kind_of(&err), Some(ProviderErrorKind::RateLimited));
    }

    #[tokio::test]
    async fn server_error_is_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = client(&server).fetch_chart("AAPL").await.unwrap_err();
        assert_eq!(ProviderError::kind_of(&err), Some(ProviderErrorKind::Http));
    }
}
