use std::sync::Arc;

use axum::{
    extract::{Query, State},
    handler::Handler,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, MethodRouter},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use simplified_core::domain::analysis::{mock_analysis, AnalysisResult};
use simplified_core::domain::chart::StockQuote;
use simplified_core::domain::earnings::EarningsSummary;
use simplified_core::ingest::{EarningsProvider, ProviderError, ProviderErrorKind, QuoteProvider};
use simplified_core::landing::{analyzer_url, AnalyzerPrefill, ANALYZER_PATH};
use simplified_core::ticker::{normalize_symbol, search_stock, StockMatch};

#[derive(Clone)]
pub struct AppState {
    pub quotes: Arc<dyn QuoteProvider>,
    pub earnings: Arc<dyn EarningsProvider>,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/stock-data", get_only(stock_data))
        .route("/api/earnings-data", get_only(earnings_data))
        .route("/api/analyze", get_only(analyze))
        .route("/api/search", get_only(search))
        .route(ANALYZER_PATH, get(analyzer_prefill))
        .route("/start", get(start))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// GET handler that also answers bare OPTIONS with 200 and every other
/// method, HEAD included, with a JSON 405.
fn get_only<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    get(handler)
        .head(method_not_allowed)
        .options(preflight)
        .fallback(method_not_allowed)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> ApiError {
    ApiError::new(
        StatusCode::METHOD_NOT_ALLOWED,
        json!({"error": "Method not allowed"}),
    )
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: Value,
}

impl ApiError {
    fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    fn bad_request(message: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            json!({"success": false, "error": message}),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct SymbolQuery {
    symbol: Option<String>,
}

impl SymbolQuery {
    fn require_symbol(&self) -> Result<String, ApiError> {
        self.symbol
            .as_deref()
            .and_then(normalize_symbol)
            .ok_or_else(|| ApiError::bad_request("Symbol is required"))
    }
}

#[derive(Debug, Serialize)]
struct StockDataResponse {
    success: bool,
    #[serde(flatten)]
    quote: StockQuote,
}

async fn stock_data(
    State(state): State<AppState>,
    Query(query): Query<SymbolQuery>,
) -> Result<Json<StockDataResponse>, ApiError> {
    let symbol = query.require_symbol()?;

    let quote = state.quotes.fetch_chart(&symbol).await.map_err(|err| {
        let message = format!("{err:#}");
        match ProviderError::kind_of(&err) {
            Some(ProviderErrorKind::NotFound) => {
                tracing::warn!(%symbol, error = %message, "stock not found");
                ApiError::new(
                    StatusCode::NOT_FOUND,
                    json!({"success": false, "error": "Stock not found"}),
                )
            }
            Some(ProviderErrorKind::RateLimited) => {
                tracing::warn!(%symbol, error = %message, "quote provider rate limited");
                ApiError::new(
                    StatusCode::TOO_MANY_REQUESTS,
                    json!({"success": false, "error": "Upstream rate limit reached", "message": message}),
                )
            }
            _ => {
                sentry_anyhow::capture_anyhow(&err);
                tracing::error!(%symbol, error = %message, provider = state.quotes.provider_name(), "stock data fetch failed");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"success": false, "error": "Failed to fetch stock data", "message": message}),
                )
            }
        }
    })?;

    Ok(Json(StockDataResponse {
        success: true,
        quote,
    }))
}

#[derive(Debug, Serialize)]
struct EarningsDataResponse {
    success: bool,
    data: EarningsSummary,
}

async fn earnings_data(
    State(state): State<AppState>,
    Query(query): Query<SymbolQuery>,
) -> Result<Json<EarningsDataResponse>, ApiError> {
    let symbol = query.require_symbol()?;

    let summary = async {
        let (earnings, overview) = state.earnings.fetch_earnings(&symbol).await?;
        EarningsSummary::build(&symbol, &earnings, &overview)
    }
    .await
    .map_err(|err| {
        if ProviderError::kind_of(&err) == Some(ProviderErrorKind::RateLimited) {
            tracing::warn!(%symbol, error = %err, "earnings provider rate limited or symbol unknown");
            return ApiError::new(
                StatusCode::TOO_MANY_REQUESTS,
                json!({"success": false, "error": "API rate limit or invalid symbol", "fallback": true}),
            );
        }
        sentry_anyhow::capture_anyhow(&err);
        let message = format!("{err:#}");
        tracing::error!(%symbol, error = %message, provider = state.earnings.provider_name(), "earnings fetch failed");
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"success": false, "error": "Failed to fetch earnings data", "fallback": true, "message": message}),
        )
    })?;

    Ok(Json(EarningsDataResponse {
        success: true,
        data: summary,
    }))
}

async fn analyze(Query(query): Query<AnalyzerPrefill>) -> Result<Json<AnalysisResult>, ApiError> {
    let query = query.normalized();
    let event = query
        .event
        .ok_or_else(|| ApiError::bad_request("Event is required"))?;

    let result = mock_analysis(&mut rand::thread_rng(), &event, query.source.as_deref())
        .map_err(|e| ApiError::bad_request(&e.to_string()))?;

    tracing::info!(
        symbol = %result.symbol,
        source = result.source.as_deref().unwrap_or("direct"),
        "mock analysis generated"
    );
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

#[derive(Debug, Serialize)]
struct SearchResponse {
    success: bool,
    data: Vec<StockMatch>,
}

async fn search(Query(query): Query<SearchQuery>) -> Json<SearchResponse> {
    Json(SearchResponse {
        success: true,
        data: search_stock(query.q.as_deref().unwrap_or_default()),
    })
}

async fn analyzer_prefill(Query(query): Query<AnalyzerPrefill>) -> Json<AnalyzerPrefill> {
    let prefill = query.normalized();
    if prefill.event.is_some() {
        tracing::info!(source = prefill.source.as_deref().unwrap_or("direct"), "analyzer prefilled");
    }
    Json(prefill)
}

#[derive(Debug, Deserialize)]
struct StartQuery {
    event: Option<String>,
}

async fn start(Query(query): Query<StartQuery>) -> Redirect {
    match query.event.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
        Some(event) => Redirect::to(&analyzer_url(event)),
        None => Redirect::to(ANALYZER_PATH),
    }
}
