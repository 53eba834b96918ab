use axum::{
    extract::{Path, Query, State},
    response::Html,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::aggregator::PriceAggregator;
use crate::api::view::render_price_table;
use crate::error::AppError;
use crate::types::{ChartSeries, PriceSummary};

#[derive(Clone)]
pub struct ApiState {
    pub aggregator: PriceAggregator,
    /// Freshness window used when a request has no usable `age`.
    pub default_age_secs: i64,
}

pub fn router(state: ApiState) -> Router {
    let routes = Router::new()
        .route("/", get(home))
        .route("/api/v1/stats/prices/:item", get(get_prices))
        .route("/api/v1/stats/view/:item", get(get_prices_view))
        .route("/api/v1/stats/charts/:item", get(get_charts));

    with_middleware(routes).with_state(state)
}

/// CORS, request tracing, and panic recovery (a panicking handler answers 500).
fn with_middleware(routes: Router<ApiState>) -> Router<ApiState> {
    routes
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
}

// ---------------------------------------------------------------------------
// Query param structs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct PricesQuery {
    pub locations: Option<String>,
    /// Seconds. Kept as a string so a malformed value falls back to the default.
    /// Negative values are passed through and select nothing.
    pub age: Option<String>,
}

#[derive(Deserialize)]
pub struct ChartsQuery {
    pub locations: Option<String>,
}

impl PricesQuery {
    fn age_secs(&self, default: i64) -> i64 {
        self.age
            .as_deref()
            .and_then(|a| a.trim().parse::<i64>().ok())
            .unwrap_or(default)
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn home() -> &'static str {
    "Nothing to show here"
}

async fn price_summaries(
    state: &ApiState,
    item: &str,
    params: &PricesQuery,
) -> Result<Vec<PriceSummary>, AppError> {
    let age = params.age_secs(state.default_age_secs);
    let locations = params.locations.as_deref().unwrap_or_default();
    state.aggregator.get_price_summaries(item, locations, age).await
}

async fn get_prices(
    State(state): State<ApiState>,
    Path(item): Path<String>,
    Query(params): Query<PricesQuery>,
) -> Result<Json<Vec<PriceSummary>>, AppError> {
    Ok(Json(price_summaries(&state, &item, &params).await?))
}

async fn get_prices_view(
    State(state): State<ApiState>,
    Path(item): Path<String>,
    Query(params): Query<PricesQuery>,
) -> Result<Html<String>, AppError> {
    let summaries = price_summaries(&state, &item, &params).await?;
    Ok(Html(render_price_table(&summaries)))
}

async fn get_charts(
    State(state): State<ApiState>,
    Path(item): Path<String>,
    Query(params): Query<ChartsQuery>,
) -> Result<Json<Vec<ChartSeries>>, AppError> {
    let locations = params.locations.as_deref().unwrap_or_default();
    let series = state.aggregator.get_chart_series(&item, locations).await?;
    Ok(Json(series))
}
