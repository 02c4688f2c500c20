//! api.rs - HTTP endpoints
//!
//! `POST /analyze` runs one analysis for the posted position;
//! `GET /health` reports liveness.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use log::{info, warn};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

use crate::advisor::MigrationAdvisor;
use crate::models::{Action, AnalysisResult, Breakeven, Position};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    advisor: Arc<MigrationAdvisor>,
}

impl AppState {
    pub fn new(advisor: MigrationAdvisor) -> Self {
        AppState {
            advisor: Arc::new(advisor),
        }
    }
}

/// Error body returned for failed requests
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        ApiError {
            error: message.into(),
        }
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TargetPool {
    pub protocol: String,
    pub pair: String,
    pub chain: String,
    pub apy: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub action: Action,
    pub target_pool: TargetPool,
    #[serde(rename = "currentAPY")]
    pub current_apy: Decimal,
    #[serde(rename = "bestAPY")]
    pub best_apy: Decimal,
    pub extra_yield: Decimal,
    /// Total USD
    pub migration_cost: Decimal,
    /// Seconds
    pub estimated_time: u64,
    /// Days, -1 when never
    pub breakeven: Breakeven,
    pub reasoning: String,
}

impl From<AnalysisResult> for AnalyzeResponse {
    fn from(result: AnalysisResult) -> Self {
        let best = &result.comparison.best_pool;
        AnalyzeResponse {
            action: result.action,
            target_pool: TargetPool {
                protocol: best.protocol.clone(),
                pair: best.pair.clone(),
                chain: best.chain.clone(),
                apy: best.apy,
            },
            current_apy: result.current_apy(),
            best_apy: result.best_apy(),
            extra_yield: result.comparison.extra_yearly_earnings,
            migration_cost: result.migration_cost.total_cost_usd,
            estimated_time: result.migration_cost.estimated_time,
            breakeven: result.decision.breakeven,
            reasoning: result.reasoning,
        }
    }
}

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/analyze", post(analyze))
        .with_state(state)
}

/// GET /health - Check API health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::VERSION,
    })
}

/// POST /analyze - Recommend MIGRATE or STAY for a position
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<Position>, JsonRejection>,
) -> ApiResult<AnalyzeResponse> {
    let Json(position) = payload.map_err(|rejection| {
        warn!("Rejected /analyze body: {}", rejection.body_text());
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(rejection.body_text())),
        )
    })?;

    let result = state.advisor.analyze(&position).await.map_err(|e| {
        warn!("Invalid position: {}", e);
        (StatusCode::BAD_REQUEST, Json(ApiError::new(e.to_string())))
    })?;

    Ok(Json(AnalyzeResponse::from(result)))
}

/// Start the HTTP server on `bind` (e.g. "127.0.0.1:3000")
pub async fn start_server(state: AppState, bind: &str) -> Result<(), std::io::Error> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(bind).await?;

    info!("Starting API server on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
