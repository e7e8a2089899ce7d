//! HTTP API for the dashboard
//!
//! Endpoints:
//! - GET /health - Health check
//! - GET /snapshot - Cached snapshot document (ETag = SHA-256 of body)
//! - GET /dashboard - Assembled dashboard view
//! - GET /score?rhi=&ibs=&msr= - Score an arbitrary reading
//! - POST /cache/invalidate - Drop the cached snapshot

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::Timelike;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::info;

use crate::core::{BubblePressureScorer, Dashboard, SnapshotCache, SnapshotLoader};
use crate::types::{BubblePressure, SentimentReading};

/// App state
pub struct AppState {
    pub loader: SnapshotLoader,
    pub cache: Arc<SnapshotCache>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cached: bool,
}

/// Score query
#[derive(Debug, Deserialize)]
pub struct ScoreQuery {
    pub rhi: f64,
    pub ibs: f64,
    pub msr: f64,
}

/// Invalidate response
#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    pub invalidated: bool,
}

/// Create the API router
pub fn create_router(loader: SnapshotLoader, cache: Arc<SnapshotCache>) -> Router {
    let state = Arc::new(AppState { loader, cache });

    Router::new()
        .route("/health", get(health))
        .route("/snapshot", get(get_snapshot))
        .route("/dashboard", get(get_dashboard))
        .route("/score", get(score))
        .route("/cache/invalidate", post(invalidate))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        cached: state.cache.is_populated().await,
    })
}

/// Raw snapshot document
async fn get_snapshot(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    let snapshot = state.loader.load(&state.cache).await;
    let body = serde_json::to_string(&*snapshot).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let etag = format!("\"{}\"", fingerprint(body.as_bytes()));

    let unchanged = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == etag)
        .unwrap_or(false);

    if unchanged {
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
    }
    Ok((
        StatusCode::OK,
        [
            (header::ETAG, etag),
            (header::CONTENT_TYPE, "application/json".to_string()),
        ],
        body,
    )
        .into_response())
}

/// Assembled dashboard
async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<Dashboard> {
    let snapshot = state.loader.load(&state.cache).await;
    let hour = chrono::Local::now().hour();
    Json(Dashboard::build(&snapshot, hour))
}

/// Score a reading; missing or non-numeric parameters are rejected with 400
async fn score(Query(q): Query<ScoreQuery>) -> Json<BubblePressure> {
    let reading = SentimentReading::new(q.rhi, q.ibs, q.msr);
    Json(BubblePressureScorer::new().score(&reading))
}

/// Drop the cached snapshot
async fn invalidate(State(state): State<Arc<AppState>>) -> Json<InvalidateResponse> {
    state.cache.invalidate().await;
    Json(InvalidateResponse { invalidated: true })
}

/// SHA-256 hex of a response body
fn fingerprint(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().iter().map(|b| format!("{:02x}", b)).collect()
}

/// Run the API server
pub async fn run_server(
    addr: &str,
    loader: SnapshotLoader,
    cache: Arc<SnapshotCache>,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = loader.source().to_string();
    let router = create_router(loader, cache);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, %source, "sentinel API listening");
    println!("Sentinel API running on {}", addr);
    println!("  GET  /health            - Health check");
    println!("  GET  /snapshot          - Snapshot document");
    println!("  GET  /dashboard         - Dashboard view");
    println!("  GET  /score             - Score ?rhi=&ibs=&msr=");
    println!("  POST /cache/invalidate  - Reload on next request");
    axum::serve(listener, router).await?;
    Ok(())
}
