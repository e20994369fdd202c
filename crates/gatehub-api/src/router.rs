//! Route definitions for the GateHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes, the body limit, and request logging.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    let api_routes = Router::new()
        .merge(gate_log_routes())
        .merge(guest_approval_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Offline gate log ingestion
fn gate_log_routes() -> Router<AppState> {
    Router::new().route("/gate-logs/sync", post(handlers::sync::sync_logs))
}

/// Guest approval handshake
fn guest_approval_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/guest-approvals",
            post(handlers::approval::create_approval),
        )
        .route(
            "/guest-approvals/{id}",
            get(handlers::approval::get_approval),
        )
        .route(
            "/guest-approvals/{id}/decision",
            post(handlers::approval::decide_approval),
        )
}

/// Liveness and readiness
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/ready", get(handlers::health::readiness))
}
