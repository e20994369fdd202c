//! Health check handlers.

use axum::Json;
use axum::extract::State;

use gatehub_core::error::AppError;

use crate::dto::response::{HealthResponse, ReadinessResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/health/ready
pub async fn readiness(State(state): State<AppState>) -> Result<Json<ReadinessResponse>, ApiError> {
    let database = match &state.db_pool {
        Some(pool) => {
            pool.health_check()
                .await
                .map_err(|e| AppError::service_unavailable(e.message))?;
            "postgres"
        }
        None => "memory",
    };

    Ok(Json(ReadinessResponse {
        status: "ready".to_string(),
        database: database.to_string(),
    }))
}
