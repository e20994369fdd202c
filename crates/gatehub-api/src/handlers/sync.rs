//! Offline gate log sync handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::SyncLogsRequest;
use crate::dto::response::SyncResponse;
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// POST /api/gate-logs/sync
///
/// 200 when every record was stored or recognised as a duplicate, 207 when
/// at least one batch failed.
pub async fn sync_logs(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<SyncLogsRequest>,
) -> Result<(StatusCode, Json<SyncResponse>), ApiError> {
    let result = state.sync_engine.sync_logs(&auth, req.logs).await?;

    let status = if result.is_success() {
        StatusCode::OK
    } else {
        StatusCode::MULTI_STATUS
    };

    Ok((status, Json(SyncResponse::from(result))))
}
