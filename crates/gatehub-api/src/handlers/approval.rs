//! Guest approval handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use gatehub_core::types::ApprovalRequestId;

use crate::dto::request::{CreateGuestApprovalRequest, DecisionRequest};
use crate::dto::response::{ApprovalCreatedResponse, ApprovalStatusResponse};
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser, parse_id, validate_body};
use crate::state::AppState;

/// POST /api/guest-approvals
pub async fn create_approval(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateGuestApprovalRequest>,
) -> Result<(StatusCode, Json<ApprovalCreatedResponse>), ApiError> {
    // Role check precedes body validation.
    state.approval_coordinator.authorize_request(&auth)?;
    validate_body(&req)?;

    let ticket = state
        .approval_coordinator
        .request_approval(&auth, req.into_input()?)
        .await?;

    Ok((StatusCode::ACCEPTED, Json(ticket.into())))
}

/// GET /api/guest-approvals/{id}
pub async fn get_approval(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApprovalStatusResponse>, ApiError> {
    let id: ApprovalRequestId = parse_id(&id)?;
    let view = state.approval_coordinator.get_status(&auth, id).await?;
    Ok(Json(view.into()))
}

/// POST /api/guest-approvals/{id}/decision
pub async fn decide_approval(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<DecisionRequest>,
) -> Result<Json<ApprovalStatusResponse>, ApiError> {
    let id: ApprovalRequestId = parse_id(&id)?;
    state
        .approval_coordinator
        .decide(&auth, id, req.decision)
        .await?;

    let view = state.approval_coordinator.get_status(&auth, id).await?;
    Ok(Json(view.into()))
}
