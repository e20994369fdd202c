//! Integration tests for the guest approval handshake.

mod helpers;

use chrono::{DateTime, Duration, Utc};
use http::StatusCode;
use serde_json::{Value, json};

use gatehub_core::types::{GateId, HouseholdId};
use gatehub_database::ApprovalStore;
use gatehub_entity::profile::UserRole;

use helpers::{TestApp, Village};

const APPROVALS: &str = "/api/guest-approvals";

fn approval_body(household_id: HouseholdId) -> Value {
    json!({
        "household_id": household_id,
        "guest_name": "Maria Santos",
        "vehicle_plate": "NBC 1234",
        "gate_id": GateId::new(),
    })
}

fn timestamp(body: &Value, field: &str) -> DateTime<Utc> {
    serde_json::from_value(body[field].clone()).expect("RFC 3339 timestamp")
}

/// Raise a request as the village guard and return its id
async fn raise(app: &TestApp, village: &Village) -> String {
    let response = app
        .request(
            "POST",
            APPROVALS,
            Some(approval_body(village.household_id)),
            Some(&app.token_for(village.guard)),
        )
        .await;
    assert_eq!(response.status, StatusCode::ACCEPTED, "{:?}", response.body);
    response.text("approval_request_id").to_string()
}

#[tokio::test]
async fn test_guard_raises_pending_request() {
    let app = TestApp::new().await;
    let village = app.create_village().await;

    let response = app
        .request(
            "POST",
            APPROVALS,
            Some(approval_body(village.household_id)),
            Some(&app.token_for(village.guard)),
        )
        .await;

    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert_eq!(response.text("status"), "pending");
    assert_eq!(response.count("timeout_seconds"), 120);
    assert_eq!(response.body["notification_sent"], json!(true));
    assert_eq!(app.notifier.sent(), 1);

    let id = response.text("approval_request_id");
    let status = app
        .request(
            "GET",
            &format!("{APPROVALS}/{id}"),
            None,
            Some(&app.token_for(village.guard)),
        )
        .await;
    assert_eq!(status.status, StatusCode::OK);

    let created_at = timestamp(&status.body, "created_at");
    let timeout_at = timestamp(&response.body, "timeout_at");
    assert_eq!(timeout_at - created_at, Duration::seconds(120));
    assert_eq!(status.text("guest_name"), "Maria Santos");
    assert_eq!(status.text("status"), "pending");
}

#[tokio::test]
async fn test_missing_household_is_rejected_without_writing() {
    let app = TestApp::new().await;
    let village = app.create_village().await;

    let response = app
        .request(
            "POST",
            APPROVALS,
            Some(json!({ "guest_name": "Maria Santos", "gate_id": GateId::new() })),
            Some(&app.token_for(village.guard)),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text("error"), "VALIDATION_ERROR");
    assert!(app.approvals.is_empty().await);
    assert_eq!(app.notifier.sent(), 0);
}

#[tokio::test]
async fn test_blank_guest_name_is_rejected() {
    let app = TestApp::new().await;
    let village = app.create_village().await;

    let response = app
        .request(
            "POST",
            APPROVALS,
            Some(json!({
                "household_id": village.household_id,
                "guest_name": "   ",
                "gate_id": GateId::new(),
            })),
            Some(&app.token_for(village.guard)),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.approvals.is_empty().await);
}

#[tokio::test]
async fn test_household_cannot_raise_requests() {
    let app = TestApp::new().await;
    let village = app.create_village().await;

    let response = app
        .request(
            "POST",
            APPROVALS,
            Some(approval_body(village.household_id)),
            Some(&app.token_for(village.resident)),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(app.approvals.is_empty().await);
}

#[tokio::test]
async fn test_household_with_incomplete_body_is_forbidden_not_invalid() {
    let app = TestApp::new().await;
    let village = app.create_village().await;

    let response = app
        .request(
            "POST",
            APPROVALS,
            Some(json!({ "guest_name": "X" })),
            Some(&app.token_for(village.resident)),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.text("error"), "AUTHORIZATION_DENIED");
    assert!(app.approvals.is_empty().await);
}

#[tokio::test]
async fn test_household_approves_and_guard_sees_decision() {
    let app = TestApp::new().await;
    let village = app.create_village().await;
    let id = raise(&app, &village).await;

    let decided = app
        .request(
            "POST",
            &format!("{APPROVALS}/{id}/decision"),
            Some(json!({ "decision": "approved" })),
            Some(&app.token_for(village.resident)),
        )
        .await;

    assert_eq!(decided.status, StatusCode::OK);
    assert_eq!(decided.text("status"), "approved");
    assert_eq!(decided.body["responded_by"], json!(village.resident));
    assert_eq!(decided.count("seconds_remaining"), 0);

    let seen = app
        .request(
            "GET",
            &format!("{APPROVALS}/{id}"),
            None,
            Some(&app.token_for(village.guard)),
        )
        .await;
    assert_eq!(seen.text("status"), "approved");
}

#[tokio::test]
async fn test_second_decision_conflicts() {
    let app = TestApp::new().await;
    let village = app.create_village().await;
    let id = raise(&app, &village).await;
    let path = format!("{APPROVALS}/{id}/decision");
    let token = app.token_for(village.resident);

    let first = app
        .request("POST", &path, Some(json!({ "decision": "denied" })), Some(&token))
        .await;
    let second = app
        .request("POST", &path, Some(json!({ "decision": "approved" })), Some(&token))
        .await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.text("error"), "CONFLICT");
    assert_eq!(second.text("message"), "Approval request is already denied");
}

#[tokio::test]
async fn test_decision_after_expiry_conflicts() {
    let app = TestApp::new().await;
    let village = app.create_village().await;
    let id = raise(&app, &village).await;

    let swept = app
        .approvals
        .expire_overdue(Utc::now() + Duration::seconds(300))
        .await
        .expect("sweep");
    assert_eq!(swept, 1);

    let response = app
        .request(
            "POST",
            &format!("{APPROVALS}/{id}/decision"),
            Some(json!({ "decision": "approved" })),
            Some(&app.token_for(village.resident)),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.text("message"), "Approval request has expired");
}

#[tokio::test]
async fn test_other_household_cannot_decide_or_view() {
    let app = TestApp::new().await;
    let village = app.create_village().await;
    let neighbour = app
        .create_profile(
            Some(village.tenant_id),
            Some(HouseholdId::new()),
            UserRole::HouseholdMember,
        )
        .await;
    let id = raise(&app, &village).await;
    let token = app.token_for(neighbour);

    let decide = app
        .request(
            "POST",
            &format!("{APPROVALS}/{id}/decision"),
            Some(json!({ "decision": "approved" })),
            Some(&token),
        )
        .await;
    let view = app
        .request("GET", &format!("{APPROVALS}/{id}"), None, Some(&token))
        .await;

    assert_eq!(decide.status, StatusCode::FORBIDDEN);
    assert_eq!(view.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_guard_cannot_decide() {
    let app = TestApp::new().await;
    let village = app.create_village().await;
    let id = raise(&app, &village).await;

    let response = app
        .request(
            "POST",
            &format!("{APPROVALS}/{id}/decision"),
            Some(json!({ "decision": "approved" })),
            Some(&app.token_for(village.guard)),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_requests_are_invisible_across_tenants() {
    let app = TestApp::new().await;
    let village = app.create_village().await;
    let other = app.create_village().await;
    let id = raise(&app, &village).await;

    let response = app
        .request(
            "GET",
            &format!("{APPROVALS}/{id}"),
            None,
            Some(&app.token_for(other.guard)),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_decision_value_is_rejected() {
    let app = TestApp::new().await;
    let village = app.create_village().await;
    let id = raise(&app, &village).await;

    let response = app
        .request(
            "POST",
            &format!("{APPROVALS}/{id}/decision"),
            Some(json!({ "decision": "maybe" })),
            Some(&app.token_for(village.resident)),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_id_is_rejected() {
    let app = TestApp::new().await;
    let village = app.create_village().await;

    let response = app
        .request(
            "GET",
            &format!("{APPROVALS}/not-a-uuid"),
            None,
            Some(&app.token_for(village.guard)),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
