//! Integration tests for offline gate log sync.

mod helpers;

use chrono::Duration;
use http::StatusCode;
use serde_json::json;

use gatehub_core::types::GateId;
use gatehub_entity::profile::UserRole;

use helpers::{TestApp, base_time, distinct_logs, gate_log};

const SYNC: &str = "/api/gate-logs/sync";

#[tokio::test]
async fn test_sync_stores_new_logs() {
    let app = TestApp::new().await;
    let village = app.create_village().await;
    let token = app.token_for(village.guard);

    let response = app
        .request(
            "POST",
            SYNC,
            Some(json!({ "logs": distinct_logs(GateId::new(), 3) })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], json!(true));
    assert_eq!(response.count("total"), 3);
    assert_eq!(response.count("inserted"), 3);
    assert_eq!(response.count("duplicates"), 0);
    assert_eq!(response.count("errors"), 0);
    assert!(response.body.get("error_details").is_none());

    let rows = app.gate_logs.rows_for(village.tenant_id).await;
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|row| row.guard_on_duty_id == Some(village.guard)));
}

#[tokio::test]
async fn test_resync_counts_known_records_as_duplicates() {
    let app = TestApp::new().await;
    let village = app.create_village().await;
    let token = app.token_for(village.guard);
    let gate = GateId::new();
    let t = base_time();

    let first = app
        .request(
            "POST",
            SYNC,
            Some(json!({ "logs": [gate_log(gate, t, Some("NBC 1234"))] })),
            Some(&token),
        )
        .await;
    assert_eq!(first.count("inserted"), 1);

    let second = app
        .request(
            "POST",
            SYNC,
            Some(json!({ "logs": [
                gate_log(gate, t, Some("NBC 1234")),
                gate_log(gate, t + Duration::seconds(1), Some("NBC 1234")),
                gate_log(gate, t + Duration::seconds(2), None),
            ] })),
            Some(&token),
        )
        .await;

    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.count("total"), 3);
    assert_eq!(second.count("inserted"), 2);
    assert_eq!(second.count("duplicates"), 1);
    assert_eq!(second.count("errors"), 0);
    assert_eq!(app.gate_logs.rows_for(village.tenant_id).await.len(), 3);
}

#[tokio::test]
async fn test_large_upload_is_split_into_batches() {
    let app = TestApp::new().await;
    let village = app.create_village().await;
    let token = app.token_for(village.guard);

    let response = app
        .request(
            "POST",
            SYNC,
            Some(json!({ "logs": distinct_logs(GateId::new(), 1200) })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.count("inserted"), 1200);
    assert_eq!(app.gate_logs.insert_calls(), 3);
}

#[tokio::test]
async fn test_failed_batch_returns_multi_status() {
    let app = TestApp::new().await;
    let village = app.create_village().await;
    let token = app.token_for(village.guard);
    app.gate_logs.fail_insert_call(2).await;

    let response = app
        .request(
            "POST",
            SYNC,
            Some(json!({ "logs": distinct_logs(GateId::new(), 1200) })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::MULTI_STATUS);
    assert_eq!(response.body["success"], json!(false));
    assert_eq!(response.count("total"), 1200);
    assert_eq!(response.count("inserted"), 700);
    assert_eq!(response.count("errors"), 500);

    let details = response.body["error_details"]
        .as_array()
        .expect("error_details present");
    assert_eq!(details.len(), 1);
    assert!(details[0]["error"].as_str().is_some());
    assert!(details[0]["log"]["gate_id"].as_str().is_some());

    assert_eq!(app.gate_logs.rows_for(village.tenant_id).await.len(), 700);
}

#[tokio::test]
async fn test_household_role_cannot_sync() {
    let app = TestApp::new().await;
    let village = app.create_village().await;
    let token = app.token_for(village.resident);

    let response = app
        .request(
            "POST",
            SYNC,
            Some(json!({ "logs": distinct_logs(GateId::new(), 2) })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.text("error"), "AUTHORIZATION_DENIED");
    assert!(app.gate_logs.is_empty().await);
}

#[tokio::test]
async fn test_household_with_empty_upload_is_forbidden_not_invalid() {
    let app = TestApp::new().await;
    let village = app.create_village().await;

    let response = app
        .request(
            "POST",
            SYNC,
            Some(json!({ "logs": [] })),
            Some(&app.token_for(village.resident)),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.text("error"), "AUTHORIZATION_DENIED");
}

#[tokio::test]
async fn test_admin_roles_cannot_sync() {
    let app = TestApp::new().await;
    let village = app.create_village().await;
    let admin = app
        .create_profile(Some(village.tenant_id), None, UserRole::AdminHead)
        .await;

    let response = app
        .request(
            "POST",
            SYNC,
            Some(json!({ "logs": distinct_logs(GateId::new(), 1) })),
            Some(&app.token_for(admin)),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(app.gate_logs.is_empty().await);
}

#[tokio::test]
async fn test_empty_upload_is_rejected() {
    let app = TestApp::new().await;
    let village = app.create_village().await;
    let token = app.token_for(village.guard);

    let response = app
        .request("POST", SYNC, Some(json!({ "logs": [] })), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text("error"), "VALIDATION_ERROR");

    let missing = app.request("POST", SYNC, Some(json!({})), Some(&token)).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let app = TestApp::new().await;
    let village = app.create_village().await;
    let token = app.token_for(village.guard);

    let response = app
        .request_raw("POST", SYNC, "{\"logs\": [", Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text("error"), "VALIDATION_ERROR");
    assert!(app.gate_logs.is_empty().await);
}

#[tokio::test]
async fn test_sync_without_token_is_unauthenticated() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            SYNC,
            Some(json!({ "logs": distinct_logs(GateId::new(), 1) })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(app.gate_logs.is_empty().await);
}

#[tokio::test]
async fn test_tenant_comes_from_profile_not_body() {
    let app = TestApp::new().await;
    let village = app.create_village().await;
    let other = app.create_village().await;
    let token = app.token_for(village.guard);

    let mut log = gate_log(GateId::new(), base_time(), Some("XYZ 999"));
    log["tenant_id"] = json!(other.tenant_id);

    let response = app
        .request(
            "POST",
            SYNC,
            Some(json!({ "tenant_id": other.tenant_id, "logs": [log] })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.gate_logs.rows_for(village.tenant_id).await.len(), 1);
    assert!(app.gate_logs.rows_for(other.tenant_id).await.is_empty());
}

#[tokio::test]
async fn test_same_record_in_two_tenants_is_not_a_duplicate() {
    let app = TestApp::new().await;
    let north = app.create_village().await;
    let south = app.create_village().await;
    let gate = GateId::new();
    let body = json!({ "logs": [gate_log(gate, base_time(), Some("ABC 123"))] });

    let first = app
        .request("POST", SYNC, Some(body.clone()), Some(&app.token_for(north.guard)))
        .await;
    let second = app
        .request("POST", SYNC, Some(body), Some(&app.token_for(south.guard)))
        .await;

    assert_eq!(first.count("inserted"), 1);
    assert_eq!(second.count("inserted"), 1);
    assert_eq!(second.count("duplicates"), 0);
}
