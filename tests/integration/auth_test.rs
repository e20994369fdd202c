//! Integration tests for caller authentication and identity resolution.

mod helpers;

use http::StatusCode;
use serde_json::json;

use gatehub_core::types::{GateId, TenantId, UserId};
use gatehub_entity::profile::UserRole;

use helpers::{TestApp, distinct_logs};

const SYNC: &str = "/api/gate-logs/sync";

fn sync_body() -> serde_json::Value {
    json!({ "logs": distinct_logs(GateId::new(), 1) })
}

#[tokio::test]
async fn test_missing_token_is_unauthenticated() {
    let app = TestApp::new().await;

    let response = app.request("POST", SYNC, Some(sync_body()), None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.text("error"), "AUTHENTICATION_REQUIRED");
}

#[tokio::test]
async fn test_garbage_token_is_unauthenticated() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", SYNC, Some(sync_body()), Some("not.a.jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_unauthenticated() {
    let app = TestApp::new().await;
    let village = app.create_village().await;

    let response = app
        .request(
            "POST",
            SYNC,
            Some(sync_body()),
            Some(&app.expired_token_for(village.guard)),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.text("message"), "Token has expired");
    assert!(app.gate_logs.is_empty().await);
}

#[tokio::test]
async fn test_token_signed_with_another_secret_is_unauthenticated() {
    let app = TestApp::new().await;
    let village = app.create_village().await;

    let mut foreign = app.config.auth.clone();
    foreign.jwt_secret = "some-other-secret".to_string();
    let token = gatehub_auth::JwtEncoder::new(&foreign)
        .generate_access_token(village.guard)
        .expect("sign")
        .0;

    let response = app
        .request("POST", SYNC, Some(sync_body()), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_without_profile_is_forbidden() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            SYNC,
            Some(sync_body()),
            Some(&app.token_for(UserId::new())),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.text("error"), "AUTHORIZATION_DENIED");
}

#[tokio::test]
async fn test_profile_without_tenant_is_forbidden() {
    let app = TestApp::new().await;
    let superadmin = app.create_profile(None, None, UserRole::Superadmin).await;

    let response = app
        .request(
            "POST",
            SYNC,
            Some(sync_body()),
            Some(&app.token_for(superadmin)),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(app.gate_logs.is_empty().await);
}

#[tokio::test]
async fn test_guard_without_tenant_is_forbidden() {
    let app = TestApp::new().await;
    let guard = app
        .create_profile(None, None, UserRole::SecurityOfficer)
        .await;

    let response = app
        .request("POST", SYNC, Some(sync_body()), Some(&app.token_for(guard)))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_security_head_may_sync() {
    let app = TestApp::new().await;
    let head = app
        .create_profile(Some(TenantId::new()), None, UserRole::SecurityHead)
        .await;

    let response = app
        .request("POST", SYNC, Some(sync_body()), Some(&app.token_for(head)))
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_endpoints_need_no_token() {
    let app = TestApp::new().await;

    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.text("status"), "ok");

    let ready = app.request("GET", "/api/health/ready", None, None).await;
    assert_eq!(ready.status, StatusCode::OK);
    assert_eq!(ready.text("status"), "ready");
    assert_eq!(ready.text("database"), "memory");
}
