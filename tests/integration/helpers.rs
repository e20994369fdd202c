//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use chrono::{DateTime, Duration, Utc};
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use gatehub_api::{AppState, Stores, build_app};
use gatehub_auth::JwtEncoder;
use gatehub_core::config::{AppConfig, DatabaseProvider};
use gatehub_core::result::AppResult;
use gatehub_core::types::{GateId, HouseholdId, TenantId, UserId};
use gatehub_database::memory::{InMemoryApprovalStore, InMemoryGateLogStore, InMemoryProfileStore};
use gatehub_entity::approval::GuestApprovalRequest;
use gatehub_entity::profile::{Profile, UserRole};
use gatehub_service::notification::NotificationDispatcher;

/// Records every guest-arrival notice it is asked to deliver
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: AtomicUsize,
}

impl RecordingNotifier {
    /// Number of notices delivered so far
    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingNotifier {
    async fn notify_guest_arrival(&self, _request: &GuestApprovalRequest) -> AppResult<bool> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }
}

/// A tenant with one guard and one household
#[derive(Debug, Clone, Copy)]
pub struct Village {
    pub tenant_id: TenantId,
    pub household_id: HouseholdId,
    pub guard: UserId,
    pub resident: UserId,
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Gate log store behind the router
    pub gate_logs: Arc<InMemoryGateLogStore>,
    /// Approval store behind the router
    pub approvals: Arc<InMemoryApprovalStore>,
    /// Profile store behind the router
    pub profiles: Arc<InMemoryProfileStore>,
    /// Notification channel behind the router
    pub notifier: Arc<RecordingNotifier>,
    /// Signs tokens the router accepts
    pub encoder: JwtEncoder,
}

impl TestApp {
    /// Create a new test application over in-memory stores
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.provider = DatabaseProvider::Memory;
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.auth.leeway_seconds = 0;
        config.worker.enabled = false;
        config.validate().expect("test config is valid");

        let gate_logs = Arc::new(InMemoryGateLogStore::new());
        let approvals = Arc::new(InMemoryApprovalStore::new());
        let profiles = Arc::new(InMemoryProfileStore::new());
        let notifier = Arc::new(RecordingNotifier::default());

        let stores = Stores {
            gate_logs: gate_logs.clone(),
            approvals: approvals.clone(),
            profiles: profiles.clone(),
        };

        let encoder = JwtEncoder::new(&config.auth);
        let state = AppState::new(config.clone(), stores, notifier.clone(), None);
        let router = build_app(state);

        Self {
            router,
            config,
            gate_logs,
            approvals,
            profiles,
            notifier,
            encoder,
        }
    }

    /// Register a profile and return its user id
    pub async fn create_profile(
        &self,
        tenant_id: Option<TenantId>,
        household_id: Option<HouseholdId>,
        role: UserRole,
    ) -> UserId {
        let id = UserId::new();
        self.profiles
            .upsert(Profile {
                id,
                tenant_id,
                household_id,
                role,
            })
            .await;
        id
    }

    /// Register a guard and a household head in a fresh tenant
    pub async fn create_village(&self) -> Village {
        let tenant_id = TenantId::new();
        let household_id = HouseholdId::new();
        let guard = self
            .create_profile(Some(tenant_id), None, UserRole::SecurityOfficer)
            .await;
        let resident = self
            .create_profile(Some(tenant_id), Some(household_id), UserRole::HouseholdHead)
            .await;

        Village {
            tenant_id,
            household_id,
            guard,
            resident,
        }
    }

    /// Mint a valid access token for `user_id`
    pub fn token_for(&self, user_id: UserId) -> String {
        self.encoder
            .generate_access_token(user_id)
            .expect("Failed to sign token")
            .0
    }

    /// Mint a token that expired an hour ago
    pub fn expired_token_for(&self, user_id: UserId) -> String {
        let issued = Utc::now() - Duration::hours(2);
        self.encoder
            .sign(user_id, issued, issued + Duration::hours(1))
            .expect("Failed to sign token")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.send(method, path, body_str, token).await
    }

    /// Make an HTTP request with a raw, possibly malformed, body
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        body: &str,
        token: Option<&str>,
    ) -> TestResponse {
        self.send(method, path, body.to_string(), token).await
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        body: String,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Numeric field from the body
    pub fn count(&self, field: &str) -> u64 {
        self.body
            .get(field)
            .and_then(Value::as_u64)
            .unwrap_or_else(|| panic!("missing numeric field '{field}' in {:?}", self.body))
    }

    /// String field from the body
    pub fn text(&self, field: &str) -> &str {
        self.body
            .get(field)
            .and_then(Value::as_str)
            .unwrap_or_else(|| panic!("missing string field '{field}' in {:?}", self.body))
    }
}

/// A gate log submission as a device would upload it
pub fn gate_log(gate_id: GateId, timestamp: DateTime<Utc>, plate: Option<&str>) -> Value {
    serde_json::json!({
        "gate_id": gate_id,
        "entry_type": "resident",
        "direction": "entry",
        "timestamp": timestamp,
        "vehicle_plate": plate,
    })
}

/// `count` distinct submissions one second apart at a single gate
pub fn distinct_logs(gate_id: GateId, count: usize) -> Vec<Value> {
    let start = base_time();
    (0..count)
        .map(|i| gate_log(gate_id, start + Duration::seconds(i as i64), Some("ABC 123")))
        .collect()
}

/// Fixed instant used for device timestamps
pub fn base_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_714_550_400, 0).expect("valid timestamp")
}
