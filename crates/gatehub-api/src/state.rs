//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use gatehub_auth::{JwtDecoder, ProfileResolver};
use gatehub_core::config::AppConfig;
use gatehub_database::{ApprovalStore, DatabasePool, GateLogStore, ProfileStore};
use gatehub_service::approval::ApprovalCoordinator;
use gatehub_service::notification::NotificationDispatcher;
use gatehub_service::sync::SyncEngine;

/// The store implementations the application runs on.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Entry/exit log store.
    pub gate_logs: Arc<dyn GateLogStore>,
    /// Guest approval store.
    pub approvals: Arc<dyn ApprovalStore>,
    /// Caller profile store.
    pub profiles: Arc<dyn ProfileStore>,
}

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool, absent with the in-memory provider
    pub db_pool: Option<DatabasePool>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Caller profile resolver
    pub profile_resolver: Arc<ProfileResolver>,

    // ── Services ─────────────────────────────────────────────
    /// Offline gate log sync
    pub sync_engine: Arc<SyncEngine>,
    /// Guest approval coordination
    pub approval_coordinator: Arc<ApprovalCoordinator>,
}

impl AppState {
    /// Wires services over the given stores and notification channel.
    pub fn new(
        config: AppConfig,
        stores: Stores,
        notifier: Arc<dyn NotificationDispatcher>,
        db_pool: Option<DatabasePool>,
    ) -> Self {
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let profile_resolver = Arc::new(ProfileResolver::new(stores.profiles));
        let sync_engine = Arc::new(SyncEngine::new(stores.gate_logs, &config.sync));
        let approval_coordinator = Arc::new(ApprovalCoordinator::new(
            stores.approvals,
            notifier,
            &config.approval,
        ));

        Self {
            config: Arc::new(config),
            db_pool,
            jwt_decoder,
            profile_resolver,
            sync_engine,
            approval_coordinator,
        }
    }
}
