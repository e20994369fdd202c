//! GateHub Server — gate operations core for multi-tenant HOAs
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use gatehub_api::{AppState, Stores, build_app};
use gatehub_core::config::{AppConfig, DatabaseProvider};
use gatehub_core::error::AppError;
use gatehub_database::DatabasePool;
use gatehub_database::memory::{InMemoryApprovalStore, InMemoryGateLogStore, InMemoryProfileStore};
use gatehub_database::repositories::{ApprovalRepository, GateLogRepository, ProfileRepository};
use gatehub_entity::profile::Profile;
use gatehub_service::notification::{NoopDispatcher, NotificationDispatcher, WebhookDispatcher};
use gatehub_worker::scheduler::CronScheduler;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and `GATEHUB__*` environment variables
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("GATEHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting GateHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Stores ───────────────────────────────────────────
    let (stores, db_pool) = open_stores(&config).await?;

    // ── Step 2: Household notifications ──────────────────────────
    let notifier: Arc<dyn NotificationDispatcher> = match &config.notifications.webhook_url {
        Some(url) => {
            tracing::info!(url = %url, "Guest arrival notifications go to webhook");
            Arc::new(WebhookDispatcher::new(url.clone(), &config.notifications)?)
        }
        None => {
            tracing::warn!("No notification webhook configured, households will not be alerted");
            Arc::new(NoopDispatcher)
        }
    };

    // ── Step 3: Start background scheduler ───────────────────────
    let mut scheduler = if config.worker.enabled {
        tracing::info!("Starting background scheduler...");
        let scheduler = CronScheduler::new().await?;
        scheduler
            .register_default_tasks(&config.worker, Arc::clone(&stores.approvals))
            .await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Background scheduler disabled");
        None
    };

    // ── Step 4: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let app_state = AppState::new(config, stores, notifier, db_pool.clone());
    let app = build_app(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("GateHub server listening on {}", addr);

    // ── Step 5: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 6: Stop background work and release connections ─────
    if let Some(scheduler) = scheduler.as_mut() {
        match tokio::time::timeout(grace, scheduler.shutdown()).await {
            Ok(Err(e)) => tracing::warn!("Scheduler shutdown failed: {}", e),
            Err(_) => tracing::warn!("Scheduler did not stop within {:?}", grace),
            Ok(Ok(())) => {}
        }
    }

    if let Some(pool) = db_pool {
        pool.close().await;
    }

    tracing::info!("GateHub server shut down gracefully");
    Ok(())
}

/// Open the configured store backend
async fn open_stores(config: &AppConfig) -> Result<(Stores, Option<DatabasePool>), AppError> {
    match config.database.provider {
        DatabaseProvider::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;

            if config.database.run_migrations {
                gatehub_database::migration::run_migrations(pool.pool()).await?;
            }

            let stores = Stores {
                gate_logs: Arc::new(GateLogRepository::new(pool.pool().clone())),
                approvals: Arc::new(ApprovalRepository::new(pool.pool().clone())),
                profiles: Arc::new(ProfileRepository::new(pool.pool().clone())),
            };
            Ok((stores, Some(pool)))
        }
        DatabaseProvider::Memory => {
            tracing::warn!("Using in-memory stores, data is lost on restart");

            let profiles = InMemoryProfileStore::new();
            if let Some(path) = &config.database.memory_seed_path {
                let seeded = seed_profiles(&profiles, path).await?;
                tracing::info!(path = %path, profiles = seeded, "Seeded in-memory profiles");
            }

            let stores = Stores {
                gate_logs: Arc::new(InMemoryGateLogStore::new()),
                approvals: Arc::new(InMemoryApprovalStore::new()),
                profiles: Arc::new(profiles),
            };
            Ok((stores, None))
        }
    }
}

/// Load a JSON array of profiles into the in-memory profile store
async fn seed_profiles(store: &InMemoryProfileStore, path: &str) -> Result<usize, AppError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::configuration(format!("Failed to read '{path}': {e}")))?;

    let profiles: Vec<Profile> = serde_json::from_str(&raw)
        .map_err(|e| AppError::configuration(format!("Invalid profile seed '{path}': {e}")))?;

    let count = profiles.len();
    for profile in profiles {
        store.upsert(profile).await;
    }
    Ok(count)
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
