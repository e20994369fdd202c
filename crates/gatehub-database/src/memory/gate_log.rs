//! In-memory entry/exit log store.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use gatehub_core::error::AppError;
use gatehub_core::result::AppResult;
use gatehub_core::types::{GateLogId, TenantId};
use gatehub_entity::gate_log::{EntryExitLog, NaturalKey, NewEntryExitLog};

use crate::store::GateLogStore;

#[derive(Debug, Default)]
struct Table {
    rows: Vec<EntryExitLog>,
    unique: HashSet<(TenantId, NaturalKey)>,
}

/// Gate log table with a natural-key unique index.
#[derive(Debug, Default)]
pub struct InMemoryGateLogStore {
    table: RwLock<Table>,
    insert_calls: AtomicUsize,
    failing_calls: Mutex<HashSet<usize>>,
}

impl InMemoryGateLogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows across all tenants.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    /// Whether no rows are stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Stored rows belonging to one tenant.
    pub async fn rows_for(&self, tenant_id: TenantId) -> Vec<EntryExitLog> {
        self.table
            .read()
            .await
            .rows
            .iter()
            .filter(|row| row.tenant_id == tenant_id)
            .cloned()
            .collect()
    }

    /// How many times `insert_batch` has been called.
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    /// Make the `call`-th (1-based) `insert_batch` call fail without writing.
    pub async fn fail_insert_call(&self, call: usize) {
        self.failing_calls.lock().await.insert(call);
    }
}

#[async_trait]
impl GateLogStore for InMemoryGateLogStore {
    async fn find_existing_keys(
        &self,
        tenant_id: TenantId,
        timestamps: &[DateTime<Utc>],
    ) -> AppResult<HashSet<NaturalKey>> {
        let wanted: HashSet<&DateTime<Utc>> = timestamps.iter().collect();
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|row| row.tenant_id == tenant_id && wanted.contains(&row.timestamp))
            .map(EntryExitLog::natural_key)
            .collect())
    }

    async fn insert_batch(&self, logs: &[NewEntryExitLog]) -> AppResult<Vec<EntryExitLog>> {
        let call = self.insert_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failing_calls.lock().await.contains(&call) {
            return Err(AppError::database(format!(
                "insert call {call} rejected by store"
            )));
        }

        let now = Utc::now();
        let mut table = self.table.write().await;
        let mut inserted = Vec::with_capacity(logs.len());

        for log in logs {
            if !table.unique.insert((log.tenant_id, log.natural_key())) {
                debug!(gate_id = %log.gate_id, "Skipping row that violates the natural key");
                continue;
            }
            let row = EntryExitLog {
                id: GateLogId::new(),
                tenant_id: log.tenant_id,
                gate_id: log.gate_id,
                entry_type: log.entry_type,
                direction: log.direction,
                timestamp: log.timestamp,
                sticker_id: log.sticker_id,
                guest_id: log.guest_id,
                permit_id: log.permit_id,
                guard_on_duty_id: Some(log.guard_on_duty_id),
                vehicle_plate: log.vehicle_plate.clone(),
                purpose: log.purpose.clone(),
                notes: log.notes.clone(),
                created_at: now,
            };
            table.rows.push(row.clone());
            inserted.push(row);
        }

        Ok(inserted)
    }
}
