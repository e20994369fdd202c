//! Entry/exit log repository implementation.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use gatehub_core::error::{AppError, ErrorKind};
use gatehub_core::result::AppResult;
use gatehub_core::types::{GateId, TenantId};
use gatehub_entity::gate_log::{EntryExitLog, NaturalKey, NewEntryExitLog};

use crate::store::GateLogStore;

const INSERT_COLUMNS: &str = "INSERT INTO entry_exit_logs \
    (tenant_id, gate_id, entry_type, direction, timestamp, sticker_id, guest_id, \
     permit_id, guard_on_duty_id, vehicle_plate, purpose, notes) ";

/// Repository for entry/exit logs.
#[derive(Debug, Clone)]
pub struct GateLogRepository {
    pool: PgPool,
}

impl GateLogRepository {
    /// Create a new gate log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GateLogStore for GateLogRepository {
    async fn find_existing_keys(
        &self,
        tenant_id: TenantId,
        timestamps: &[DateTime<Utc>],
    ) -> AppResult<HashSet<NaturalKey>> {
        if timestamps.is_empty() {
            return Ok(HashSet::new());
        }

        let rows = sqlx::query_as::<_, (DateTime<Utc>, GateId, Option<String>)>(
            "SELECT timestamp, gate_id, vehicle_plate FROM entry_exit_logs \
             WHERE tenant_id = $1 AND timestamp = ANY($2)",
        )
        .bind(tenant_id)
        .bind(timestamps)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to look up existing gate logs", e)
        })?;

        Ok(rows
            .into_iter()
            .map(|(timestamp, gate_id, plate)| NaturalKey::new(timestamp, gate_id, plate))
            .collect())
    }

    async fn insert_batch(&self, logs: &[NewEntryExitLog]) -> AppResult<Vec<EntryExitLog>> {
        if logs.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(INSERT_COLUMNS);
        builder.push_values(logs, |mut row, log| {
            row.push_bind(log.tenant_id)
                .push_bind(log.gate_id)
                .push_bind(log.entry_type)
                .push_bind(log.direction)
                .push_bind(log.timestamp)
                .push_bind(log.sticker_id)
                .push_bind(log.guest_id)
                .push_bind(log.permit_id)
                .push_bind(log.guard_on_duty_id)
                .push_bind(log.vehicle_plate.clone())
                .push_bind(log.purpose.clone())
                .push_bind(log.notes.clone());
        });
        // The natural-key unique index catches rows a concurrent sync inserted
        // after our duplicate check.
        builder.push(" ON CONFLICT DO NOTHING RETURNING *");

        builder
            .build_query_as::<EntryExitLog>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to insert gate log batch: {e}"),
                    e,
                )
            })
    }
}
