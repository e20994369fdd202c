//! Batched ingestion of device-captured entry/exit logs.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use gatehub_auth::{GatePermission, RbacEnforcer};
use gatehub_core::config::SyncConfig;
use gatehub_core::error::AppError;
use gatehub_core::result::AppResult;
use gatehub_core::types::TenantId;
use gatehub_database::GateLogStore;
use gatehub_entity::gate_log::{GateLogSubmission, NaturalKey, NewEntryExitLog};

use super::result::{BatchErrorDetail, SyncResult};
use crate::context::RequestContext;

/// Deduplicates and persists uploaded gate logs in bounded batches.
///
/// Batches run sequentially and independently: a store failure in one batch
/// is recorded in the result and the next batch still runs.
#[derive(Debug, Clone)]
pub struct SyncEngine {
    /// Gate log store.
    logs: Arc<dyn GateLogStore>,
    /// Role policy.
    rbac: RbacEnforcer,
    /// Records per insert operation.
    batch_size: usize,
    /// Upper bound on records per call.
    max_logs_per_request: usize,
}

impl SyncEngine {
    /// Creates a new sync engine.
    pub fn new(logs: Arc<dyn GateLogStore>, config: &SyncConfig) -> Self {
        Self {
            logs,
            rbac: RbacEnforcer::new(),
            batch_size: config.batch_size.max(1),
            max_logs_per_request: config.max_logs_per_request,
        }
    }

    /// Syncs `submissions` for the caller's tenant.
    ///
    /// Authorization and payload errors abort the call before anything is
    /// read or written. Store failures never abort; they are counted.
    pub async fn sync_logs(
        &self,
        ctx: &RequestContext,
        submissions: Vec<GateLogSubmission>,
    ) -> AppResult<SyncResult> {
        self.rbac
            .require_permission(&ctx.role, GatePermission::SyncGateLogs)?;

        if submissions.is_empty() {
            return Err(AppError::validation("logs must contain at least one record"));
        }
        if submissions.len() > self.max_logs_per_request {
            return Err(AppError::validation(format!(
                "logs must contain at most {} records, got {}",
                self.max_logs_per_request,
                submissions.len()
            )));
        }

        let mut result = SyncResult::new(submissions.len());
        let candidates: Vec<NewEntryExitLog> = submissions
            .into_iter()
            .map(|s| NewEntryExitLog::from_submission(s, ctx.tenant_id, ctx.user_id))
            .collect();

        for (index, batch) in candidates.chunks(self.batch_size).enumerate() {
            self.process_batch(ctx.tenant_id, index, batch, &mut result)
                .await;
        }

        info!(
            tenant_id = %ctx.tenant_id,
            user_id = %ctx.user_id,
            total = result.total,
            inserted = result.inserted,
            duplicates = result.duplicates,
            errors = result.errors,
            "Gate log sync completed"
        );

        Ok(result)
    }

    async fn process_batch(
        &self,
        tenant_id: TenantId,
        index: usize,
        batch: &[NewEntryExitLog],
        result: &mut SyncResult,
    ) {
        let timestamps: Vec<_> = batch.iter().map(|log| log.timestamp).collect();
        let existing = match self.logs.find_existing_keys(tenant_id, &timestamps).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!(batch = index, size = batch.len(), error = %e, "Duplicate lookup failed");
                record_failure(result, batch, &e);
                return;
            }
        };

        let (survivors, duplicates) = partition_new(batch, &existing);
        result.duplicates += duplicates;

        debug!(
            batch = index,
            size = batch.len(),
            survivors = survivors.len(),
            duplicates,
            "Processing gate log batch"
        );

        if survivors.is_empty() {
            return;
        }

        match self.logs.insert_batch(&survivors).await {
            Ok(rows) => {
                let confirmed = rows.len().min(survivors.len());
                result.inserted += confirmed;
                // Rows a concurrent sync stored between lookup and insert.
                result.duplicates += survivors.len() - confirmed;
            }
            Err(e) => {
                warn!(batch = index, size = survivors.len(), error = %e, "Gate log batch insert failed");
                record_failure(result, &survivors, &e);
            }
        }
    }
}

/// Splits a batch into records to insert and a count of duplicates.
///
/// A record is a duplicate if its key is already stored or appeared earlier
/// in the same batch; the first occurrence wins.
fn partition_new(
    batch: &[NewEntryExitLog],
    existing: &HashSet<NaturalKey>,
) -> (Vec<NewEntryExitLog>, usize) {
    let mut seen = HashSet::with_capacity(batch.len());
    let mut survivors = Vec::with_capacity(batch.len());
    let mut duplicates = 0;

    for log in batch {
        let key = log.natural_key();
        if existing.contains(&key) || !seen.insert(key) {
            duplicates += 1;
        } else {
            survivors.push(log.clone());
        }
    }

    (survivors, duplicates)
}

fn record_failure(result: &mut SyncResult, failed: &[NewEntryExitLog], error: &AppError) {
    result.errors += failed.len();
    if let Some(sample) = failed.first() {
        result.error_details.push(BatchErrorDetail {
            log: sample.clone(),
            error: error.message.clone(),
        });
    }
}
