//! Guest approval request repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use gatehub_core::error::{AppError, ErrorKind};
use gatehub_core::result::AppResult;
use gatehub_core::types::{ApprovalRequestId, TenantId, UserId};
use gatehub_entity::approval::{ApprovalStatus, CreateApprovalRequest, GuestApprovalRequest};

use crate::store::ApprovalStore;

/// Repository for guest approval requests.
#[derive(Debug, Clone)]
pub struct ApprovalRepository {
    pool: PgPool,
}

impl ApprovalRepository {
    /// Create a new approval repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApprovalStore for ApprovalRepository {
    async fn create(&self, data: &CreateApprovalRequest) -> AppResult<GuestApprovalRequest> {
        sqlx::query_as::<_, GuestApprovalRequest>(
            "INSERT INTO guest_approval_requests \
             (tenant_id, household_id, guest_name, vehicle_plate, gate_id, guard_id, status, created_at, timeout_at) \
             VALUES ($1, $2, $3, $4, $5, $6, 'pending', $7, $8) RETURNING *",
        )
        .bind(data.tenant_id)
        .bind(data.household_id)
        .bind(&data.guest_name)
        .bind(&data.vehicle_plate)
        .bind(data.gate_id)
        .bind(data.guard_id)
        .bind(data.created_at)
        .bind(data.timeout_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to create approval request: {e}"),
                e,
            )
        })
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: ApprovalRequestId,
    ) -> AppResult<Option<GuestApprovalRequest>> {
        sqlx::query_as::<_, GuestApprovalRequest>(
            "SELECT * FROM guest_approval_requests WHERE tenant_id = $1 AND id = $2",
        )
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find approval request", e)
        })
    }

    async fn resolve(
        &self,
        tenant_id: TenantId,
        id: ApprovalRequestId,
        status: ApprovalStatus,
        responded_by: UserId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<GuestApprovalRequest>> {
        sqlx::query_as::<_, GuestApprovalRequest>(
            "UPDATE guest_approval_requests \
             SET status = $3, responded_by = $4, responded_at = $5 \
             WHERE tenant_id = $1 AND id = $2 AND status = 'pending' AND timeout_at >= $5 \
             RETURNING *",
        )
        .bind(tenant_id)
        .bind(id)
        .bind(status)
        .bind(responded_by)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to resolve approval request", e)
        })
    }

    async fn expire_overdue(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE guest_approval_requests SET status = 'expired' \
             WHERE status = 'pending' AND timeout_at < $1",
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to expire approval requests", e)
        })?;
        Ok(result.rows_affected())
    }
}
