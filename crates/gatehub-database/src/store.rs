//! Store traits the service layer depends on.
//!
//! Each trait has a PostgreSQL implementation in [`crate::repositories`]
//! and an in-memory implementation in [`crate::memory`]. Every method that
//! reads existing rows takes the tenant explicitly.

use std::collections::HashSet;
use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use gatehub_core::result::AppResult;
use gatehub_core::types::{ApprovalRequestId, TenantId, UserId};
use gatehub_entity::approval::{ApprovalStatus, CreateApprovalRequest, GuestApprovalRequest};
use gatehub_entity::gate_log::{EntryExitLog, NaturalKey, NewEntryExitLog};
use gatehub_entity::profile::Profile;

/// Persistence for entry/exit logs.
#[async_trait]
pub trait GateLogStore: Send + Sync + Debug + 'static {
    /// Natural keys of the tenant's stored logs whose timestamp is in `timestamps`.
    async fn find_existing_keys(
        &self,
        tenant_id: TenantId,
        timestamps: &[DateTime<Utc>],
    ) -> AppResult<HashSet<NaturalKey>>;

    /// Insert all `logs` in one operation and return the rows actually written.
    ///
    /// Rows rejected by the natural-key uniqueness constraint are skipped,
    /// so the returned list may be shorter than the input. Any other failure
    /// fails the whole call and nothing is written.
    async fn insert_batch(&self, logs: &[NewEntryExitLog]) -> AppResult<Vec<EntryExitLog>>;
}

/// Persistence for guest approval requests.
#[async_trait]
pub trait ApprovalStore: Send + Sync + Debug + 'static {
    /// Insert a new pending request.
    async fn create(&self, data: &CreateApprovalRequest) -> AppResult<GuestApprovalRequest>;

    /// Find a request within a tenant.
    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: ApprovalRequestId,
    ) -> AppResult<Option<GuestApprovalRequest>>;

    /// Move a request out of `pending` if it is still pending and not past
    /// its deadline at `now`. Returns `None` when no row qualified.
    async fn resolve(
        &self,
        tenant_id: TenantId,
        id: ApprovalRequestId,
        status: ApprovalStatus,
        responded_by: UserId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<GuestApprovalRequest>>;

    /// Mark every pending request whose deadline is before `now` as expired.
    /// Returns the number of rows changed.
    async fn expire_overdue(&self, now: DateTime<Utc>) -> AppResult<u64>;
}

/// Read access to caller profiles.
#[async_trait]
pub trait ProfileStore: Send + Sync + Debug + 'static {
    /// Look up the profile of an authenticated user.
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Profile>>;
}
