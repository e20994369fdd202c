//! In-memory guest approval store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use gatehub_core::result::AppResult;
use gatehub_core::types::{ApprovalRequestId, TenantId, UserId};
use gatehub_entity::approval::{ApprovalStatus, CreateApprovalRequest, GuestApprovalRequest};

use crate::store::ApprovalStore;

/// Approval request table keyed by request id.
#[derive(Debug, Default)]
pub struct InMemoryApprovalStore {
    requests: RwLock<HashMap<ApprovalRequestId, GuestApprovalRequest>>,
}

impl InMemoryApprovalStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored requests across all tenants.
    pub async fn len(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Whether no requests are stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ApprovalStore for InMemoryApprovalStore {
    async fn create(&self, data: &CreateApprovalRequest) -> AppResult<GuestApprovalRequest> {
        let request = GuestApprovalRequest {
            id: ApprovalRequestId::new(),
            tenant_id: data.tenant_id,
            household_id: data.household_id,
            guest_name: data.guest_name.clone(),
            vehicle_plate: data.vehicle_plate.clone(),
            gate_id: data.gate_id,
            guard_id: data.guard_id,
            status: ApprovalStatus::Pending,
            responded_by: None,
            responded_at: None,
            created_at: data.created_at,
            timeout_at: data.timeout_at,
        };
        self.requests
            .write()
            .await
            .insert(request.id, request.clone());
        Ok(request)
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: ApprovalRequestId,
    ) -> AppResult<Option<GuestApprovalRequest>> {
        Ok(self
            .requests
            .read()
            .await
            .get(&id)
            .filter(|request| request.tenant_id == tenant_id)
            .cloned())
    }

    async fn resolve(
        &self,
        tenant_id: TenantId,
        id: ApprovalRequestId,
        status: ApprovalStatus,
        responded_by: UserId,
        now: DateTime<Utc>,
    ) -> AppResult<Option<GuestApprovalRequest>> {
        let mut requests = self.requests.write().await;
        let Some(request) = requests.get_mut(&id) else {
            return Ok(None);
        };
        if request.tenant_id != tenant_id
            || request.status != ApprovalStatus::Pending
            || request.timeout_at < now
        {
            return Ok(None);
        }

        request.status = status;
        request.responded_by = Some(responded_by);
        request.responded_at = Some(now);
        Ok(Some(request.clone()))
    }

    async fn expire_overdue(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut requests = self.requests.write().await;
        let mut expired = 0;
        for request in requests.values_mut() {
            if request.status == ApprovalStatus::Pending && request.timeout_at < now {
                request.status = ApprovalStatus::Expired;
                expired += 1;
            }
        }
        Ok(expired)
    }
}
