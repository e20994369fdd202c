//! Time-boxed guest approval requests.

use std::sync::Arc;

use chrono::{Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use gatehub_auth::{GatePermission, RbacEnforcer};
use gatehub_core::config::ApprovalConfig;
use gatehub_core::error::AppError;
use gatehub_core::result::AppResult;
use gatehub_core::types::{ApprovalRequestId, GateId, HouseholdId};
use gatehub_database::ApprovalStore;
use gatehub_entity::approval::{
    ApprovalDecision, ApprovalStatus, CreateApprovalRequest, GuestApprovalRequest,
};

use crate::context::RequestContext;
use crate::notification::NotificationDispatcher;

/// A guard's request to admit a guest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestApprovalInput {
    /// Household the guest is visiting.
    pub household_id: HouseholdId,
    /// Name the guest gave.
    pub guest_name: String,
    /// Guest vehicle plate.
    pub vehicle_plate: Option<String>,
    /// Gate the guest is waiting at.
    pub gate_id: GateId,
}

/// Outcome of raising a request.
#[derive(Debug, Clone, Serialize)]
pub struct ApprovalTicket {
    /// The stored pending request.
    pub request: GuestApprovalRequest,
    /// Length of the decision window.
    pub timeout_seconds: u64,
    /// Whether the household notification went out.
    pub notification_sent: bool,
}

/// A request as observed at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct ApprovalView {
    /// The stored request.
    pub request: GuestApprovalRequest,
    /// Status with deadline expiry applied.
    pub status: ApprovalStatus,
    /// Whole seconds left to decide.
    pub seconds_remaining: i64,
}

/// Creates guest approval requests and records household decisions.
///
/// Expiry is never driven by a timer here: a pending request past its
/// deadline reads as expired and can no longer be decided.
#[derive(Debug, Clone)]
pub struct ApprovalCoordinator {
    /// Approval request store.
    approvals: Arc<dyn ApprovalStore>,
    /// Household notification channel.
    notifier: Arc<dyn NotificationDispatcher>,
    /// Role policy.
    rbac: RbacEnforcer,
    /// Decision window.
    timeout_seconds: u64,
}

impl ApprovalCoordinator {
    /// Creates a new approval coordinator.
    pub fn new(
        approvals: Arc<dyn ApprovalStore>,
        notifier: Arc<dyn NotificationDispatcher>,
        config: &ApprovalConfig,
    ) -> Self {
        Self {
            approvals,
            notifier,
            rbac: RbacEnforcer::new(),
            timeout_seconds: config.timeout_seconds,
        }
    }

    /// Checks that the caller may raise approval requests at all.
    pub fn authorize_request(&self, ctx: &RequestContext) -> AppResult<()> {
        self.rbac
            .require_permission(&ctx.role, GatePermission::RequestGuestApproval)
    }

    /// Raises a pending request and notifies the household.
    ///
    /// A notification failure is logged and reported through
    /// `notification_sent`; the request stays pending either way.
    pub async fn request_approval(
        &self,
        ctx: &RequestContext,
        input: GuestApprovalInput,
    ) -> AppResult<ApprovalTicket> {
        self.authorize_request(ctx)?;

        let guest_name = input.guest_name.trim();
        if guest_name.is_empty() {
            return Err(AppError::validation("guest_name must not be blank"));
        }

        let created_at = Utc::now().trunc_subsecs(6);
        let timeout_at = i64::try_from(self.timeout_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|window| created_at.checked_add_signed(window))
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "approval timeout of {}s is out of range",
                    self.timeout_seconds
                ))
            })?;
        let data = CreateApprovalRequest {
            tenant_id: ctx.tenant_id,
            household_id: input.household_id,
            guest_name: guest_name.to_string(),
            vehicle_plate: input.vehicle_plate.filter(|p| !p.trim().is_empty()),
            gate_id: input.gate_id,
            guard_id: ctx.user_id,
            created_at,
            timeout_at,
        };

        let request = self.approvals.create(&data).await?;

        let notification_sent = match self.notifier.notify_guest_arrival(&request).await {
            Ok(sent) => sent,
            Err(e) => {
                warn!(
                    approval_request_id = %request.id,
                    household_id = %request.household_id,
                    error = %e,
                    "Guest arrival notification failed"
                );
                false
            }
        };

        info!(
            approval_request_id = %request.id,
            tenant_id = %ctx.tenant_id,
            household_id = %request.household_id,
            guard_id = %ctx.user_id,
            notification_sent,
            "Guest approval requested"
        );

        Ok(ApprovalTicket {
            request,
            timeout_seconds: self.timeout_seconds,
            notification_sent,
        })
    }

    /// Reads a request of the caller's tenant.
    ///
    /// Security staff may read any request; household roles only their own
    /// household's.
    pub async fn get_status(
        &self,
        ctx: &RequestContext,
        id: ApprovalRequestId,
    ) -> AppResult<ApprovalView> {
        self.rbac
            .require_permission(&ctx.role, GatePermission::ViewGuestApproval)?;

        let request = self.find(ctx, id).await?;
        if !ctx.role.is_security() && !ctx.belongs_to_household(request.household_id) {
            return Err(AppError::authorization(
                "Approval request belongs to another household",
            ));
        }

        let now = Utc::now();
        Ok(ApprovalView {
            status: request.effective_status(now),
            seconds_remaining: request.seconds_remaining(now),
            request,
        })
    }

    /// Records a household decision while the request is still open.
    ///
    /// Fails with a conflict if the deadline has passed or the request was
    /// already resolved.
    pub async fn decide(
        &self,
        ctx: &RequestContext,
        id: ApprovalRequestId,
        decision: ApprovalDecision,
    ) -> AppResult<GuestApprovalRequest> {
        self.rbac
            .require_permission(&ctx.role, GatePermission::DecideGuestApproval)?;

        let request = self.find(ctx, id).await?;
        if !ctx.belongs_to_household(request.household_id) {
            return Err(AppError::authorization(
                "Only members of the visited household may decide",
            ));
        }

        let now = Utc::now();
        ensure_open(&request, now)?;

        let resolved = self
            .approvals
            .resolve(ctx.tenant_id, id, decision.into(), ctx.user_id, now)
            .await?;

        match resolved {
            Some(resolved) => {
                info!(
                    approval_request_id = %id,
                    household_id = %resolved.household_id,
                    responded_by = %ctx.user_id,
                    status = %resolved.status,
                    "Guest approval decided"
                );
                Ok(resolved)
            }
            None => {
                // Lost a race against another decision or the deadline.
                let current = self.find(ctx, id).await?;
                ensure_open(&current, now)?;
                Err(AppError::conflict("Approval request could not be updated"))
            }
        }
    }

    async fn find(
        &self,
        ctx: &RequestContext,
        id: ApprovalRequestId,
    ) -> AppResult<GuestApprovalRequest> {
        self.approvals
            .find_by_id(ctx.tenant_id, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Approval request {id} not found")))
    }
}

fn ensure_open(request: &GuestApprovalRequest, now: chrono::DateTime<Utc>) -> AppResult<()> {
    match request.effective_status(now) {
        ApprovalStatus::Pending => Ok(()),
        ApprovalStatus::Expired => Err(AppError::conflict("Approval request has expired")),
        status => Err(AppError::conflict(format!(
            "Approval request is already {status}"
        ))),
    }
}
