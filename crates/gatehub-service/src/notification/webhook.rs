//! HTTP webhook notification channel.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use gatehub_core::config::NotificationConfig;
use gatehub_core::error::{AppError, ErrorKind};
use gatehub_core::result::AppResult;
use gatehub_core::types::{ApprovalRequestId, GateId, HouseholdId, TenantId};
use gatehub_entity::approval::GuestApprovalRequest;

use super::dispatcher::NotificationDispatcher;

/// Payload posted to the push gateway.
#[derive(Debug, Serialize)]
struct GuestArrivalEvent<'a> {
    event: &'static str,
    approval_request_id: ApprovalRequestId,
    tenant_id: TenantId,
    household_id: HouseholdId,
    gate_id: GateId,
    guest_name: &'a str,
    vehicle_plate: Option<&'a str>,
    timeout_at: DateTime<Utc>,
}

/// Posts guest-arrival events to a push gateway over HTTP.
#[derive(Debug, Clone)]
pub struct WebhookDispatcher {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl WebhookDispatcher {
    /// Builds a dispatcher for `url` with the configured request timeout.
    pub fn new(url: impl Into<String>, config: &NotificationConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build notification client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            client,
            url: url.into(),
            token: config.webhook_token.clone(),
        })
    }
}

#[async_trait]
impl NotificationDispatcher for WebhookDispatcher {
    async fn notify_guest_arrival(&self, request: &GuestApprovalRequest) -> AppResult<bool> {
        let event = GuestArrivalEvent {
            event: "guest_approval_requested",
            approval_request_id: request.id,
            tenant_id: request.tenant_id,
            household_id: request.household_id,
            gate_id: request.gate_id,
            guest_name: &request.guest_name,
            vehicle_plate: request.vehicle_plate.as_deref(),
            timeout_at: request.timeout_at,
        };

        let mut builder = self.client.post(&self.url).json(&event);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Notification webhook unreachable: {e}"),
                e,
            )
        })?;

        response.error_for_status().map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Notification webhook rejected event: {e}"),
                e,
            )
        })?;

        info!(
            approval_request_id = %request.id,
            household_id = %request.household_id,
            "Guest arrival notification dispatched"
        );
        Ok(true)
    }
}
