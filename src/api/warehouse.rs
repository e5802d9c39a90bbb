//! Typed facade over the warehouse backend.
//!
//! # Responsibilities
//! - Build requests for the fixed REST endpoints
//! - Attach the per-call-site retry policy and fallback payload
//! - Load the dashboard group (overview, alerts, activity) with all-or-none semantics
//! - Send chat messages, degrading to the offline assistant
//!
//! # Design Decisions
//! - Dashboard members fetch without individual fallbacks; the group falls
//!   back as a whole so the page never mixes live and offline data
//! - Section loads have no fallback; presenters show the failure
//! - One instance is built at startup and cloned where needed

use chrono::Utc;
use futures_util::future::join3;
use serde_json::Value;
use thiserror::Error;

use crate::api::chat::ChatSession;
use crate::api::endpoints::Endpoint;
use crate::api::types::{ChatMessageRequest, ChatReply, DashboardSnapshot, Section};
use crate::config::{ApiConfig, ChatConfig, ConsoleConfig, DashboardConfig, RetryConfig};
use crate::fallback::{assistant, dashboard};
use crate::http::{ApiRequest, TransportError};
use crate::resilience::timeouts::race_deadline;
use crate::resilience::{FetchError, FetchOptions, FetchOutcome, ResilientClient};

/// Misuse of the facade, rejected before any request is made.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct WarehouseApi {
    client: ResilientClient,
    api: ApiConfig,
    retries: RetryConfig,
    chat: ChatConfig,
    dashboard: DashboardConfig,
}

impl WarehouseApi {
    pub fn new(client: ResilientClient, config: &ConsoleConfig) -> Self {
        Self {
            client,
            api: config.api.clone(),
            retries: config.retries.clone(),
            chat: config.chat.clone(),
            dashboard: config.dashboard.clone(),
        }
    }

    /// Facade over the reqwest transport described by `config.api`.
    pub fn from_config(config: &ConsoleConfig) -> Result<Self, TransportError> {
        Ok(Self::new(ResilientClient::http(&config.api)?, config))
    }

    /// Same facade with new policies. The transport is rebuilt only when the
    /// API section changed.
    pub fn reconfigure(&self, config: &ConsoleConfig) -> Result<Self, TransportError> {
        if config.api == self.api {
            Ok(Self::new(self.client.clone(), config))
        } else {
            Self::from_config(config)
        }
    }

    fn options(&self) -> FetchOptions {
        FetchOptions::from_config(&self.retries)
    }

    pub async fn overview(&self) -> FetchOutcome {
        let options = self.options().with_fallback(dashboard::offline_overview(Utc::now()));
        self.client
            .fetch_with_retry(&Endpoint::DashboardOverview.get(), options)
            .await
    }

    pub async fn inventory_alerts(&self) -> FetchOutcome {
        let options = self.options().with_fallback(dashboard::offline_alerts(Utc::now()));
        self.client
            .fetch_with_retry(&Endpoint::InventoryAlerts.get(), options)
            .await
    }

    pub async fn recent_activity(&self) -> FetchOutcome {
        let options = self.options().with_fallback(dashboard::offline_activity(Utc::now()));
        self.client
            .fetch_with_retry(&Endpoint::RecentActivity.get(), options)
            .await
    }

    /// Overview, alerts and activity together. Either all three are live or
    /// the whole snapshot is the offline one.
    pub async fn load_dashboard(&self) -> FetchOutcome<DashboardSnapshot> {
        let group = async {
            let (overview, alerts, activity) = join3(
                self.client
                    .fetch_with_retry(&Endpoint::DashboardOverview.get(), self.options()),
                self.client
                    .fetch_with_retry(&Endpoint::InventoryAlerts.get(), self.options()),
                self.client
                    .fetch_with_retry(&Endpoint::RecentActivity.get(), self.options()),
            )
            .await;

            Ok::<_, FetchError>(DashboardSnapshot {
                overview: live(overview)?,
                alerts: live(alerts)?,
                activity: live(activity)?,
            })
        };

        match race_deadline(self.dashboard.group_timeout_ms, group)
            .await
            .and_then(|inner| inner)
        {
            Ok(snapshot) => FetchOutcome::Success { payload: snapshot },
            Err(reason) => {
                tracing::warn!(reason = %reason, "Dashboard load failed, showing offline data");
                FetchOutcome::FallbackUsed {
                    payload: dashboard::offline_dashboard(Utc::now()),
                    reason,
                }
            }
        }
    }

    pub async fn inventory_summary(&self) -> FetchOutcome {
        self.client
            .fetch_with_retry(&Endpoint::InventorySummary.get(), self.options())
            .await
    }

    pub async fn inbound_shipments(&self) -> FetchOutcome {
        self.client
            .fetch_with_retry(&Endpoint::InboundShipments.get(), self.options())
            .await
    }

    pub async fn outbound_orders(&self) -> FetchOutcome {
        self.client
            .fetch_with_retry(&Endpoint::OutboundOrders.get(), self.options())
            .await
    }

    pub async fn load_section(&self, section: Section) -> FetchOutcome {
        self.client
            .fetch_with_retry(&Endpoint::from(section).get(), self.options())
            .await
    }

    /// Send a chat message. Live replies and offline replies both count as an
    /// exchange in the session.
    pub async fn send_chat_message(
        &self,
        session: &mut ChatSession,
        message: &str,
    ) -> Result<FetchOutcome<ChatReply>, ApiError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ApiError::EmptyMessage);
        }

        let body = ChatMessageRequest {
            message: message.to_string(),
            session_id: session.id().to_string(),
            user_id: self.api.user_id.clone(),
        };
        let request = ApiRequest::post(Endpoint::ChatMessage.path(), &body)?;
        let options = FetchOptions::from_chat_config(&self.chat)
            .with_fallback(assistant::offline_reply(message));

        let outcome = self.client.fetch_json(&request, options).await;
        session.record_exchange();

        tracing::debug!(
            session = %session.short_id(),
            outcome = outcome.label(),
            messages = session.message_count(),
            session_started = %session.started_at().to_rfc3339(),
            "Chat exchange complete"
        );
        Ok(outcome)
    }
}

fn live(outcome: FetchOutcome<Value>) -> Result<Value, FetchError> {
    match outcome {
        FetchOutcome::Success { payload } => Ok(payload),
        FetchOutcome::FallbackUsed { reason, .. } | FetchOutcome::Failure { reason } => Err(reason),
    }
}
