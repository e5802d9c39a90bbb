//! Periodic dashboard refresh.
//!
//! # Responsibilities
//! - Load the dashboard on startup and then every refresh interval
//! - Load any followed sections after each dashboard refresh
//! - Ask a configured assistant question once, after the first refresh
//! - Publish each outcome to presenters
//! - Pick up reloaded configuration without restarting

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::time;

use crate::api::chat::ChatSession;
use crate::api::types::{ChatReply, DashboardSnapshot, Section};
use crate::api::warehouse::{ApiError, WarehouseApi};
use crate::config::ConsoleConfig;
use crate::observability::metrics;
use crate::render::{DashboardEvent, EventBus, NoticeLevel};
use crate::resilience::FetchOutcome;

pub struct DashboardRefresher {
    api: WarehouseApi,
    events: EventBus,
    interval: Duration,
    sections: Vec<Section>,
    question: Option<String>,
    session: ChatSession,
}

impl DashboardRefresher {
    pub fn new(api: WarehouseApi, events: EventBus, interval: Duration) -> Self {
        Self {
            api,
            events,
            interval,
            sections: Vec::new(),
            question: None,
            session: ChatSession::new(),
        }
    }

    /// Sections reloaded after every dashboard refresh.
    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = sections;
        self
    }

    /// Assistant question asked once, after the first refresh.
    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    /// Load once and publish the outcome.
    pub async fn refresh_once(&self) -> FetchOutcome<DashboardSnapshot> {
        let outcome = self.api.load_dashboard().await;
        metrics::record_dashboard_refresh(outcome.label());
        tracing::info!(outcome = outcome.label(), "Dashboard refreshed");
        self.events
            .publish(DashboardEvent::DashboardLoaded(outcome.clone()));
        outcome
    }

    /// Load one section and publish the outcome.
    pub async fn refresh_section(&self, section: Section) -> FetchOutcome {
        let outcome = self.api.load_section(section).await;
        tracing::info!(section = %section, outcome = outcome.label(), "Section refreshed");
        self.events.publish(DashboardEvent::SectionLoaded {
            section,
            outcome: outcome.clone(),
        });
        outcome
    }

    /// Send `message` in this refresher's chat session and publish the reply.
    /// A rejected message is published as a warning notice instead.
    pub async fn ask(&mut self, message: &str) -> Result<FetchOutcome<ChatReply>, ApiError> {
        match self.api.send_chat_message(&mut self.session, message).await {
            Ok(outcome) => {
                self.events.publish(DashboardEvent::ChatReply(outcome.clone()));
                Ok(outcome)
            }
            Err(e) => {
                self.events
                    .publish(DashboardEvent::notice(NoticeLevel::Warning, e.to_string()));
                Err(e)
            }
        }
    }

    /// One full cycle: the dashboard, every followed section, then the
    /// pending question if there is one.
    pub async fn refresh_all(&mut self) -> FetchOutcome<DashboardSnapshot> {
        let dashboard = self.refresh_once().await;
        for section in self.sections.clone() {
            self.refresh_section(section).await;
        }
        if let Some(question) = self.question.take() {
            if let Err(e) = self.ask(&question).await {
                tracing::warn!(error = %e, "Configured question was not sent");
            }
        }
        dashboard
    }

    pub async fn run(
        mut self,
        mut shutdown: broadcast::Receiver<()>,
        mut config_updates: mpsc::UnboundedReceiver<ConsoleConfig>,
    ) {
        tracing::info!(interval_secs = self.interval.as_secs(), "Dashboard refresher starting");

        let mut ticker = time::interval(tick_period(self.interval));
        ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.refresh_all().await;
                }
                Some(config) = config_updates.recv() => {
                    if self.apply_config(&config) {
                        ticker = time::interval(tick_period(self.interval));
                        ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Dashboard refresher received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Swap in a new configuration. Returns false when it was rejected.
    fn apply_config(&mut self, config: &ConsoleConfig) -> bool {
        match self.api.reconfigure(config) {
            Ok(api) => {
                self.api = api;
                self.interval = Duration::from_secs(config.dashboard.refresh_interval_secs);
                tracing::info!(
                    base_url = %config.api.base_url,
                    interval_secs = config.dashboard.refresh_interval_secs,
                    "Refresher picked up new configuration"
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "Rejected configuration update, keeping current client"
                );
                false
            }
        }
    }
}

// `time::interval` panics on a zero period.
fn tick_period(interval: Duration) -> Duration {
    interval.max(Duration::from_millis(1))
}
