//! Events published to presenters.

use std::fmt;

use tokio::sync::broadcast;

use crate::api::types::{ChatReply, DashboardSnapshot, Section};
use crate::resilience::FetchOutcome;

/// Toast-style notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeLevel::Success => f.write_str("success"),
            NoticeLevel::Info => f.write_str("info"),
            NoticeLevel::Warning => f.write_str("warning"),
            NoticeLevel::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum DashboardEvent {
    DashboardLoaded(FetchOutcome<DashboardSnapshot>),
    SectionLoaded {
        section: Section,
        outcome: FetchOutcome,
    },
    ChatReply(FetchOutcome<ChatReply>),
    Notice {
        level: NoticeLevel,
        message: String,
    },
}

impl DashboardEvent {
    pub fn notice(level: NoticeLevel, message: impl Into<String>) -> Self {
        DashboardEvent::Notice {
            level,
            message: message.into(),
        }
    }
}

/// Fan-out of dashboard events to every subscribed presenter.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DashboardEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.tx.subscribe()
    }

    /// Publish to current subscribers. Returns how many received it; having
    /// none is not an error.
    pub fn publish(&self, event: DashboardEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_without_subscribers() {
        let bus = EventBus::default();
        assert_eq!(bus.publish(DashboardEvent::notice(NoticeLevel::Info, "hello")), 0);
    }

    #[tokio::test]
    async fn test_every_subscriber_receives() {
        let bus = EventBus::default();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        assert_eq!(bus.publish(DashboardEvent::notice(NoticeLevel::Warning, "offline")), 2);
        for rx in [&mut a, &mut b] {
            match rx.recv().await.unwrap() {
                DashboardEvent::Notice { level, message } => {
                    assert_eq!(level, NoticeLevel::Warning);
                    assert_eq!(message, "offline");
                }
                other => panic!("unexpected event: {:?}", other),
            }
        }
    }
}
