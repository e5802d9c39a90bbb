//! Assistant chat session.

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;

/// One conversation with the assistant.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: String,
    message_count: u32,
    started_at: DateTime<Utc>,
}

impl ChatSession {
    pub fn new() -> Self {
        let now = Utc::now();
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(9)
            .map(|b| char::from(b).to_ascii_lowercase())
            .collect();

        Self {
            id: format!("session_{}_{}", now.timestamp_millis(), suffix),
            message_count: 0,
            started_at: now,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Last eight characters of the ID, for display.
    pub fn short_id(&self) -> &str {
        let start = self.id.len().saturating_sub(8);
        &self.id[start..]
    }

    pub fn message_count(&self) -> u32 {
        self.message_count
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Count a user message and its reply.
    pub fn record_exchange(&mut self) {
        self.message_count += 2;
    }

    /// Reset counters; the session ID is kept.
    pub fn clear(&mut self) {
        self.message_count = 0;
        self.started_at = Utc::now();
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_format() {
        let session = ChatSession::new();
        let parts: Vec<&str> = session.id().split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "session");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert_eq!(session.short_id().len(), 8);
        assert!(session.id().ends_with(session.short_id()));
    }

    #[test]
    fn test_exchange_counting_and_clear() {
        let mut session = ChatSession::new();
        let id = session.id().to_string();
        session.record_exchange();
        session.record_exchange();
        assert_eq!(session.message_count(), 4);

        session.clear();
        assert_eq!(session.message_count(), 0);
        assert_eq!(session.id(), id);
    }

    #[test]
    fn test_sessions_differ() {
        assert_ne!(ChatSession::new().id(), ChatSession::new().id());
    }
}
