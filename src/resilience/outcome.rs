//! The value every resilient fetch resolves to.

use serde_json::Value;

use crate::resilience::error::FetchError;

/// Result of a resilient fetch. Produced once per top-level request.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T = Value> {
    /// Live data from the backend.
    Success { payload: T },
    /// Live data was unavailable; the call site's fallback is returned instead.
    FallbackUsed { payload: T, reason: FetchError },
    /// Live data was unavailable and no fallback was configured.
    Failure { reason: FetchError },
}

impl<T> FetchOutcome<T> {
    /// Build the terminal outcome for a failed fetch.
    pub fn degraded(reason: FetchError, fallback: Option<T>) -> Self {
        match fallback {
            Some(payload) => FetchOutcome::FallbackUsed { payload, reason },
            None => FetchOutcome::Failure { reason },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, FetchOutcome::FallbackUsed { .. })
    }

    /// Payload if there is one, live or fallback.
    pub fn payload(&self) -> Option<&T> {
        match self {
            FetchOutcome::Success { payload } | FetchOutcome::FallbackUsed { payload, .. } => {
                Some(payload)
            }
            FetchOutcome::Failure { .. } => None,
        }
    }

    pub fn into_payload(self) -> Option<T> {
        match self {
            FetchOutcome::Success { payload } | FetchOutcome::FallbackUsed { payload, .. } => {
                Some(payload)
            }
            FetchOutcome::Failure { .. } => None,
        }
    }

    /// Why live data is missing, if it is.
    pub fn reason(&self) -> Option<&FetchError> {
        match self {
            FetchOutcome::Success { .. } => None,
            FetchOutcome::FallbackUsed { reason, .. } | FetchOutcome::Failure { reason } => {
                Some(reason)
            }
        }
    }

    /// Label used for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            FetchOutcome::Success { .. } => "success",
            FetchOutcome::FallbackUsed { .. } => "fallback",
            FetchOutcome::Failure { .. } => "failure",
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> FetchOutcome<U> {
        match self {
            FetchOutcome::Success { payload } => FetchOutcome::Success { payload: f(payload) },
            FetchOutcome::FallbackUsed { payload, reason } => FetchOutcome::FallbackUsed {
                payload: f(payload),
                reason,
            },
            FetchOutcome::Failure { reason } => FetchOutcome::Failure { reason },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_degraded_picks_variant() {
        let reason = FetchError::TimeoutExceeded { timeout_ms: 5 };
        let outcome: FetchOutcome = FetchOutcome::degraded(reason.clone(), None);
        assert_eq!(outcome, FetchOutcome::Failure { reason: reason.clone() });

        let outcome = FetchOutcome::degraded(reason, Some(json!({"offline": true})));
        assert!(outcome.is_fallback());
        assert_eq!(outcome.payload(), Some(&json!({"offline": true})));
    }

    #[test]
    fn test_map_keeps_reason() {
        let outcome = FetchOutcome::FallbackUsed {
            payload: 2,
            reason: FetchError::HttpStatus { status: 500 },
        };
        let mapped = outcome.map(|n| n * 10);
        assert_eq!(mapped.payload(), Some(&20));
        assert_eq!(mapped.reason().and_then(|r| r.status()), Some(500));
        assert_eq!(mapped.label(), "fallback");
    }
}
