//! Fetch error taxonomy.

use thiserror::Error;

use crate::http::TransportError;

/// Why a single attempt, or a whole fetch, did not produce live data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Network unreachable, DNS failure, connection reset.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("HTTP status {status}")]
    HttpStatus { status: u16 },

    /// A 2xx body that could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The global deadline fired before any attempt succeeded.
    #[error("request timed out after {timeout_ms}ms")]
    TimeoutExceeded { timeout_ms: u64 },

    /// Every attempt failed.
    #[error("retries exhausted after {attempts} attempt(s), last error: {last}")]
    RetryExhausted { attempts: u32, last: Box<FetchError> },
}

impl FetchError {
    /// Status code carried by this error, if the backend responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus { status } => Some(*status),
            FetchError::RetryExhausted { last, .. } => last.status(),
            _ => None,
        }
    }

    /// True when the deadline, not the retry budget, ended the fetch.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::TimeoutExceeded { .. })
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::HttpStatus { .. } => "http_status",
            FetchError::Decode(_) => "decode",
            FetchError::TimeoutExceeded { .. } => "timeout",
            FetchError::RetryExhausted { .. } => "retry_exhausted",
        }
    }
}

impl From<TransportError> for FetchError {
    fn from(err: TransportError) -> Self {
        FetchError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FetchError::HttpStatus { status: 503 };
        assert_eq!(err.to_string(), "HTTP status 503");

        let err = FetchError::RetryExhausted {
            attempts: 3,
            last: Box::new(FetchError::HttpStatus { status: 500 }),
        };
        assert!(err.to_string().contains("3 attempt(s)"));
        assert!(err.to_string().contains("HTTP status 500"));
    }

    #[test]
    fn test_status_is_found_through_exhaustion() {
        let err = FetchError::RetryExhausted {
            attempts: 2,
            last: Box::new(FetchError::HttpStatus { status: 404 }),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(FetchError::Transport("refused".into()).status(), None);
        assert!(FetchError::TimeoutExceeded { timeout_ms: 10 }.is_timeout());
    }
}
