//! Transport seam between the fetch client and the network.

use async_trait::async_trait;
use thiserror::Error;

use crate::http::request::ApiRequest;
use crate::http::response::TransportResponse;

/// Errors raised before a response status is available.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Could not reach the backend (refused, DNS, unreachable).
    #[error("connection failed: {0}")]
    Connect(String),

    /// The underlying client gave up waiting.
    #[error("transport timed out")]
    Timeout,

    /// Any other request or body-read failure.
    #[error("request failed: {0}")]
    Request(String),

    /// The endpoint could not be turned into a URL.
    #[error("invalid URL '{0}'")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

/// Performs a single HTTP exchange. Implementations never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<TransportResponse, TransportError>;
}
