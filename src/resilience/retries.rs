//! Retry logic and the resilient fetch client.
//!
//! # Responsibilities
//! - Issue a request through the injected transport
//! - Count transport errors, non-2xx statuses and undecodable bodies as failed attempts
//! - Sleep `backoff_base_ms * 2^i` after failed attempt `i`, except after the last
//! - Race the whole loop against one deadline
//! - Degrade to the call site's fallback, or to `Failure`, when live data is unavailable
//!
//! # Design Decisions
//! - Backoff is derived from the attempt index only, never from elapsed time;
//!   the deadline race is what bounds total latency
//! - Every failed attempt is logged and counted even when a fallback hides it
//! - Nothing escapes as an error: callers always receive a `FetchOutcome`

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{ApiConfig, ChatConfig, RetryConfig};
use crate::http::{ApiRequest, HttpTransport, Transport, TransportError};
use crate::observability::metrics;
use crate::resilience::backoff::calculate_backoff;
use crate::resilience::error::FetchError;
use crate::resilience::outcome::FetchOutcome;
use crate::resilience::timeouts::race_deadline;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 1000;
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Per-call retry policy plus the call site's optional fallback payload.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions<T = Value> {
    pub max_attempts: u32,
    pub backoff_base_ms: u64,
    pub timeout_ms: u64,
    pub fallback: Option<T>,
}

impl<T> Default for FetchOptions<T> {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            fallback: None,
        }
    }
}

impl<T> FetchOptions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            backoff_base_ms: config.backoff_base_ms,
            timeout_ms: config.timeout_ms,
            fallback: None,
        }
    }

    pub fn from_chat_config(config: &ChatConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            backoff_base_ms: config.backoff_base_ms,
            timeout_ms: config.timeout_ms,
            fallback: None,
        }
    }

    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn backoff_base_ms(mut self, backoff_base_ms: u64) -> Self {
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Static payload to return when live data cannot be obtained.
    pub fn with_fallback(mut self, fallback: T) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Same policy for a different payload type, without a fallback.
    pub fn policy<U>(&self) -> FetchOptions<U> {
        FetchOptions {
            max_attempts: self.max_attempts,
            backoff_base_ms: self.backoff_base_ms,
            timeout_ms: self.timeout_ms,
            fallback: None,
        }
    }
}

/// Bookkeeping for one attempt of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestAttempt {
    pub endpoint: String,
    /// 1-based; never exceeds `max_attempts`.
    pub attempt_number: u32,
    pub max_attempts: u32,
    pub backoff_base_ms: u64,
}

impl RequestAttempt {
    pub fn first(endpoint: &str, max_attempts: u32, backoff_base_ms: u64) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            attempt_number: 1,
            max_attempts: max_attempts.max(1),
            backoff_base_ms,
        }
    }

    pub fn is_last(&self) -> bool {
        self.attempt_number >= self.max_attempts
    }

    /// Delay to wait after this attempt fails.
    pub fn backoff(&self) -> Duration {
        calculate_backoff(self.attempt_number - 1, self.backoff_base_ms)
    }

    /// The following attempt, if the budget allows one.
    pub fn next(&self) -> Option<Self> {
        if self.is_last() {
            return None;
        }
        Some(Self {
            attempt_number: self.attempt_number + 1,
            ..self.clone()
        })
    }
}

/// Fetch client with bounded retries, a global deadline and fallbacks.
///
/// Constructed once at startup and passed to whoever needs it.
#[derive(Clone)]
pub struct ResilientClient {
    transport: Arc<dyn Transport>,
}

impl ResilientClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Client backed by the reqwest transport.
    pub fn http(config: &ApiConfig) -> Result<Self, TransportError> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    /// Fetch a JSON payload, passed through untouched.
    pub async fn fetch_with_retry(
        &self,
        request: &ApiRequest,
        options: FetchOptions,
    ) -> FetchOutcome {
        self.fetch_json(request, options).await
    }

    /// Fetch and deserialize into `T`. A body that does not fit `T` is a failed attempt.
    pub async fn fetch_json<T>(
        &self,
        request: &ApiRequest,
        options: FetchOptions<T>,
    ) -> FetchOutcome<T>
    where
        T: DeserializeOwned + Send,
    {
        let start = Instant::now();
        let FetchOptions {
            max_attempts,
            backoff_base_ms,
            timeout_ms,
            fallback,
        } = options;

        let first = RequestAttempt::first(&request.path, max_attempts, backoff_base_ms);
        let max_attempts = first.max_attempts;
        // Number of the attempt awaiting the transport; 0 while backing off.
        let in_flight = AtomicU32::new(0);
        let result = race_deadline(timeout_ms, self.retry_loop::<T>(request, first, &in_flight))
            .await
            .and_then(|inner| inner);

        let outcome = match result {
            Ok(payload) => FetchOutcome::Success { payload },
            Err(reason) => {
                if reason.is_timeout() {
                    let attempt = in_flight.load(Ordering::Acquire);
                    self.log_deadline(request, attempt, max_attempts, &reason);
                }
                FetchOutcome::degraded(reason, fallback)
            }
        };

        match &outcome {
            FetchOutcome::Success { .. } => tracing::debug!(
                request_id = %request.request_id,
                endpoint = %request.path,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Fetch succeeded"
            ),
            FetchOutcome::FallbackUsed { reason, .. } => tracing::warn!(
                request_id = %request.request_id,
                endpoint = %request.path,
                reason = %reason,
                "Live data unavailable, using fallback"
            ),
            FetchOutcome::Failure { reason } => tracing::error!(
                request_id = %request.request_id,
                endpoint = %request.path,
                reason = %reason,
                "Fetch failed"
            ),
        }
        metrics::record_outcome(&request.path, outcome.label(), start);

        outcome
    }

    /// The deadline fired. An attempt cut off mid-flight is still a failed
    /// attempt and is logged and counted like one.
    fn log_deadline(
        &self,
        request: &ApiRequest,
        in_flight: u32,
        max_attempts: u32,
        reason: &FetchError,
    ) {
        if in_flight == 0 {
            tracing::warn!(
                request_id = %request.request_id,
                endpoint = %request.path,
                error = %reason,
                "Fetch abandoned at deadline while backing off"
            );
            return;
        }

        metrics::record_attempt(&request.path, reason.kind());
        tracing::warn!(
            request_id = %request.request_id,
            endpoint = %request.path,
            attempt = in_flight,
            max_attempts,
            error = %reason,
            "Fetch attempt abandoned at deadline"
        );
    }

    async fn retry_loop<T>(
        &self,
        request: &ApiRequest,
        first: RequestAttempt,
        in_flight: &AtomicU32,
    ) -> Result<T, FetchError>
    where
        T: DeserializeOwned + Send,
    {
        let mut attempt = first;
        loop {
            in_flight.store(attempt.attempt_number, Ordering::Release);
            let result = self.attempt::<T>(request).await;
            in_flight.store(0, Ordering::Release);

            match result {
                Ok(payload) => {
                    metrics::record_attempt(&attempt.endpoint, "ok");
                    if attempt.attempt_number > 1 {
                        tracing::info!(
                            request_id = %request.request_id,
                            endpoint = %attempt.endpoint,
                            attempt = attempt.attempt_number,
                            "Fetch recovered after retry"
                        );
                    }
                    return Ok(payload);
                }
                Err(err) => {
                    metrics::record_attempt(&attempt.endpoint, err.kind());
                    tracing::warn!(
                        request_id = %request.request_id,
                        endpoint = %attempt.endpoint,
                        attempt = attempt.attempt_number,
                        max_attempts = attempt.max_attempts,
                        error = %err,
                        "Fetch attempt failed"
                    );

                    let Some(next) = attempt.next() else {
                        return Err(FetchError::RetryExhausted {
                            attempts: attempt.attempt_number,
                            last: Box::new(err),
                        });
                    };

                    let delay = attempt.backoff();
                    tracing::debug!(
                        request_id = %request.request_id,
                        endpoint = %attempt.endpoint,
                        delay_ms = delay.as_millis() as u64,
                        "Backing off before retry"
                    );
                    tokio::time::sleep(delay).await;
                    attempt = next;
                }
            }
        }
    }

    async fn attempt<T>(&self, request: &ApiRequest) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(FetchError::HttpStatus {
                status: response.status,
            });
        }
        let value = response.json()?;
        Ok(serde_json::from_value(value)?)
    }
}

impl std::fmt::Debug for ResilientClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResilientClient").finish_non_exhaustive()
    }
}
