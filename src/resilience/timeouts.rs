//! Timeout enforcement.
//!
//! # Responsibilities
//! - Race a whole fetch (every attempt and every backoff) against one deadline
//! - Race a group of fetches against a group deadline
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities; the losing future is dropped, so an
//!   attempt that completes after the deadline is never observed
//! - Timeout errors are distinct from other errors

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::resilience::error::FetchError;

/// Run `fut` unless `timeout_ms` elapses first.
pub async fn race_deadline<F, T>(timeout_ms: u64, fut: F) -> Result<T, FetchError>
where
    F: Future<Output = T>,
{
    timeout(Duration::from_millis(timeout_ms), fut)
        .await
        .map_err(|_| FetchError::TimeoutExceeded { timeout_ms })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Instant};

    #[tokio::test(start_paused = true)]
    async fn test_future_wins_before_deadline() {
        let result = race_deadline(100, async {
            sleep(Duration::from_millis(50)).await;
            7
        })
        .await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_wins() {
        let start = Instant::now();
        let result = race_deadline(100, async {
            sleep(Duration::from_secs(10)).await;
            7
        })
        .await;
        assert_eq!(result, Err(FetchError::TimeoutExceeded { timeout_ms: 100 }));
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(100));
        assert!(elapsed < Duration::from_millis(110));
    }
}
