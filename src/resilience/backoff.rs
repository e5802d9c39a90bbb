//! Exponential backoff.
//!
//! Delay after failed attempt `i` (0-indexed) is `base_ms * 2^i`. There is no
//! jitter and no cap; the global timeout race bounds the total wait instead.

use std::time::Duration;

/// Calculate the delay to wait after the failed attempt with index `attempt_index`.
pub fn calculate_backoff(attempt_index: u32, base_ms: u64) -> Duration {
    let exponential_base = 2u64.saturating_pow(attempt_index);
    Duration::from_millis(base_ms.saturating_mul(exponential_base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_calculation() {
        assert_eq!(calculate_backoff(0, 1000), Duration::from_millis(1000));
        assert_eq!(calculate_backoff(1, 1000), Duration::from_millis(2000));
        assert_eq!(calculate_backoff(2, 1000), Duration::from_millis(4000));
        assert_eq!(calculate_backoff(5, 100), Duration::from_millis(3200));
    }

    #[test]
    fn test_backoff_saturates() {
        assert_eq!(calculate_backoff(200, 1000), Duration::from_millis(u64::MAX));
    }
}
