//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! fetch_with_retry(request, options):
//!     → timeouts.rs (one deadline around everything below)
//!         → retries.rs (attempt via Transport, classify, log)
//!         → On failure: backoff.rs (base * 2^i), then retry
//!     → outcome.rs (Success | FallbackUsed | Failure)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every fetch has a deadline
//! - Transport errors, non-2xx and undecodable bodies are all failed attempts
//! - Outcomes are values; no error crosses this boundary

pub mod backoff;
pub mod error;
pub mod outcome;
pub mod retries;
pub mod timeouts;

pub use error::FetchError;
pub use outcome::FetchOutcome;
pub use retries::{FetchOptions, RequestAttempt, ResilientClient};
