//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Fetch client, dashboard refresher:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stderr/stdout log lines
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Every attempt, fallback and terminal failure is logged with structured fields
//! - Metrics are cheap (atomic increments) and no-ops without a recorder

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
