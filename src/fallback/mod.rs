//! Static substitutes used when live data cannot be obtained.
//!
//! Every call site that degrades gracefully takes its fallback from here, so
//! offline payloads have one canonical shape.

pub mod assistant;
pub mod dashboard;

pub use assistant::{offline_reply, Entities, Intent};
pub use dashboard::offline_dashboard;
