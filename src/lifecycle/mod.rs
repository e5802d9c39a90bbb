//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Logging → Metrics → API client → Background tasks
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Broadcast → Refresher, presenters, forwarder exit
//!
//! Signals (signals.rs):
//!     SIGINT (Ctrl+C) → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then observability, then client, tasks last
//! - Fail fast: a bad config or unbuildable client is fatal
//! - Config reloads come from the file watcher, not from signals

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{Console, StartupError};
