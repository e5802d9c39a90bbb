//! Resilient warehouse dashboard client library.

pub mod api;
pub mod config;
pub mod fallback;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod render;
pub mod resilience;

pub use api::WarehouseApi;
pub use config::schema::ConsoleConfig;
pub use lifecycle::Shutdown;
pub use resilience::{FetchOptions, FetchOutcome, ResilientClient};
