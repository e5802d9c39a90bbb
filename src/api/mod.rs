//! Backend API subsystem.
//!
//! # Data Flow
//! ```text
//! Presenter / CLI / refresher
//!     → warehouse.rs (WarehouseApi: endpoint + policy + fallback per call site)
//!     → endpoints.rs (paths and methods)
//!     → resilience (ResilientClient)
//!     → FetchOutcome back to the caller
//! ```

pub mod chat;
pub mod endpoints;
pub mod refresh;
pub mod types;
pub mod warehouse;

pub use chat::ChatSession;
pub use endpoints::Endpoint;
pub use refresh::DashboardRefresher;
pub use types::{ChatMessageRequest, ChatReply, DashboardSnapshot, Section};
pub use warehouse::{ApiError, WarehouseApi};
