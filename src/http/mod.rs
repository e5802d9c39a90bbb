//! HTTP transport subsystem.
//!
//! # Data Flow
//! ```text
//! ResilientClient (one attempt)
//!     → request.rs (ApiRequest: method, path, body, request ID)
//!     → transport.rs (Transport trait)
//!     → client.rs (reqwest exchange against the backend)
//!     → response.rs (status + raw body)
//!     → back to ResilientClient for classification
//! ```
//!
//! # Design Decisions
//! - Transport is a trait so the retry core is testable without a network
//! - Transports never retry and never interpret status codes

pub mod client;
pub mod request;
pub mod response;
pub mod transport;

pub use client::HttpTransport;
pub use request::{ApiRequest, Method, RequestId, X_REQUEST_ID};
pub use response::TransportResponse;
pub use transport::{Transport, TransportError};
