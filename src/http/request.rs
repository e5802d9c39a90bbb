//! Outgoing API requests.
//!
//! # Responsibilities
//! - Describe one logical call against the backend (method, path, JSON body)
//! - Carry a request ID that is sent on every attempt
//!
//! # Design Decisions
//! - Request ID is generated once per logical request, so retries of the same
//!   call share it and can be correlated in backend logs
//! - Body is kept as JSON so a retry re-sends exactly the same bytes

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Header used to propagate the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Unique identifier for a logical request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// HTTP methods the backend API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// A request against a backend endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Endpoint path, e.g. `/api/dashboard/overview`.
    pub path: String,
    pub body: Option<Value>,
    pub request_id: RequestId,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
            request_id: RequestId::new(),
        }
    }

    /// Build a POST with a JSON body.
    pub fn post<B: Serialize>(
        path: impl Into<String>,
        body: &B,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            method: Method::Post,
            path: path.into(),
            body: Some(serde_json::to_value(body)?),
            request_id: RequestId::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_ids_are_unique() {
        let a = ApiRequest::get("/api/dashboard/overview");
        let b = ApiRequest::get("/api/dashboard/overview");
        assert_ne!(a.request_id, b.request_id);
        assert_eq!(a.method, Method::Get);
        assert!(a.body.is_none());
    }

    #[test]
    fn test_post_serializes_body() {
        #[derive(Serialize)]
        struct Body {
            message: &'static str,
        }
        let req = ApiRequest::post("/api/chat/message", &Body { message: "hi" }).unwrap();
        assert_eq!(req.method.to_string(), "POST");
        assert_eq!(req.body, Some(json!({"message": "hi"})));
    }
}
