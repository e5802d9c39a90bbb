//! Raw responses handed back by a transport.

use serde_json::Value;

/// Status and body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON. An empty body is `null`.
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_range() {
        assert!(TransportResponse::new(200, "").is_success());
        assert!(TransportResponse::new(204, "").is_success());
        assert!(!TransportResponse::new(199, "").is_success());
        assert!(!TransportResponse::new(301, "").is_success());
        assert!(!TransportResponse::new(503, "").is_success());
    }

    #[test]
    fn test_json_body() {
        let resp = TransportResponse::new(200, r#"{"inventory":{"total_products":42}}"#);
        assert_eq!(resp.json().unwrap(), json!({"inventory": {"total_products": 42}}));
        assert_eq!(TransportResponse::new(200, "  ").json().unwrap(), Value::Null);
        assert!(TransportResponse::new(200, "<html>").json().is_err());
    }
}
