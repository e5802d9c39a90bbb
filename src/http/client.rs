//! HTTP transport backed by reqwest.
//!
//! # Responsibilities
//! - Resolve endpoint paths against the configured base URL
//! - Attach JSON and request-ID headers
//! - Return status and body without interpreting either
//!
//! # Design Decisions
//! - Status codes are not mapped to errors here; the fetch client decides
//! - One pooled `reqwest::Client` per transport, shared across calls

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use url::Url;

use crate::config::ApiConfig;
use crate::http::request::{ApiRequest, Method, X_REQUEST_ID};
use crate::http::response::TransportResponse;
use crate::http::transport::{Transport, TransportError};

/// Production transport talking to the warehouse backend.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport from API configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        let mut builder =
            Client::builder().connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        if config.no_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Url::parse(&config.base_url)
            .map_err(|_| TransportError::InvalidUrl(config.base_url.clone()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL for an endpoint path.
    pub fn url_for(&self, path: &str) -> Result<Url, TransportError> {
        let raw = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        Url::parse(&raw).map_err(|_| TransportError::InvalidUrl(raw))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> Result<TransportResponse, TransportError> {
        let url = self.url_for(&request.path)?;

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        builder = builder
            .header(ACCEPT, "application/json")
            .header(X_REQUEST_ID, request.request_id.to_string());

        if let Some(body) = &request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        tracing::trace!(
            request_id = %request.request_id,
            method = %request.method,
            path = %request.path,
            status,
            bytes = body.len(),
            "Backend responded"
        );

        Ok(TransportResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base_url: &str) -> HttpTransport {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        };
        HttpTransport::new(&config).unwrap()
    }

    #[test]
    fn test_url_concatenates_base_and_path() {
        let t = transport("http://localhost:8000/");
        assert_eq!(
            t.url_for("/api/dashboard/overview").unwrap().as_str(),
            "http://localhost:8000/api/dashboard/overview"
        );

        let t = transport("https://example.com/warehouse");
        assert_eq!(
            t.url_for("api/inbound/shipments").unwrap().as_str(),
            "https://example.com/warehouse/api/inbound/shipments"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = ApiConfig {
            base_url: "not a url".to_string(),
            ..ApiConfig::default()
        };
        assert!(matches!(
            HttpTransport::new(&config),
            Err(TransportError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Port 9 (discard) is not expected to be listening.
        let t = transport("http://127.0.0.1:9");
        let result = t.send(&ApiRequest::get("/api/dashboard/overview")).await;
        assert!(result.is_err());
    }
}
