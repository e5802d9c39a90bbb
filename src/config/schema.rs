//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the console.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the warehouse console.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Backend API location and client settings.
    pub api: ApiConfig,

    /// Default retry policy for dashboard and section fetches.
    pub retries: RetryConfig,

    /// Retry policy for chat messages.
    pub chat: ChatConfig,

    /// Dashboard refresh settings.
    pub dashboard: DashboardConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL the endpoint paths are appended to.
    pub base_url: String,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// User ID sent with chat messages.
    pub user_id: String,

    /// Bypass system proxy settings (useful against localhost).
    pub no_proxy: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout_secs: 5,
            user_id: "web_user".to_string(),
            no_proxy: false,
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub backoff_base_ms: u64,

    /// Deadline for the whole fetch, across all attempts, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base_ms: 1000,
            timeout_ms: 15_000,
        }
    }
}

/// Chat configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ChatConfig {
    /// Chat messages are not idempotent, so a single attempt by default.
    pub max_attempts: u32,

    pub backoff_base_ms: u64,

    pub timeout_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            backoff_base_ms: 1000,
            timeout_ms: 15_000,
        }
    }
}

/// Dashboard configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Auto-refresh interval in seconds.
    pub refresh_interval_secs: u64,

    /// Deadline for the grouped overview/alerts/activity load in milliseconds.
    pub group_timeout_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 30,
            group_timeout_ms: 15_000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9100".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ConsoleConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://warehouse.internal:9000"

            [retries]
            max_attempts = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://warehouse.internal:9000");
        assert_eq!(config.api.user_id, "web_user");
        assert_eq!(config.retries.max_attempts, 5);
        assert_eq!(config.retries.backoff_base_ms, 1000);
        assert_eq!(config.chat.max_attempts, 1);
        assert_eq!(config.dashboard.refresh_interval_secs, 30);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: ConsoleConfig = toml::from_str("").unwrap();
        assert_eq!(config, ConsoleConfig::default());
    }
}
