//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (attempts >= 1, timeouts > 0)
//! - Check the base URL and metrics address parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ConsoleConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::ConsoleConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `retries.max_attempts`.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check every semantic constraint, collecting all failures.
pub fn validate_config(config: &ConsoleConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.api.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::new(
            "api.base_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "api.base_url",
            format!("'{}' is not a valid URL: {}", config.api.base_url, e),
        )),
    }
    if config.api.connect_timeout_secs == 0 {
        errors.push(ValidationError::new("api.connect_timeout_secs", "must be greater than 0"));
    }
    if config.api.user_id.trim().is_empty() {
        errors.push(ValidationError::new("api.user_id", "must not be empty"));
    }

    if config.retries.max_attempts == 0 {
        errors.push(ValidationError::new("retries.max_attempts", "must be at least 1"));
    }
    if config.retries.timeout_ms == 0 {
        errors.push(ValidationError::new("retries.timeout_ms", "must be greater than 0"));
    }
    if config.chat.max_attempts == 0 {
        errors.push(ValidationError::new("chat.max_attempts", "must be at least 1"));
    }
    if config.chat.timeout_ms == 0 {
        errors.push(ValidationError::new("chat.timeout_ms", "must be greater than 0"));
    }

    if config.dashboard.refresh_interval_secs == 0 {
        errors.push(ValidationError::new(
            "dashboard.refresh_interval_secs",
            "must be greater than 0",
        ));
    }
    if config.dashboard.group_timeout_ms == 0 {
        errors.push(ValidationError::new("dashboard.group_timeout_ms", "must be greater than 0"));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ConsoleConfig::default()), Ok(()));
    }

    #[test]
    fn test_all_errors_reported() {
        let mut config = ConsoleConfig::default();
        config.api.base_url = "ftp://warehouse".to_string();
        config.retries.max_attempts = 0;
        config.dashboard.refresh_interval_secs = 0;
        config.observability.log_level = "loud".to_string();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "api.base_url",
                "retries.max_attempts",
                "dashboard.refresh_interval_secs",
                "observability.log_level"
            ]
        );
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = ConsoleConfig::default();
        config.observability.metrics_address = "nowhere".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "observability.metrics_address");
        assert!(errors[0].to_string().starts_with("observability.metrics_address: "));
    }
}
