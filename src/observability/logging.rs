//! Structured logging.
//!
//! `RUST_LOG` wins over the configured level when set. Log lines go to
//! stderr so they never interleave with rendered dashboard output.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive for `level`, scoped so dependencies stay at `warn`.
pub fn default_directive(level: &str) -> String {
    format!("warn,warehouse_console={}", level.to_ascii_lowercase())
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(level: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive(level).into()))
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive("DEBUG"), "warn,warehouse_console=debug");
    }
}
