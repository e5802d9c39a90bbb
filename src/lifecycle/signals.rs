//! OS signal handling.

use std::io;

/// Wait for Ctrl+C.
///
/// Errors only when the handler cannot be installed.
pub async fn wait_for_shutdown() -> io::Result<()> {
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");
    Ok(())
}
