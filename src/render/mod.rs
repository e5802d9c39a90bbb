//! Presentation boundary.
//!
//! # Data Flow
//! ```text
//! WarehouseApi / DashboardRefresher
//!     → events.rs (DashboardEvent published on the EventBus)
//!     → drive() (one task per presenter)
//!     → Presenter::present (console.rs writes text)
//! ```
//!
//! # Design Decisions
//! - Producers never call presenters directly; they publish events
//! - A slow presenter lags and skips events instead of blocking producers

pub mod console;
pub mod events;

use std::io;

use tokio::sync::broadcast::{self, error::RecvError};

pub use console::ConsolePresenter;
pub use events::{DashboardEvent, EventBus, NoticeLevel};

/// Turns events into visible state.
pub trait Presenter: Send {
    fn present(&mut self, event: &DashboardEvent) -> io::Result<()>;
}

/// Feed events from `events` into `presenter` until shutdown or until every
/// publisher is gone.
pub async fn drive<P: Presenter>(
    presenter: &mut P,
    mut events: broadcast::Receiver<DashboardEvent>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            received = events.recv() => match received {
                Ok(event) => {
                    if let Err(e) = presenter.present(&event) {
                        tracing::error!(error = %e, "Presenter failed to render event");
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Presenter lagging, events dropped");
                }
                Err(RecvError::Closed) => break,
            },
            _ = shutdown.recv() => {
                tracing::debug!("Presenter received shutdown signal");
                break;
            }
        }
    }
}
