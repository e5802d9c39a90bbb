//! Hot reload of the console config file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::ConsoleConfig;

const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Watches one config file and sends every valid reload.
pub struct ConfigWatcher {
    path: PathBuf,
    updates: mpsc::UnboundedSender<ConsoleConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiving end for reloaded configs.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<ConsoleConfig>) {
        let (updates, rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            updates,
        };
        (watcher, rx)
    }

    /// Start watching. Reloads stop when the returned handle is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self { path, updates } = self;
        let watched = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    handle_event(&watched, &event.kind, &updates);
                }
                Err(e) => tracing::error!(error = %e, "Config watch error"),
            },
            Config::default().with_poll_interval(POLL_INTERVAL),
        )?;
        watcher.watch(&path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, "Config watcher started");
        Ok(watcher)
    }
}

/// Reload on writes and re-creates. Returns true when a config was sent.
fn handle_event(
    path: &Path,
    kind: &EventKind,
    updates: &mpsc::UnboundedSender<ConsoleConfig>,
) -> bool {
    if !(kind.is_modify() || kind.is_create()) {
        return false;
    }

    match load_config(path) {
        Ok(config) => {
            tracing::info!(path = ?path, "Config reloaded");
            updates.send(config).is_ok()
        }
        Err(e) => {
            tracing::error!(
                path = ?path,
                error = %e,
                "Ignoring invalid config reload, keeping current configuration"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind};
    use std::io::Write;

    fn config_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_modify_sends_reloaded_config() {
        let file = config_file("[dashboard]\nrefresh_interval_secs = 7\n");
        let (watcher, mut rx) = ConfigWatcher::new(file.path());

        assert!(handle_event(
            file.path(),
            &EventKind::Modify(ModifyKind::Any),
            &watcher.updates
        ));
        assert_eq!(rx.try_recv().unwrap().dashboard.refresh_interval_secs, 7);
    }

    #[test]
    fn test_invalid_reload_is_ignored() {
        let file = config_file("[retries]\nmax_attempts = 0\n");
        let (watcher, mut rx) = ConfigWatcher::new(file.path());

        assert!(!handle_event(
            file.path(),
            &EventKind::Create(CreateKind::File),
            &watcher.updates
        ));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_access_events_do_not_reload() {
        let file = config_file("");
        let (watcher, mut rx) = ConfigWatcher::new(file.path());

        assert!(!handle_event(
            file.path(),
            &EventKind::Access(AccessKind::Any),
            &watcher.updates
        ));
        assert!(rx.try_recv().is_err());
    }
}
