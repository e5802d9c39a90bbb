//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize logging and the optional metrics exporter
//! - Build the API facade and the event bus
//! - Start background tasks (config watcher, refresher, presenter)
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Presenters subscribe before the first refresh is published

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc};

use crate::api::{DashboardRefresher, DashboardSnapshot, Section, WarehouseApi};
use crate::config::{load_or_default, ConfigError, ConfigWatcher, ConsoleConfig};
use crate::http::TransportError;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals;
use crate::observability::{init_logging, metrics};
use crate::render::{drive, EventBus, Presenter};
use crate::resilience::FetchOutcome;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("failed to build API client: {0}")]
    Transport(#[from] TransportError),

    #[error("signal handling failed: {0}")]
    Signal(#[from] std::io::Error),
}

/// Everything the console needs once startup has finished.
pub struct Console {
    config: Arc<ArcSwap<ConsoleConfig>>,
    config_path: Option<PathBuf>,
    api: WarehouseApi,
    events: EventBus,
    shutdown: Shutdown,
    sections: Vec<Section>,
    question: Option<String>,
}

impl Console {
    /// Full startup: config, logging, metrics, then the API client.
    ///
    /// Must be called from within a Tokio runtime when metrics are enabled.
    pub fn start(config_path: Option<&Path>) -> Result<Self, StartupError> {
        let config = load_or_default(config_path)?;

        if let Err(e) = init_logging(&config.observability.log_level) {
            eprintln!("logging already initialized: {}", e);
        }
        tracing::info!(
            base_url = %config.api.base_url,
            max_attempts = config.retries.max_attempts,
            refresh_interval_secs = config.dashboard.refresh_interval_secs,
            "Configuration loaded"
        );

        if config.observability.metrics_enabled {
            let address = &config.observability.metrics_address;
            let addr: SocketAddr = address
                .parse()
                .map_err(|_| StartupError::MetricsAddress(address.clone()))?;
            metrics::init_metrics(addr)?;
        }

        let mut console = Self::from_config(config)?;
        console.config_path = config_path.map(Path::to_path_buf);
        Ok(console)
    }

    /// Build the console around an already validated config without touching
    /// global logging or metrics state.
    pub fn from_config(config: ConsoleConfig) -> Result<Self, StartupError> {
        let api = WarehouseApi::from_config(&config)?;
        Ok(Self::with_api(config, api))
    }

    /// Build the console around a prepared facade.
    pub fn with_api(config: ConsoleConfig, api: WarehouseApi) -> Self {
        Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            config_path: None,
            api,
            events: EventBus::default(),
            shutdown: Shutdown::new(),
            sections: Vec::new(),
            question: None,
        }
    }

    /// Sections to load alongside the dashboard.
    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = sections;
        self
    }

    /// Assistant question to ask once the dashboard has loaded.
    pub fn with_question(mut self, question: Option<String>) -> Self {
        self.question = question;
        self
    }

    pub fn api(&self) -> &WarehouseApi {
        &self.api
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn shutdown(&self) -> &Shutdown {
        &self.shutdown
    }

    /// The configuration currently in effect.
    pub fn config(&self) -> Arc<ConsoleConfig> {
        self.config.load_full()
    }

    /// Run one refresh cycle and hand every published event to `presenter`.
    pub async fn run_once<P: Presenter>(
        &self,
        presenter: &mut P,
    ) -> std::io::Result<FetchOutcome<DashboardSnapshot>> {
        let mut events = self.events.subscribe();
        let outcome = self.refresher().refresh_all().await;
        while let Ok(event) = events.try_recv() {
            presenter.present(&event)?;
        }
        Ok(outcome)
    }

    fn refresher(&self) -> DashboardRefresher {
        let interval = Duration::from_secs(self.config.load().dashboard.refresh_interval_secs);
        let refresher = DashboardRefresher::new(self.api.clone(), self.events.clone(), interval)
            .with_sections(self.sections.clone());
        match &self.question {
            Some(question) => refresher.with_question(question.clone()),
            None => refresher,
        }
    }

    /// Run until Ctrl+C.
    pub async fn run<P: Presenter + 'static>(self, presenter: P) -> Result<(), StartupError> {
        let shutdown = self.shutdown.clone();
        let tasks = self.spawn(presenter);

        let result = signals::wait_for_shutdown().await;
        shutdown.trigger();
        tasks.join().await;
        tracing::info!("Shutdown complete");

        result.map_err(StartupError::from)
    }

    /// Start the background tasks. Stop them with [`Shutdown::trigger`] and
    /// wait with [`ConsoleTasks::join`].
    pub fn spawn<P: Presenter + 'static>(self, presenter: P) -> ConsoleTasks {
        let (forward_tx, forward_rx) = mpsc::unbounded_channel();

        // Keep the notify handle alive for as long as the tasks run.
        let mut watcher = None;
        if let Some(path) = &self.config_path {
            let (config_watcher, updates) = ConfigWatcher::new(path);
            match config_watcher.run() {
                Ok(handle) => {
                    watcher = Some(handle);
                    let forwarder = forward_updates(
                        updates,
                        forward_tx,
                        self.config.clone(),
                        self.shutdown.subscribe(),
                    );
                    tokio::spawn(forwarder);
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        path = ?path,
                        "Config watcher unavailable, hot reload disabled"
                    );
                }
            }
        }

        let presenter_events = self.events.subscribe();
        let presenter_shutdown = self.shutdown.subscribe();
        let presenter_task = tokio::spawn(async move {
            let mut presenter = presenter;
            drive(&mut presenter, presenter_events, presenter_shutdown).await;
        });

        let refresher = self.refresher();
        let refresher_task = tokio::spawn(refresher.run(self.shutdown.subscribe(), forward_rx));

        ConsoleTasks {
            _watcher: watcher,
            presenter: presenter_task,
            refresher: refresher_task,
        }
    }
}

/// Handles for the running console tasks.
pub struct ConsoleTasks {
    _watcher: Option<notify::RecommendedWatcher>,
    presenter: tokio::task::JoinHandle<()>,
    refresher: tokio::task::JoinHandle<()>,
}

impl ConsoleTasks {
    pub async fn join(self) {
        if let Err(e) = self.refresher.await {
            tracing::error!(error = %e, "Refresher task failed");
        }
        if let Err(e) = self.presenter.await {
            tracing::error!(error = %e, "Presenter task failed");
        }
    }
}

/// Swap reloaded configs into the shared slot and pass them to the refresher.
async fn forward_updates(
    mut updates: mpsc::UnboundedReceiver<ConsoleConfig>,
    refresher: mpsc::UnboundedSender<ConsoleConfig>,
    current: Arc<ArcSwap<ConsoleConfig>>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Some(config) => {
                    current.store(Arc::new(config.clone()));
                    if refresher.send(config).is_err() {
                        break;
                    }
                }
                None => break,
            },
            _ = shutdown.recv() => break,
        }
    }
}
