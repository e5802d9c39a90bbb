//! Warehouse dashboard console.
//!
//! Loads the dashboard from the warehouse backend on a fixed interval and
//! renders it as text, degrading to offline data when the backend is slow or
//! unreachable.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────────┐
//!   │                       WAREHOUSE CONSOLE                         │
//!   │                                                                 │
//!   │  ┌───────────┐    ┌─────────────┐    ┌──────────────────┐       │
//!   │  │ refresher │───▶│ WarehouseApi│───▶│ ResilientClient  │───────┼──▶ Backend
//!   │  │  (ticker) │    │  (facade)   │    │ retry + deadline │       │    (REST)
//!   │  └─────┬─────┘    └──────┬──────┘    └────────┬─────────┘       │
//!   │        │                 │ fallback           │ HttpTransport   │
//!   │        ▼                 ▼                    ▼                 │
//!   │  ┌───────────┐    ┌─────────────┐                               │
//!   │  │ EventBus  │───▶│  Presenter  │───▶ stdout                    │
//!   │  └───────────┘    └─────────────┘                               │
//!   │                                                                 │
//!   │  config (+ watcher) · observability · lifecycle                 │
//!   └────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use warehouse_console::api::Section;
use warehouse_console::lifecycle::Console;
use warehouse_console::render::ConsolePresenter;

#[derive(Parser)]
#[command(name = "warehouse-console")]
#[command(about = "Resilient warehouse dashboard console", long_about = None)]
struct Args {
    /// TOML config file; watched for changes
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Load the dashboard once and exit
    #[arg(long)]
    once: bool,

    /// Also load a section (inventory, inbound, outbound); repeatable
    #[arg(long = "section", value_name = "SECTION")]
    sections: Vec<Section>,

    /// Ask the assistant a question after the dashboard loads
    #[arg(long, value_name = "MESSAGE")]
    ask: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let console = Console::start(args.config.as_deref())?
        .with_sections(args.sections)
        .with_question(args.ask);
    tracing::info!("warehouse-console v{} starting", env!("CARGO_PKG_VERSION"));

    let mut presenter = ConsolePresenter::stdout();
    if args.once {
        console.run_once(&mut presenter).await?;
        return Ok(());
    }

    console.run(presenter).await?;
    Ok(())
}
