use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use warehouse_console::api::{ChatSession, WarehouseApi};
use warehouse_console::config::{load_or_default, ConsoleConfig};
use warehouse_console::render::console::CACHED_DATA_BANNER;
use warehouse_console::FetchOutcome;

#[derive(Parser)]
#[command(name = "warehouse-cli")]
#[command(about = "One-shot queries against the warehouse backend", long_about = None)]
struct Cli {
    /// Backend base URL; overrides the config file
    #[arg(short, long)]
    api_url: Option<String>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dashboard overview metrics
    Overview,
    /// Inventory alerts
    Alerts,
    /// Recent warehouse activity
    Activity,
    /// Inventory summary
    Inventory,
    /// Inbound shipments
    Inbound,
    /// Outbound orders
    Outbound,
    /// Ask the assistant
    Chat { message: String },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config: ConsoleConfig = load_or_default(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    let api = WarehouseApi::from_config(&config)?;

    let ok = match cli.command {
        Commands::Overview => print_outcome(api.overview().await)?,
        Commands::Alerts => print_outcome(api.inventory_alerts().await)?,
        Commands::Activity => print_outcome(api.recent_activity().await)?,
        Commands::Inventory => print_outcome(api.inventory_summary().await)?,
        Commands::Inbound => print_outcome(api.inbound_shipments().await)?,
        Commands::Outbound => print_outcome(api.outbound_orders().await)?,
        Commands::Chat { message } => {
            let mut session = ChatSession::new();
            print_outcome(api.send_chat_message(&mut session, &message).await?)?
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Print the payload, the fallback banner or the failure. Returns false on failure.
fn print_outcome<T: Serialize>(outcome: FetchOutcome<T>) -> Result<bool, serde_json::Error> {
    match outcome {
        FetchOutcome::Success { payload } => {
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(true)
        }
        FetchOutcome::FallbackUsed { payload, reason } => {
            eprintln!("{} ({})", CACHED_DATA_BANNER, reason);
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(true)
        }
        FetchOutcome::Failure { reason } => {
            eprintln!("Error: {}", reason);
            Ok(false)
        }
    }
}
