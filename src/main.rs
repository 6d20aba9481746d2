use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod client;
mod commands;
mod constants;
mod domain;
mod state;
mod theme;
mod tui;
mod ui;

#[cfg(test)]
mod test_utils;

use crate::domain::Cluster;
use crate::state::platform::paths::AppPaths;
use crate::state::{App, StartupOptions};

// SplitPay version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "info";

/// SplitPay - send SOL to many recipients in one transaction
#[derive(Debug, Parser)]
#[command(name = "splitpay", version = VERSION, about, long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Cluster to connect to (mainnet, devnet, testnet, localnet)
    #[arg(short, long)]
    cluster: Option<Cluster>,

    /// JSON-RPC endpoint, overriding the cluster default
    #[arg(short = 'u', long = "url", value_name = "RPC_URL")]
    url: Option<String>,

    /// Keypair file of the paying account (Solana CLI JSON format)
    #[arg(short, long, value_name = "PATH")]
    keypair: Option<PathBuf>,

    /// Prefill a recipient row; repeat for more rows
    #[arg(
        short,
        long = "recipient",
        value_name = "ADDRESS[=AMOUNT]",
        value_parser = parse_recipient
    )]
    recipients: Vec<(String, String)>,

    /// Start in split mode, dividing TOTAL SOL evenly
    #[arg(short, long, value_name = "TOTAL")]
    split: Option<String>,

    /// Only check address shape, without decoding
    #[arg(long)]
    heuristic_addresses: bool,

    /// Persist cluster, URL, keypair and address check to the config file
    #[arg(long)]
    save_config: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Display version information
    Version,
}

impl Cli {
    fn into_options(self) -> StartupOptions {
        StartupOptions {
            cluster: self.cluster,
            rpc_url: self.url,
            keypair_path: self.keypair,
            recipients: self.recipients,
            split_total: self.split,
            heuristic_addresses: self.heuristic_addresses,
            save_config: self.save_config,
        }
    }
}

/// Parses `ADDRESS[=AMOUNT]`; a missing amount leaves the field empty.
fn parse_recipient(value: &str) -> Result<(String, String), String> {
    let (address, amount) = value.split_once('=').unwrap_or((value, ""));
    let address = address.trim();
    if address.is_empty() {
        return Err(format!("missing address in '{value}'"));
    }
    Ok((address.to_string(), amount.trim().to_string()))
}

/// Application entry point
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if matches!(cli.command, Some(Commands::Version)) {
        println!("SplitPay v{VERSION}");
        println!("Batched SOL transfers from the terminal");
        return Ok(());
    }

    color_eyre::install()?;
    let log_path = init_logging();
    tracing::info!(version = VERSION, log = ?log_path, "starting");

    let mut app = App::new(cli.into_options())?;

    let mut terminal = tui::init()?;
    let result = app.run(&mut terminal).await;
    tui::restore()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "exited with error");
    }
    result
}

/// Sends tracing output to the log file; the terminal belongs to the UI.
///
/// Returns the log path, or `None` if logging could not be set up. The app
/// runs either way.
fn init_logging() -> Option<PathBuf> {
    let path = AppPaths::new().log_file().ok()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .ok()?;

    Some(path)
}

// ============================================================================
// Tests
// ============================================================================
