//! `StayCRM` analytics command line
//!
//! Fetches leads, calls and bookings from the CRM backend (falling back to
//! built-in sample data when it is unreachable) and prints the dashboard, or
//! exports the call history as CSV.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use staycrm_core::{Config, Result};
use std::path::PathBuf;
use tracing::info;

/// Command line interface for the `StayCRM` analytics toolkit
#[derive(Debug, Parser)]
#[command(
    name = "staycrm",
    version = env!("CARGO_PKG_VERSION"),
    about = "Dashboard metrics and call-history export for a hospitality CRM",
    long_about = "Reads leads, call logs and bookings from the StayCRM backend, computes the sales dashboard and exports call history. Unreachable endpoints are answered from built-in sample data, which is always flagged in the output."
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the configuration
    #[arg(short, long)]
    log_level: Option<String>,

    /// Enable structured JSON logging
    #[arg(long)]
    json: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a snapshot and print the dashboard
    Dashboard {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Refresh until Ctrl+C, every SECS seconds or the configured interval
        #[arg(short, long, value_name = "SECS")]
        watch: Option<Option<u64>>,
    },

    /// Export the call history as CSV
    ExportCalls {
        /// Destination file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Manage the stored API token
    Token {
        /// Token subcommand
        #[command(subcommand)]
        action: TokenCommands,
    },

    /// Inspect configuration
    Config {
        /// Show resolved configuration
        #[arg(short, long)]
        show: bool,
    },
}

/// Token management commands
#[derive(Debug, Subcommand)]
enum TokenCommands {
    /// Store a bearer token for API requests
    Set {
        /// Token value
        #[arg(value_name = "TOKEN")]
        value: String,
    },

    /// Remove the stored token
    Clear,

    /// Show where the token lives and a masked preview
    Show,
}

/// Dashboard output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Labelled text table
    Table,
    /// JSON document
    Json,
}

/// Main entry point
///
/// # Errors
///
/// Returns error if configuration, fetching or output fails
#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (for development convenience)
    if let Err(e) = dotenvy::dotenv() {
        // It's okay if .env doesn't exist
        eprintln!("Note: .env file not loaded: {e}");
    }

    let cli = Cli::parse();

    let mut config = Config::load_from(cli.config.as_deref())?;
    apply_overrides(&mut config, &cli);
    let _log_guard = staycrm_core::init_logging(&config.logging)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = %config.backend.base_url,
        "StayCRM analytics starting"
    );

    match cli.command {
        Commands::Dashboard { format, watch } => {
            let interval =
                watch.map(|secs| secs.unwrap_or(config.dashboard.refresh_interval_secs));
            commands::dashboard(&config, format, interval).await
        }
        Commands::ExportCalls { output } => commands::export_calls(&config, &output).await,
        Commands::Token { action } => commands::token(&config, action).await,
        Commands::Config { show } => commands::config(&config, show),
    }
}

/// Fold command-line logging flags into the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }
    if cli.json {
        config.logging.format = "json".to_string();
    }
}
