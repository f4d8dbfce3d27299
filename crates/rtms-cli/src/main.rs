//! RTMS terminal client.
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`RTMS_*`)
//! 3. Config file (`~/.config/rtms/config.toml`)
//! 4. Default values (lowest priority)
//!
//! # Environment Variables
//!
//! - `RTMS_API_BASE_URL`: Backend base URL
//! - `RTMS_DATA_DIR`: Where local storage lives
//! - `RTMS_LOG`: Log filter directive (e.g. `debug,reqwest=warn`)

mod commands;
mod console;
mod helper;
mod parser;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rtms_application::build_app;
use rtms_core::config::AppConfig;
use rtms_core::page::PageRegistry;
use rtms_infrastructure::ConfigService;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::console::ConsoleNotifier;

/// RTMS club portal in the terminal
#[derive(Parser, Debug)]
#[command(name = "rtms")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Config file (defaults to ~/.config/rtms/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Local storage directory
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Listen for server-pushed events while logged in
    #[arg(long)]
    realtime: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List navigable pages and who may open them
    Pages,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a config file with default values
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let service = match &args.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let mut config = service.load_with_env()?;
    if let Some(url) = args.api_url {
        config.api_base_url = url;
    }
    if let Some(dir) = args.data_dir {
        config.data_dir = Some(dir);
    }

    init_tracing(&config, args.debug);
    tracing::debug!(api = %config.api_base_url, "Configuration loaded");

    match args.command {
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&service, &config),
            ConfigAction::Init => commands::config::init(&service),
        },
        Some(Commands::Pages) => {
            let registry = PageRegistry::standard_with_default(&config.default_page)?;
            commands::pages::list(&registry);
            Ok(())
        }
        None => {
            let app = build_app(&config, Arc::new(ConsoleNotifier)).await?;
            commands::repl::run(app, args.realtime).await
        }
    }
}

/// Logs go to stderr so they never mix with REPL output on stdout.
fn init_tracing(config: &AppConfig, debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug,hyper=warn,hyper_util=warn,reqwest=warn,rustyline=warn")
    } else {
        EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();
}
