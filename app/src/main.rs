//! Resume Builder - HTTP API and command-line exporter

mod cli;
mod config;
mod errors;
mod export_cmd;
mod routes;
mod server;
mod state;
mod storage;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    if let Err(e) = try_main() {
        eprintln!("Error: {e:#}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log)))
        .init();

    match cli.command {
        Commands::Serve(args) => {
            if let Some(port) = args.port {
                config.port = port;
            }
            tracing::info!("Starting resume-builder v{}", env!("CARGO_PKG_VERSION"));
            tokio::runtime::Runtime::new()
                .context("Failed to start the async runtime")?
                .block_on(server::run(config))
        }
        Commands::Export(args) => {
            for path in export_cmd::run(&args, &config)? {
                println!("  {}", path.display());
            }
            Ok(())
        }
    }
}
