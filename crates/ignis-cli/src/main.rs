//! Ignis CLI
//!
//! Command-line entry point for the Ignis wildfire monitoring API.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use ignis_cli::cli::{Args, Command};
use ignis_cli::commands::{self, ServeOptions};
use ignis_cli::config_handlers::handle_config_command;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info,ignis=debug" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // a missing .env is fine
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.verbose);

    let config_path = args.config.as_deref();
    match args.command {
        Command::Serve { host, port, memory } => {
            commands::serve(config_path, ServeOptions { host, port, memory }).await?
        }
        Command::Check => commands::check(config_path).await?,
        Command::Config { action } => handle_config_command(config_path, action)?,
    }
    Ok(())
}
