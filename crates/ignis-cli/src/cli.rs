//! Command-line arguments.

use clap::{Parser, Subcommand};

/// Ignis - wildfire risk, heat spot and burned area API
#[derive(Parser, Debug)]
#[command(name = "ignis", author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API until Ctrl-C
    Serve {
        /// Interface to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Serve from an empty in-memory store instead of PostgreSQL
        #[arg(long)]
        memory: bool,
    },

    /// Connect to the database and run a ping
    Check,

    /// Inspect or create the configuration file
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `ignis config` subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the resolved config file path
    Path,

    /// Print the effective configuration (password masked)
    Show,

    /// Print one value by dotted key, e.g. `server.port`
    Get {
        /// Dotted key
        key: String,
    },

    /// Write a default config file
    Init {
        /// Destination (defaults to the platform config dir)
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
