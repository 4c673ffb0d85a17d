//! `serve` and `check`.

use std::sync::Arc;

use ignis_api::{Server, shutdown_signal};
use ignis_core::IgnisConfig;
use ignis_storage::{MemoryStore, OccurrenceStore, PgStore};

use crate::Result;

/// Listener overrides from the command line.
#[derive(Debug, Default, Clone)]
pub struct ServeOptions {
    /// Replaces `server.host`.
    pub host: Option<String>,
    /// Replaces `server.port`.
    pub port: Option<u16>,
    /// Use an empty in-memory store.
    pub memory: bool,
}

/// Loads configuration, applies command-line overrides, then validates.
pub fn resolve_config(config_path: Option<&str>, opts: &ServeOptions) -> Result<IgnisConfig> {
    let mut config = IgnisConfig::load(config_path)?;
    if let Some(host) = &opts.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = opts.port {
        config.server.port = port;
    }
    config.validate()?;
    Ok(config)
}

/// Runs the API until Ctrl-C.
pub async fn serve(config_path: Option<&str>, opts: ServeOptions) -> Result<()> {
    let config = resolve_config(config_path, &opts)?;

    let store: Arc<dyn OccurrenceStore> = if opts.memory {
        log::warn!("Serving from an empty in-memory store; no data will persist");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(PgStore::connect(&config.database).await?)
    };

    Server::new(store, config).serve(shutdown_signal()).await?;
    Ok(())
}

/// Connects to the configured database and pings it.
pub async fn check(config_path: Option<&str>) -> Result<()> {
    let config = IgnisConfig::load(config_path)?;
    config.validate()?;
    let store = PgStore::connect(&config.database).await?;
    store.ping().await?;
    println!(
        "database OK ({}, backend {})",
        config.database.redacted_url(),
        store.backend_name()
    );
    Ok(())
}
