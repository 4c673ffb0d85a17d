//! Handler functions for `ignis config` subcommands.

use std::io::Write;
use std::path::PathBuf;

use ignis_core::{Error, IgnisConfig, Result};

use crate::cli::ConfigAction;

/// Dispatch a config subcommand, printing to stdout.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    let mut out = std::io::stdout().lock();
    match action {
        ConfigAction::Path => cmd_config_path(config_path, &mut out),
        ConfigAction::Show => cmd_config_show(config_path, &mut out),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key, &mut out),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force, &mut out),
    }
}

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>, out: &mut impl Write) -> Result<()> {
    let path = IgnisConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;
    writeln!(out, "{}", path.display())?;
    if !path.exists() {
        eprintln!(
            "(file does not exist; run `{} config init` to create it)",
            IgnisConfig::project_name()
        );
    }
    Ok(())
}

/// Print the effective configuration with the database password masked.
pub fn cmd_config_show(config_path: Option<&str>, out: &mut impl Write) -> Result<()> {
    let mut config = IgnisConfig::load(config_path)?;
    config.database.url = config.database.redacted_url();
    write!(out, "{}", config.to_toml_string()?)?;
    Ok(())
}

/// Print one configuration value by dotted key.
pub fn cmd_config_get(config_path: Option<&str>, key: &str, out: &mut impl Write) -> Result<()> {
    let config = IgnisConfig::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    match get_nested_value(&value, key) {
        Some(val) => {
            writeln!(out, "{}", format_toml_value(val))?;
            Ok(())
        }
        None => Err(Error::config(format!(
            "Key '{key}' not found in configuration"
        ))),
    }
}

/// Create a default configuration file.
pub fn cmd_config_init(file: Option<&str>, force: bool, out: &mut impl Write) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => IgnisConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = IgnisConfig::default().to_toml_string()?;
    std::fs::write(&path, &toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    writeln!(out, "Config file created at {}", path.display())?;
    Ok(())
}

/// Navigate a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Format a TOML value for display on stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}
