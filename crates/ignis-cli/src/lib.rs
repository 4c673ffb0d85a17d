//! # ignis-cli
//!
//! Launcher for the Ignis API: runs the server, checks database
//! connectivity, and manages the configuration file.

pub mod cli;
pub mod commands;
pub mod config_handlers;
pub mod error;

pub use error::{Error, Result};
