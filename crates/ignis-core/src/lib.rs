//! Ignis Core: shared types, validation, errors, and configuration.
//!
//! This crate provides the foundational types used across all Ignis crates.
//! It has no internal Ignis dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`types`]: Datasets, region filters, date ranges, and result rows
//! - [`config`]: Layered TOML/environment configuration

#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod types;

// Re-export key types at crate root for convenience
pub use config::{DatabaseConfig, IgnisConfig, LimitsConfig, ServerConfig};
pub use error::{Error, Result};
pub use types::{Dataset, DateRange, Grouping, MonthKey, RegionFilter};
