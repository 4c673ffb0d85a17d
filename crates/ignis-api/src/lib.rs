//! Ignis API: axum router, handlers, and server lifecycle.
//!
//! # Modules
//!
//! - [`server`]: [`Server`] builds the router and runs it with graceful shutdown
//! - [`routes`]: `/api` handlers for map layers, charts, dates, and GeoJSON
//! - [`health`]: `/healthz` and `/readyz`
//! - [`error`]: [`ApiError`] and its JSON response

#![doc = include_str!("../README.md")]

pub mod error;
pub mod health;
pub mod params;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, Result};
pub use server::{Server, shutdown_signal};
pub use state::AppState;
