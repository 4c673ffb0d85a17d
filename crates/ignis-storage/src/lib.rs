//! Ignis Storage: parameterized SQL and store backends.
//!
//! # Modules
//!
//! - [`sql`]: Query builders with positional parameters
//! - [`store`]: The [`OccurrenceStore`] trait consumed by the HTTP layer
//! - [`postgres`]: sqlx-backed PostgreSQL/PostGIS store
//! - [`memory`]: In-process store with the same query semantics

#![doc = include_str!("../README.md")]

pub mod error;
pub mod memory;
pub mod postgres;
pub mod sql;
pub mod store;

pub use error::{Error, Result};
pub use memory::{BurnedAreaRecord, HeatSpotRecord, MemoryStore, RiskRecord};
pub use postgres::PgStore;
pub use sql::{SqlParam, SqlQuery};
pub use store::OccurrenceStore;
