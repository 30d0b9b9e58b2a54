//! Storage layer for routedb
//!
//! This crate owns the physical SQLite store behind a narrow API:
//! - SqliteStore: one connection per store, serialized by a mutex
//! - Read access via `read`, mutation via `mutate` (IMMEDIATE transaction,
//!   commit on success, rollback on error or drop)
//! - Schema creation and referential integrity (stops cascade with their bus)
//! - Classification of store errors into the crate error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod schema;
pub mod sqlite;

pub use config::{JournalMode, StoreConfig, StoreLocation};
pub use sqlite::{classify, is_unique_violation, SqliteStore};
