//! Route directory engine for routedb
//!
//! This crate orchestrates the lower layers into the public API:
//! - Depot: the explicitly constructed directory handle
//! - Bus registry: create/delete/lookup buses by number or id
//! - Ordered stop engine: insert/delete stops while keeping each route's
//!   `stop_order` values a dense 1..N sequence
//! - Projection execution: shaping query rows per the caller's field list
//!
//! The engine is the only component that knows about both the validation
//! policy and the store.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod depot;
mod query;
mod registry;
mod stops;

pub use depot::{Depot, DepotConfig};

// Re-export the supporting crates' public surface so the facade crate (and
// most callers) only need one import path.
pub use routedb_core::{
    BusId, BusRef, Error, FieldValue, LabelPattern, Projected, Projection, Result, Stop,
    StopField, StopId, StopRef, ValidationPolicy,
};
pub use routedb_store::{JournalMode, StoreConfig, StoreLocation};
