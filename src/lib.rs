//! routedb - Embedded SQLite-backed directory of bus routes
//!
//! routedb stores buses and their ordered stops, keeping each route's
//! `stop_order` values a dense 1-based sequence under inserts and deletes.
//!
//! # Quick Start
//!
//! ```ignore
//! use routedb::{BusRef, Depot, Projection, StopField};
//!
//! // Create an in-memory directory
//! let depot = Depot::in_memory()?;
//!
//! // Register a route and add stops
//! depot.create_bus("42")?;
//! let bus = BusRef::Number("42".into());
//! depot.create_stop(&bus, "Central Station", None)?;
//! depot.create_stop(&bus, "Harbor", Some(1))?; // insert at the head
//!
//! // Project the stop names in route order
//! let names = depot.get_stops(&bus, &Projection::single(StopField::StopName))?;
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Depot`], which validates inputs, resolves
//! bus/stop references once at the boundary, and runs every mutation as a
//! single transaction so the ordering invariant holds at each commit point.
//!
//! Internal layering (core types, SQLite store, engine) is re-exported here;
//! most callers only need this crate.

pub use routedb_engine::*;
