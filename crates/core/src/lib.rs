//! Core types and contracts for routedb
//!
//! This crate defines the foundational types used throughout the system:
//! - BusId / StopId: Surrogate row identities
//! - BusRef / StopRef: Caller-facing lookup keys, resolved once at the boundary
//! - Projection / Projected: Typed column selection and result shaping
//! - ValidationPolicy: Input validation for bus numbers, stop names, and positions
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod projection;
pub mod types;
pub mod validate;

// Re-export commonly used types
pub use error::{Error, Result};
pub use projection::{FieldValue, Projected, Projection, StopField};
pub use types::{BusId, BusRef, Stop, StopId, StopRef};
pub use validate::{LabelPattern, ValidationPolicy};
