//! Error types for routedb
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! The taxonomy is deliberately small:
//! - `InvalidArgument`: caller input failed validation; never retried
//! - `BusNotFound` / `StopNotFound`: the referenced row does not exist
//! - `DuplicateBus`: unique-constraint violation on the bus number
//! - `Storage`: any other failure from the relational store

use thiserror::Error;

/// Result type alias for routedb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the bus/stop directory
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied value failed validation
    #[error("invalid {field}: {reason}")]
    InvalidArgument {
        /// The first offending field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// No bus matched the supplied reference
    #[error("bus not found: {reference}")]
    BusNotFound {
        /// Display form of the reference that missed
        reference: String,
    },

    /// No stop matched the supplied reference
    #[error("stop not found: {reference}")]
    StopNotFound {
        /// Display form of the reference that missed
        reference: String,
    },

    /// A bus with this number already exists
    #[error("bus number already registered: {bus_number}")]
    DuplicateBus {
        /// The conflicting bus number
        bus_number: String,
    },

    /// Transport or transaction failure against the store
    #[error("storage failure in {operation}: {message}")]
    Storage {
        /// The operation that was executing
        operation: &'static str,
        /// Underlying store error text
        message: String,
    },
}

impl Error {
    /// Shorthand for an `InvalidArgument` error
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    /// True for errors the caller can fix by correcting input
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::Storage { .. })
    }
}
