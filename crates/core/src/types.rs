//! Core types for the bus/stop directory
//!
//! This module defines the foundational types:
//! - BusId / StopId: surrogate identities assigned by the store
//! - BusRef: lookup key for a bus (natural number or surrogate id)
//! - StopRef: lookup key for a stop (surrogate id or position on a bus)
//! - Stop: a fully materialized stop row
//!
//! Every operation that accepts "by number or by id" resolves its key through
//! `BusRef::from_parts` / `StopRef::from_parts` exactly once, so precedence
//! and the neither-key-supplied failure live in one place.

use crate::error::{Error, Result};
use crate::validate::positive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Surrogate identity of a bus, assigned by the store
///
/// Wraps the `buses.bus_id` rowid. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BusId(i64);

impl BusId {
    /// Wrap a raw row id
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw row id
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Surrogate identity of a stop, assigned by the store
///
/// Wraps the `stops.stop_id` rowid. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StopId(i64);

impl StopId {
    /// Wrap a raw row id
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw row id
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lookup key for a bus
///
/// Callers may address a bus either by its caller-supplied number (the
/// natural key) or by its surrogate id. The reference is resolved to a
/// canonical [`BusId`] at the storage boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BusRef {
    /// Address by the unique, case-sensitive bus number
    Number(String),
    /// Address by the surrogate id
    Id(BusId),
}

impl BusRef {
    /// Build a reference from the classic optional-pair calling convention.
    ///
    /// Precedence: `bus_number` wins when both are supplied. Supplying
    /// neither fails with `InvalidArgument`, as does a non-positive id.
    pub fn from_parts(bus_number: Option<&str>, bus_id: Option<i64>) -> Result<Self> {
        match (bus_number, bus_id) {
            (Some(number), _) => Ok(BusRef::Number(number.to_string())),
            (None, Some(id)) => {
                positive("bus_id", id)?;
                Ok(BusRef::Id(BusId::new(id)))
            }
            (None, None) => Err(Error::invalid(
                "bus_ref",
                "neither bus_number nor bus_id was supplied",
            )),
        }
    }
}

impl From<BusId> for BusRef {
    fn from(id: BusId) -> Self {
        BusRef::Id(id)
    }
}

impl From<&str> for BusRef {
    fn from(number: &str) -> Self {
        BusRef::Number(number.to_string())
    }
}

impl fmt::Display for BusRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusRef::Number(number) => write!(f, "number \"{number}\""),
            BusRef::Id(id) => write!(f, "id {id}"),
        }
    }
}

/// Lookup key for a stop
///
/// A stop is addressed either directly by its surrogate id or by its
/// position on a bus. The position form needs the owning bus because stop
/// orders are only unique within one route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StopRef {
    /// Address by the surrogate id
    Id(StopId),
    /// Address by 1-based position on a bus
    Position {
        /// The owning bus
        bus: BusRef,
        /// 1-based position within the route
        order: u32,
    },
}

impl StopRef {
    /// Build a reference from the classic optional calling convention.
    ///
    /// Precedence: `stop_id` wins when both forms are supplied. The position
    /// form requires both a bus reference and an order; anything else fails
    /// with `InvalidArgument`.
    pub fn from_parts(
        stop_id: Option<i64>,
        bus: Option<BusRef>,
        stop_order: Option<u32>,
    ) -> Result<Self> {
        if let Some(id) = stop_id {
            positive("stop_id", id)?;
            return Ok(StopRef::Id(StopId::new(id)));
        }
        match (bus, stop_order) {
            (Some(bus), Some(order)) => {
                positive("stop_order", i64::from(order))?;
                Ok(StopRef::Position { bus, order })
            }
            _ => Err(Error::invalid(
                "stop_ref",
                "either stop_id or both a bus reference and stop_order must be supplied",
            )),
        }
    }
}

impl From<StopId> for StopRef {
    fn from(id: StopId) -> Self {
        StopRef::Id(id)
    }
}

impl fmt::Display for StopRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopRef::Id(id) => write!(f, "id {id}"),
            StopRef::Position { bus, order } => write!(f, "bus {bus} at position {order}"),
        }
    }
}

/// A fully materialized stop row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    /// Surrogate identity
    pub stop_id: StopId,
    /// Owning bus
    pub bus_id: BusId,
    /// Free-text stop label
    pub stop_name: String,
    /// 1-based position within the route
    pub stop_order: u32,
}
