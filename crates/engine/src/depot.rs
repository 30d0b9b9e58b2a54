//! Depot handle and configuration
//!
//! A [`Depot`] is the single entry point to the directory: it owns the
//! store handle and the validation policy, and is constructed explicitly;
//! there is no process-global instance. Tests get an isolated directory
//! from [`Depot::in_memory`]; embedders construct one and pass it (or clone
//! an `Arc` of it) to their command handlers.

use routedb_core::validate::positive;
use routedb_core::{BusId, BusRef, Error, Result, StopRef, ValidationPolicy};
use routedb_store::{SqliteStore, StoreConfig};
use rusqlite::{Connection, OptionalExtension};
use serde::Deserialize;
use tracing::debug;

/// Configuration for opening a [`Depot`]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DepotConfig {
    /// Store location and pragmas
    pub store: StoreConfig,
    /// Label validation policy
    pub validation: ValidationPolicy,
}

impl DepotConfig {
    /// Parse a configuration document from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::invalid("config", e.to_string()))
    }
}

/// The bus/stop directory
///
/// All operations validate their inputs first, then run against the store;
/// every mutation executes as one atomic unit, so the dense ordering of each
/// route holds at every commit point.
pub struct Depot {
    pub(crate) store: SqliteStore,
    pub(crate) policy: ValidationPolicy,
}

impl Depot {
    /// Open the directory described by `config`.
    pub fn open(config: &DepotConfig) -> Result<Self> {
        let store = SqliteStore::open(&config.store)?;
        Ok(Self {
            store,
            policy: config.validation,
        })
    }

    /// Open a transient in-memory directory with default settings.
    pub fn in_memory() -> Result<Self> {
        debug!("opening ephemeral depot");
        Self::open(&DepotConfig::default())
    }

    /// The active validation policy.
    pub fn validation(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Validate the caller-facing parts of a bus reference.
    pub(crate) fn check_bus_ref(&self, bus: &BusRef) -> Result<()> {
        match bus {
            BusRef::Number(number) => self.policy.check_bus_number(number),
            BusRef::Id(id) => positive("bus_id", id.as_i64()),
        }
    }

    /// Validate the caller-facing parts of a stop reference.
    pub(crate) fn check_stop_ref(&self, stop: &StopRef) -> Result<()> {
        match stop {
            StopRef::Id(id) => positive("stop_id", id.as_i64()),
            StopRef::Position { bus, order } => {
                self.check_bus_ref(bus)?;
                positive("stop_order", i64::from(*order))
            }
        }
    }
}

/// Resolve a bus reference to its canonical id on the given connection.
///
/// Runs inside whatever transaction (or read lock) the caller holds, so a
/// resolve-then-mutate sequence never acts on a bus deleted in between.
pub(crate) fn resolve_bus(conn: &Connection, bus: &BusRef) -> Result<BusId> {
    let found = match bus {
        BusRef::Number(number) => conn
            .query_row(
                "SELECT bus_id FROM buses WHERE bus_number = ?1",
                rusqlite::params![number],
                |row| row.get::<_, i64>(0),
            )
            .optional(),
        BusRef::Id(id) => conn
            .query_row(
                "SELECT bus_id FROM buses WHERE bus_id = ?1",
                rusqlite::params![id.as_i64()],
                |row| row.get::<_, i64>(0),
            )
            .optional(),
    }
    .map_err(|e| routedb_store::classify("resolve_bus", e))?;

    found.map(BusId::new).ok_or_else(|| Error::BusNotFound {
        reference: bus.to_string(),
    })
}
