//! SQLite storage adapter
//!
//! One [`SqliteStore`] owns one connection, guarded by a mutex. All access
//! goes through two helpers:
//!
//! - [`SqliteStore::read`]: lock the connection and run queries
//! - [`SqliteStore::mutate`]: lock, open an IMMEDIATE transaction, run the
//!   closure, commit on `Ok`. On `Err` (or a crash mid-sequence) the
//!   transaction rolls back when it drops, so other readers only ever see
//!   the state before or after a renumbering, never the middle.
//!
//! The mutex serializes writers process-wide. That is stronger than the
//! per-bus atomic unit the ordering invariant needs, and is the right
//! trade-off for a single-node administrative store.

use crate::config::{StoreConfig, StoreLocation};
use crate::schema;
use parking_lot::Mutex;
use routedb_core::{Error, Result};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::fs;
use std::time::Duration;
use tracing::{error, info};

/// Handle to the SQLite store
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the store described by `config`.
    ///
    /// Applies pragmas (foreign keys ON, journal mode, busy timeout) and
    /// creates the schema idempotently.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let conn = match &config.location {
            StoreLocation::Memory => Connection::open_in_memory(),
            StoreLocation::File(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent).map_err(|e| Error::Storage {
                            operation: "open",
                            message: format!("cannot create {}: {e}", parent.display()),
                        })?;
                    }
                }
                Connection::open(path)
            }
        }
        .map_err(|e| classify("open", e))?;

        apply_pragmas(&conn, config).map_err(|e| classify("open", e))?;
        schema::create_all(&conn).map_err(|e| classify("open", e))?;

        info!(location = %config.location, "opened bus/stop store");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open a transient in-memory store with default settings
    pub fn in_memory() -> Result<Self> {
        Self::open(&StoreConfig::default())
    }

    /// Run read-only queries against the locked connection.
    pub fn read<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self.conn.lock();
        f(&conn)
    }

    /// Run `f` inside an IMMEDIATE transaction.
    ///
    /// Commits when `f` returns `Ok`; any `Err` return rolls the whole
    /// sequence back via the transaction's drop guard.
    pub fn mutate<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&Transaction<'_>) -> Result<T>,
    ) -> Result<T> {
        let mut conn = self.conn.lock();
        let txn = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| classify(operation, e))?;
        let value = f(&txn)?;
        txn.commit().map_err(|e| classify(operation, e))?;
        Ok(value)
    }
}

fn apply_pragmas(conn: &Connection, config: &StoreConfig) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.execute_batch(&format!(
        "PRAGMA journal_mode = {};",
        config.journal_mode.pragma_value()
    ))?;
    conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
    Ok(())
}

/// Map a store error into the crate taxonomy, logging full context first.
pub fn classify(operation: &'static str, err: rusqlite::Error) -> Error {
    error!(operation, error = %err, "storage operation failed");
    Error::Storage {
        operation,
        message: err.to_string(),
    }
}

/// True when `err` is a UNIQUE constraint violation.
///
/// Callers that know which key conflicted turn this into a domain error
/// (a duplicate bus number) instead of a generic storage failure.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
