//! Bus registry operations
//!
//! Create/delete/lookup of buses. Deleting a bus cascades to its stops
//! through the store's foreign key, never by manual iteration. Deleting or
//! looking up a bus that does not exist is an error; callers that want a
//! pre-check use [`Depot::bus_exists`].

use crate::depot::{resolve_bus, Depot};
use routedb_core::{BusId, BusRef, Error, Result};
use routedb_store::{classify, is_unique_violation};
use rusqlite::params;
use tracing::debug;

impl Depot {
    /// Register a new bus.
    ///
    /// Fails with `DuplicateBus` when the number is already registered and
    /// with `InvalidArgument` when the number fails the validation policy.
    pub fn create_bus(&self, bus_number: &str) -> Result<BusId> {
        self.policy.check_bus_number(bus_number)?;

        let bus_id = self.store.mutate("create_bus", |txn| {
            txn.execute(
                "INSERT INTO buses (bus_number) VALUES (?1)",
                params![bus_number],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    Error::DuplicateBus {
                        bus_number: bus_number.to_string(),
                    }
                } else {
                    classify("create_bus", e)
                }
            })?;
            Ok(BusId::new(txn.last_insert_rowid()))
        })?;

        debug!(%bus_number, %bus_id, "registered bus");
        Ok(bus_id)
    }

    /// Delete a bus and, through the cascade, its entire route.
    ///
    /// Fails with `BusNotFound` when the reference matches nothing.
    pub fn delete_bus(&self, bus: &BusRef) -> Result<()> {
        self.check_bus_ref(bus)?;

        self.store.mutate("delete_bus", |txn| {
            let bus_id = resolve_bus(txn, bus)?;
            txn.execute("DELETE FROM buses WHERE bus_id = ?1", params![bus_id.as_i64()])
                .map_err(|e| classify("delete_bus", e))?;
            Ok(())
        })?;

        debug!(%bus, "deleted bus");
        Ok(())
    }

    /// Whether a bus matching the reference exists.
    pub fn bus_exists(&self, bus: &BusRef) -> Result<bool> {
        self.check_bus_ref(bus)?;
        self.store.read(|conn| match resolve_bus(conn, bus) {
            Ok(_) => Ok(true),
            Err(Error::BusNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        })
    }

    /// Look up a bus's surrogate id by its number.
    pub fn bus_id(&self, bus_number: &str) -> Result<BusId> {
        let bus = BusRef::Number(bus_number.to_string());
        self.check_bus_ref(&bus)?;
        self.store.read(|conn| resolve_bus(conn, &bus))
    }

    /// Look up a bus's number by its surrogate id.
    pub fn bus_number(&self, bus_id: BusId) -> Result<String> {
        let bus = BusRef::Id(bus_id);
        self.check_bus_ref(&bus)?;
        self.store.read(|conn| {
            conn.query_row(
                "SELECT bus_number FROM buses WHERE bus_id = ?1",
                params![bus_id.as_i64()],
                |row| row.get(0),
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Error::BusNotFound {
                    reference: bus.to_string(),
                },
                other => classify("bus_number", other),
            })
        })
    }

    /// All registered buses, ordered by number.
    pub fn buses(&self) -> Result<Vec<(BusId, String)>> {
        self.store.read(|conn| {
            let mut stmt = conn
                .prepare("SELECT bus_id, bus_number FROM buses ORDER BY bus_number")
                .map_err(|e| classify("buses", e))?;
            let rows = stmt
                .query_map([], |row| {
                    Ok((BusId::new(row.get(0)?), row.get::<_, String>(1)?))
                })
                .map_err(|e| classify("buses", e))?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| classify("buses", e))?;
            Ok(rows)
        })
    }
}
