//! Ordered stop engine
//!
//! Stops on a route carry a 1-based `stop_order`, and the engine keeps the
//! orders of every route dense: after any insert or delete the values form
//! exactly `{1..N}` with no gaps or duplicates.
//!
//! Inserting shifts every stop at or past the target position up by one
//! before the new row lands; deleting closes the gap by shifting every later
//! stop down. Both sequences run inside a single IMMEDIATE transaction, so
//! no reader ever observes a half-renumbered route and a crash rolls the
//! whole mutation back.

use crate::depot::{resolve_bus, Depot};
use crate::query;
use routedb_core::validate::positive;
use routedb_core::{BusId, BusRef, Error, Projected, Projection, Result, Stop, StopId, StopRef};
use routedb_store::classify;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

impl Depot {
    /// Insert a stop into a route.
    ///
    /// With `stop_order` omitted, or pointing past the end of the route, the
    /// stop is appended. Otherwise every stop at or after the requested
    /// position shifts up by one and the new stop takes the position.
    /// Returns the new stop's id.
    pub fn create_stop(
        &self,
        bus: &BusRef,
        stop_name: &str,
        stop_order: Option<u32>,
    ) -> Result<StopId> {
        self.check_bus_ref(bus)?;
        self.policy.check_stop_name(stop_name)?;
        if let Some(order) = stop_order {
            positive("stop_order", i64::from(order))?;
        }

        let (stop_id, position) = self.store.mutate("create_stop", |txn| {
            let bus_id = resolve_bus(txn, bus)?;
            let total: i64 = txn
                .query_row(
                    "SELECT COUNT(*) FROM stops WHERE bus_id = ?1",
                    params![bus_id.as_i64()],
                    |row| row.get(0),
                )
                .map_err(|e| classify("create_stop", e))?;

            // Past-the-end and omitted positions both append.
            let position = match stop_order {
                Some(order) if i64::from(order) <= total => i64::from(order),
                _ => total + 1,
            };

            txn.execute(
                "UPDATE stops SET stop_order = stop_order + 1
                 WHERE bus_id = ?1 AND stop_order >= ?2",
                params![bus_id.as_i64(), position],
            )
            .map_err(|e| classify("create_stop", e))?;

            txn.execute(
                "INSERT INTO stops (bus_id, stop_name, stop_order) VALUES (?1, ?2, ?3)",
                params![bus_id.as_i64(), stop_name, position],
            )
            .map_err(|e| classify("create_stop", e))?;

            Ok((StopId::new(txn.last_insert_rowid()), position))
        })?;

        debug!(%bus, %stop_id, position, "inserted stop");
        Ok(stop_id)
    }

    /// Delete a stop and compact its route's ordering.
    ///
    /// The stop's current position is re-read inside the same transaction
    /// that deletes and renumbers; a caller-supplied position only locates
    /// the row, it is never trusted as the compaction bound. Fails with
    /// `StopNotFound` when the reference matches nothing.
    pub fn delete_stop(&self, stop: &StopRef) -> Result<()> {
        self.check_stop_ref(stop)?;

        self.store.mutate("delete_stop", |txn| {
            let (stop_id, bus_id, order) = locate_stop(txn, stop)?;

            txn.execute(
                "DELETE FROM stops WHERE stop_id = ?1",
                params![stop_id.as_i64()],
            )
            .map_err(|e| classify("delete_stop", e))?;

            txn.execute(
                "UPDATE stops SET stop_order = stop_order - 1
                 WHERE bus_id = ?1 AND stop_order > ?2",
                params![bus_id.as_i64(), order],
            )
            .map_err(|e| classify("delete_stop", e))?;

            Ok(())
        })?;

        debug!(%stop, "deleted stop");
        Ok(())
    }

    /// Remove every stop of a route. Returns the number of rows removed.
    ///
    /// No compaction is needed; the result set is empty.
    pub fn delete_all_stops(&self, bus: &BusRef) -> Result<u64> {
        self.check_bus_ref(bus)?;

        let removed = self.store.mutate("delete_all_stops", |txn| {
            let bus_id = resolve_bus(txn, bus)?;
            let removed = txn
                .execute(
                    "DELETE FROM stops WHERE bus_id = ?1",
                    params![bus_id.as_i64()],
                )
                .map_err(|e| classify("delete_all_stops", e))?;
            Ok(removed as u64)
        })?;

        debug!(%bus, removed, "cleared route");
        Ok(removed)
    }

    /// Number of stops on a route.
    pub fn stop_count(&self, bus: &BusRef) -> Result<u64> {
        self.check_bus_ref(bus)?;
        self.store.read(|conn| {
            let bus_id = resolve_bus(conn, bus)?;
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM stops WHERE bus_id = ?1",
                    params![bus_id.as_i64()],
                    |row| row.get(0),
                )
                .map_err(|e| classify("stop_count", e))?;
            Ok(count as u64)
        })
    }

    /// The full route, ordered by position.
    pub fn stops(&self, bus: &BusRef) -> Result<Vec<Stop>> {
        self.check_bus_ref(bus)?;
        self.store.read(|conn| {
            let bus_id = resolve_bus(conn, bus)?;
            let mut stmt = conn
                .prepare(
                    "SELECT stop_id, bus_id, stop_name, stop_order FROM stops
                     WHERE bus_id = ?1 ORDER BY stop_order",
                )
                .map_err(|e| classify("stops", e))?;
            let rows = stmt
                .query_map(params![bus_id.as_i64()], |row| {
                    Ok(Stop {
                        stop_id: StopId::new(row.get(0)?),
                        bus_id: BusId::new(row.get(1)?),
                        stop_name: row.get(2)?,
                        stop_order: row.get(3)?,
                    })
                })
                .map_err(|e| classify("stops", e))?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| classify("stops", e))?;
            Ok(rows)
        })
    }

    /// Project the stops of a route, ordered by position.
    ///
    /// Returns an empty vec for a route with no stops.
    pub fn get_stops(&self, bus: &BusRef, projection: &Projection) -> Result<Vec<Projected>> {
        self.check_bus_ref(bus)?;
        self.store.read(|conn| {
            let bus_id = resolve_bus(conn, bus)?;
            query::select_stops(conn, bus_id, projection)
        })
    }

    /// Project a single stop.
    ///
    /// Fails with `StopNotFound` when the reference matches nothing.
    pub fn get_stop(&self, stop: &StopRef, projection: &Projection) -> Result<Projected> {
        self.check_stop_ref(stop)?;
        self.store.read(|conn| {
            let (stop_id, _, _) = locate_stop(conn, stop)?;
            query::select_stop(conn, stop_id, projection)?.ok_or_else(|| Error::StopNotFound {
                reference: stop.to_string(),
            })
        })
    }
}

/// Find a stop row and its current position on the given connection.
///
/// Position references resolve their bus first, then the row at that order;
/// id references fetch the row directly. Either way the returned order is
/// the row's current one, read under the caller's transaction or lock.
fn locate_stop(conn: &Connection, stop: &StopRef) -> Result<(StopId, BusId, i64)> {
    let found = match stop {
        StopRef::Id(id) => conn
            .query_row(
                "SELECT stop_id, bus_id, stop_order FROM stops WHERE stop_id = ?1",
                params![id.as_i64()],
                |row| {
                    Ok((
                        StopId::new(row.get(0)?),
                        BusId::new(row.get(1)?),
                        row.get::<_, i64>(2)?,
                    ))
                },
            )
            .optional()
            .map_err(|e| classify("locate_stop", e))?,
        StopRef::Position { bus, order } => {
            let bus_id = resolve_bus(conn, bus)?;
            conn.query_row(
                "SELECT stop_id, stop_order FROM stops WHERE bus_id = ?1 AND stop_order = ?2",
                params![bus_id.as_i64(), i64::from(*order)],
                |row| Ok((StopId::new(row.get(0)?), row.get::<_, i64>(1)?)),
            )
            .optional()
            .map_err(|e| classify("locate_stop", e))?
            .map(|(stop_id, order)| (stop_id, bus_id, order))
        }
    };

    found.ok_or_else(|| Error::StopNotFound {
        reference: stop.to_string(),
    })
}
