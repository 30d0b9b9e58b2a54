//! Schema definition for the bus/stop directory
//!
//! Two tables, one structural rule: `stops.bus_id` references its bus with
//! `ON DELETE CASCADE`, so removing a bus removes its route without manual
//! iteration. The dense ordering of `stop_order` is an engine invariant, not
//! a schema constraint.

use rusqlite::Connection;

/// Schema version stamped into `user_version` on creation.
pub const SCHEMA_VERSION: i64 = 1;

const CREATE_BUSES: &str = "
    CREATE TABLE IF NOT EXISTS buses (
        bus_id INTEGER PRIMARY KEY AUTOINCREMENT,
        bus_number VARCHAR(30) NOT NULL UNIQUE
    );";

const CREATE_STOPS: &str = "
    CREATE TABLE IF NOT EXISTS stops (
        stop_id INTEGER PRIMARY KEY AUTOINCREMENT,
        bus_id INTEGER NOT NULL,
        stop_name TEXT NOT NULL,
        stop_order INTEGER NOT NULL,
        FOREIGN KEY (bus_id) REFERENCES buses(bus_id) ON DELETE CASCADE ON UPDATE CASCADE
    );";

/// Create all tables if they do not exist and stamp the schema version.
pub fn create_all(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(CREATE_BUSES)?;
    conn.execute_batch(CREATE_STOPS)?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}
