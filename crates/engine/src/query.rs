//! Projection execution
//!
//! Builds SELECT statements from a [`Projection`] and shapes the returned
//! rows. The column list comes from the typed field set, never from caller
//! strings, so the generated SQL is closed over the four stop columns.

use routedb_core::{BusId, FieldValue, Projected, Projection, Result, StopId};
use routedb_store::classify;
use rusqlite::{params, Connection, OptionalExtension, Row};

/// All projected stops of a bus, ordered by position.
pub(crate) fn select_stops(
    conn: &Connection,
    bus_id: BusId,
    projection: &Projection,
) -> Result<Vec<Projected>> {
    let sql = format!(
        "SELECT {} FROM stops WHERE bus_id = ?1 ORDER BY stop_order",
        projection.column_list()
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| classify("get_stops", e))?;
    let values = stmt
        .query_map(params![bus_id.as_i64()], |row| row_values(projection, row))
        .map_err(|e| classify("get_stops", e))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| classify("get_stops", e))?;

    Ok(values
        .into_iter()
        .map(|row| projection.shape(row))
        .collect())
}

/// One projected stop by id, or `None` when the row does not exist.
pub(crate) fn select_stop(
    conn: &Connection,
    stop_id: StopId,
    projection: &Projection,
) -> Result<Option<Projected>> {
    let sql = format!(
        "SELECT {} FROM stops WHERE stop_id = ?1",
        projection.column_list()
    );
    let values = conn
        .query_row(&sql, params![stop_id.as_i64()], |row| {
            row_values(projection, row)
        })
        .optional()
        .map_err(|e| classify("get_stop", e))?;

    Ok(values.map(|row| projection.shape(row)))
}

fn row_values(projection: &Projection, row: &Row<'_>) -> rusqlite::Result<Vec<FieldValue>> {
    projection
        .fields()
        .iter()
        .enumerate()
        .map(|(index, field)| {
            if field.is_text() {
                row.get::<_, String>(index).map(FieldValue::Text)
            } else {
                row.get::<_, i64>(index).map(FieldValue::Int)
            }
        })
        .collect()
}
