//! Scalar vs record result shaping

use crate::depot_with_bus;
use routedb::{Error, FieldValue, Projected, Projection, StopField, StopRef};

#[test]
fn one_field_gives_a_flat_scalar_list() {
    let (depot, bus) = depot_with_bus("42");
    for name in ["Depot", "Market", "Harbor"] {
        depot.create_stop(&bus, name, None).unwrap();
    }

    let rows = depot
        .get_stops(&bus, &Projection::single(StopField::StopName))
        .unwrap();
    let names: Vec<&str> = rows
        .iter()
        .map(|row| row.as_scalar().unwrap().as_text().unwrap())
        .collect();
    assert_eq!(names, vec!["Depot", "Market", "Harbor"]);
}

#[test]
fn two_fields_give_record_rows() {
    let (depot, bus) = depot_with_bus("42");
    for name in ["Depot", "Market"] {
        depot.create_stop(&bus, name, None).unwrap();
    }

    let projection = Projection::new(&[StopField::StopName, StopField::StopOrder]).unwrap();
    let rows = depot.get_stops(&bus, &projection).unwrap();

    assert_eq!(
        rows,
        vec![
            Projected::Record(vec![FieldValue::Text("Depot".into()), FieldValue::Int(1)]),
            Projected::Record(vec![FieldValue::Text("Market".into()), FieldValue::Int(2)]),
        ]
    );
}

#[test]
fn empty_projection_is_invalid() {
    let err = Projection::new(&[]).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidArgument {
            field: "projection",
            ..
        }
    ));
}

#[test]
fn single_stop_scalar_lookup() {
    let (depot, bus) = depot_with_bus("42");
    let id = depot.create_stop(&bus, "Depot", None).unwrap();

    let row = depot
        .get_stop(&StopRef::Id(id), &Projection::single(StopField::StopOrder))
        .unwrap();
    assert_eq!(row, Projected::Scalar(FieldValue::Int(1)));
}

#[test]
fn single_stop_record_lookup() {
    let (depot, bus) = depot_with_bus("42");
    let id = depot.create_stop(&bus, "Depot", None).unwrap();

    let projection = Projection::new(&[
        StopField::StopId,
        StopField::BusId,
        StopField::StopName,
        StopField::StopOrder,
    ])
    .unwrap();
    let row = depot.get_stop(&StopRef::Id(id), &projection).unwrap();

    let record = row.as_record().unwrap();
    assert_eq!(record.len(), 4);
    assert_eq!(record[0], FieldValue::Int(id.as_i64()));
    assert_eq!(record[2], FieldValue::Text("Depot".into()));
    assert_eq!(record[3], FieldValue::Int(1));
}

#[test]
fn missing_stop_raises_not_found_not_null() {
    let (depot, bus) = depot_with_bus("42");
    let err = depot
        .get_stop(
            &StopRef::Position { bus, order: 1 },
            &Projection::single(StopField::StopName),
        )
        .unwrap_err();
    assert!(matches!(err, Error::StopNotFound { .. }));
}

#[test]
fn projection_shape_is_stable_across_cardinality() {
    let (depot, bus) = depot_with_bus("42");
    depot.create_stop(&bus, "Only", None).unwrap();

    // One row, one field: still a scalar, not a one-element record.
    let rows = depot
        .get_stops(&bus, &Projection::single(StopField::StopName))
        .unwrap();
    assert!(matches!(rows.as_slice(), [Projected::Scalar(_)]));

    // One row, two fields: a record.
    let projection = Projection::new(&[StopField::StopName, StopField::StopId]).unwrap();
    let rows = depot.get_stops(&bus, &projection).unwrap();
    assert!(matches!(rows.as_slice(), [Projected::Record(_)]));
}
