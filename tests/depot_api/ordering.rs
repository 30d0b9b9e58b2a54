//! The dense stop-order invariant under inserts and deletes

use crate::{assert_dense, depot_with_bus, route};
use proptest::prelude::*;
use routedb::{BusRef, StopRef};

#[test]
fn insert_at_head_shifts_the_whole_route() {
    let (depot, bus) = depot_with_bus("42");
    for name in ["A", "B", "C"] {
        depot.create_stop(&bus, name, None).unwrap();
    }

    depot.create_stop(&bus, "X", Some(1)).unwrap();

    assert_eq!(
        route(&depot, &bus),
        vec![
            ("X".to_string(), 1),
            ("A".to_string(), 2),
            ("B".to_string(), 3),
            ("C".to_string(), 4)
        ]
    );
}

#[test]
fn insert_past_the_end_clamps() {
    let (depot, bus) = depot_with_bus("42");
    depot.create_stop(&bus, "A", None).unwrap();
    depot.create_stop(&bus, "B", None).unwrap();

    depot.create_stop(&bus, "X", Some(99)).unwrap();

    assert_eq!(
        route(&depot, &bus),
        vec![
            ("A".to_string(), 1),
            ("B".to_string(), 2),
            ("X".to_string(), 3)
        ]
    );
}

#[test]
fn delete_compacts_the_gap() {
    let (depot, bus) = depot_with_bus("42");
    for name in ["A", "B", "C"] {
        depot.create_stop(&bus, name, None).unwrap();
    }

    depot
        .delete_stop(&StopRef::Position {
            bus: bus.clone(),
            order: 2,
        })
        .unwrap();

    assert_eq!(
        route(&depot, &bus),
        vec![("A".to_string(), 1), ("C".to_string(), 2)]
    );
}

#[test]
fn arbitrary_build_order_round_trips_sorted() {
    let (depot, bus) = depot_with_bus("42");
    // Build [D, B, A, C, E] worth of inserts at scattered positions.
    depot.create_stop(&bus, "D", None).unwrap(); // [D]
    depot.create_stop(&bus, "B", Some(1)).unwrap(); // [B, D]
    depot.create_stop(&bus, "A", Some(1)).unwrap(); // [A, B, D]
    depot.create_stop(&bus, "C", Some(3)).unwrap(); // [A, B, C, D]
    depot.create_stop(&bus, "E", Some(42)).unwrap(); // [A, B, C, D, E]

    assert_eq!(
        route(&depot, &bus),
        vec![
            ("A".to_string(), 1),
            ("B".to_string(), 2),
            ("C".to_string(), 3),
            ("D".to_string(), 4),
            ("E".to_string(), 5)
        ]
    );
    assert_dense(&depot, &bus);
}

/// One mutation against the route, mirrored onto a model Vec.
#[derive(Debug, Clone)]
enum RouteOp {
    /// Insert with an optional 1-based position hint
    Insert { order: Option<u32> },
    /// Delete the stop at `slot % len` (skipped on an empty route)
    Delete { slot: usize },
}

fn route_op() -> impl Strategy<Value = RouteOp> {
    prop_oneof![
        3 => proptest::option::of(1u32..=20).prop_map(|order| RouteOp::Insert { order }),
        1 => (0usize..32).prop_map(|slot| RouteOp::Delete { slot }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// After any mutation sequence the store agrees with a plain Vec model
    /// and the orders are exactly 1..=N.
    #[test]
    fn density_invariant_holds_under_any_sequence(ops in proptest::collection::vec(route_op(), 0..40)) {
        let (depot, bus) = depot_with_bus("42");
        let mut model: Vec<String> = Vec::new();
        let mut next_name = 0u32;

        for op in ops {
            match op {
                RouteOp::Insert { order } => {
                    let name = format!("stop-{next_name}");
                    next_name += 1;
                    depot.create_stop(&bus, &name, order).unwrap();
                    let slot = match order {
                        Some(o) if (o as usize) <= model.len() => o as usize - 1,
                        _ => model.len(),
                    };
                    model.insert(slot, name);
                }
                RouteOp::Delete { slot } => {
                    if model.is_empty() {
                        continue;
                    }
                    let slot = slot % model.len();
                    depot
                        .delete_stop(&StopRef::Position {
                            bus: bus.clone(),
                            order: slot as u32 + 1,
                        })
                        .unwrap();
                    model.remove(slot);
                }
            }

            let listed: Vec<String> = route(&depot, &bus).into_iter().map(|(n, _)| n).collect();
            prop_assert_eq!(&listed, &model);
            assert_dense(&depot, &bus);
        }
    }
}

#[test]
fn clearing_and_rebuilding_a_route() {
    let (depot, bus) = depot_with_bus("42");
    for name in ["A", "B", "C", "D"] {
        depot.create_stop(&bus, name, None).unwrap();
    }
    assert_eq!(depot.delete_all_stops(&bus).unwrap(), 4);
    assert_eq!(depot.delete_all_stops(&bus).unwrap(), 0);

    depot.create_stop(&bus, "fresh", None).unwrap();
    assert_eq!(route(&depot, &bus), vec![("fresh".to_string(), 1)]);
}

#[test]
fn head_and_tail_deletes_keep_density() {
    let (depot, bus) = depot_with_bus("42");
    for name in ["A", "B", "C", "D", "E"] {
        depot.create_stop(&bus, name, None).unwrap();
    }

    // Head delete shifts everyone down.
    depot
        .delete_stop(&StopRef::Position { bus: bus.clone(), order: 1 })
        .unwrap();
    assert_dense(&depot, &bus);

    // Tail delete needs no shifting but must stay dense.
    let last = depot.stop_count(&bus).unwrap() as u32;
    depot
        .delete_stop(&StopRef::Position { bus: bus.clone(), order: last })
        .unwrap();
    assert_dense(&depot, &bus);

    let names: Vec<String> = route(&depot, &bus).into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["B", "C", "D"]);
}

#[test]
fn mutating_one_route_leaves_others_untouched() {
    let (depot, bus) = depot_with_bus("42");
    depot.create_bus("7").unwrap();
    let other = BusRef::Number("7".into());

    for name in ["A", "B", "C"] {
        depot.create_stop(&bus, name, None).unwrap();
        depot.create_stop(&other, name, None).unwrap();
    }
    depot
        .delete_stop(&StopRef::Position { bus: bus.clone(), order: 2 })
        .unwrap();

    assert_eq!(route(&depot, &bus).len(), 2);
    assert_eq!(
        route(&depot, &other),
        vec![
            ("A".to_string(), 1),
            ("B".to_string(), 2),
            ("C".to_string(), 3)
        ]
    );
}
