//! Schedule graph for route search.
//!
//! The leg catalog is flat. The search needs "which legs leave location X?"
//! on every expansion, so the catalog is indexed once by origin and then
//! shared read-only by every search.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::domain::{Leg, Location};

/// Legs of the catalog indexed by their source location.
///
/// Built once per catalog and never mutated afterwards, so it can be
/// shared across concurrent searches without locking.
#[derive(Debug, Default)]
pub struct ScheduleGraph {
    /// Map from location -> legs departing from it, in catalog order.
    outbound: HashMap<Location, Vec<Arc<Leg>>>,

    leg_count: usize,
}

impl ScheduleGraph {
    /// Build the graph from a catalog of legs.
    ///
    /// Every leg is indexed exactly once, under its source. A leg's
    /// destination need not be the source of any other leg. An empty
    /// catalog gives an empty graph.
    pub fn from_legs(legs: impl IntoIterator<Item = Leg>) -> Self {
        let mut outbound: HashMap<Location, Vec<Arc<Leg>>> = HashMap::new();
        let mut leg_count = 0;

        for leg in legs {
            outbound
                .entry(leg.source().clone())
                .or_default()
                .push(Arc::new(leg));
            leg_count += 1;
        }

        debug!(
            legs = leg_count,
            origins = outbound.len(),
            "Built schedule graph"
        );

        Self {
            outbound,
            leg_count,
        }
    }

    /// Get the legs departing from a location.
    pub fn outbound(&self, location: &Location) -> &[Arc<Leg>] {
        self.outbound
            .get(location)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Check if any leg departs from a location.
    pub fn has_outbound(&self, location: &Location) -> bool {
        self.outbound.contains_key(location)
    }

    /// Get all locations with at least one departing leg.
    pub fn origins(&self) -> impl Iterator<Item = &Location> {
        self.outbound.keys()
    }

    /// Get the number of locations with departing legs.
    pub fn location_count(&self) -> usize {
        self.outbound.len()
    }

    /// Get the total number of legs.
    pub fn leg_count(&self) -> usize {
        self.leg_count
    }

    /// Returns true if the catalog had no legs.
    pub fn is_empty(&self) -> bool {
        self.leg_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClockTime;

    fn loc(s: &str) -> Location {
        Location::parse(s).unwrap()
    }

    fn leg(from: &str, to: &str, dep: &str, arr: &str, cost: u32) -> Leg {
        Leg::new(
            loc(from),
            loc(to),
            "bus",
            ClockTime::parse_hhmm(dep).unwrap(),
            ClockTime::parse_hhmm(arr).unwrap(),
            cost,
        )
        .unwrap()
    }

    #[test]
    fn empty_catalog() {
        let graph = ScheduleGraph::from_legs(Vec::new());

        assert!(graph.is_empty());
        assert_eq!(graph.leg_count(), 0);
        assert_eq!(graph.location_count(), 0);
        assert!(graph.outbound(&loc("A")).is_empty());
    }

    #[test]
    fn indexes_by_source() {
        let graph = ScheduleGraph::from_legs(vec![
            leg("A", "B", "09:00", "10:00", 5),
            leg("A", "C", "08:00", "08:30", 1),
            leg("C", "B", "08:45", "09:30", 1),
        ]);

        assert_eq!(graph.leg_count(), 3);
        assert_eq!(graph.location_count(), 2);
        assert_eq!(graph.outbound(&loc("A")).len(), 2);
        assert_eq!(graph.outbound(&loc("C")).len(), 1);

        // B is only a destination
        assert!(!graph.has_outbound(&loc("B")));
        assert!(graph.outbound(&loc("B")).is_empty());
    }

    #[test]
    fn preserves_catalog_order_per_origin() {
        let graph = ScheduleGraph::from_legs(vec![
            leg("A", "B", "09:00", "10:00", 5),
            leg("X", "Y", "06:00", "07:00", 2),
            leg("A", "B", "07:00", "09:30", 3),
        ]);

        let from_a: Vec<_> = graph
            .outbound(&loc("A"))
            .iter()
            .map(|l| l.departure().to_string())
            .collect();
        assert_eq!(from_a, vec!["09:00", "07:00"]);
    }

    #[test]
    fn keeps_duplicate_legs() {
        let graph = ScheduleGraph::from_legs(vec![
            leg("A", "B", "09:00", "10:00", 5),
            leg("A", "B", "09:00", "10:00", 5),
        ]);

        assert_eq!(graph.leg_count(), 2);
        assert_eq!(graph.outbound(&loc("A")).len(), 2);
    }

    #[test]
    fn origins_iterator() {
        let graph = ScheduleGraph::from_legs(vec![
            leg("A", "B", "09:00", "10:00", 5),
            leg("C", "B", "08:45", "09:30", 1),
        ]);

        let origins: Vec<_> = graph.origins().collect();
        assert_eq!(origins.len(), 2);
        assert!(origins.contains(&&loc("A")));
        assert!(origins.contains(&&loc("C")));
    }
}
