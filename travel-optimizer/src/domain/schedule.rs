//! Optimal schedule type.
//!
//! An `OptimalSchedule` is the answer to one request: the chosen legs in
//! travel order, the criterion they were chosen by, and that criterion's
//! value for the chosen itinerary.

use std::sync::Arc;

use super::{ClockTime, Criterion, Leg};

/// The best itinerary found for a request.
///
/// # Invariants
///
/// - Consecutive legs connect: destination of one = source of the next
/// - Each leg departs no earlier than the previous one arrives
/// - An unreachable schedule has no legs and value 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimalSchedule {
    legs: Vec<Arc<Leg>>,
    criterion: Criterion,
    value: u64,
    reachable: bool,
}

impl OptimalSchedule {
    /// A schedule for an itinerary that reaches the destination.
    pub fn found(legs: Vec<Arc<Leg>>, criterion: Criterion, value: u64) -> Self {
        Self {
            legs,
            criterion,
            value,
            reachable: true,
        }
    }

    /// The empty, zero-valued schedule returned when no route exists.
    pub fn unreachable(criterion: Criterion) -> Self {
        Self {
            legs: Vec::new(),
            criterion,
            value: 0,
            reachable: false,
        }
    }

    /// Returns the legs in travel order.
    pub fn legs(&self) -> &[Arc<Leg>] {
        &self.legs
    }

    /// Returns the criterion the itinerary was ranked by.
    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    /// Returns the criterion's value for this itinerary.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Whether the destination was reached.
    ///
    /// A request whose source is its destination is reachable with no
    /// legs and value 0; only an exhausted search is unreachable.
    pub fn is_reachable(&self) -> bool {
        self.reachable
    }

    /// Returns the number of legs.
    pub fn hop_count(&self) -> usize {
        self.legs.len()
    }

    /// Returns the sum of leg fares.
    pub fn total_cost(&self) -> u64 {
        self.legs.iter().map(|leg| u64::from(leg.cost())).sum()
    }

    /// Returns the total minutes from first departure to last arrival.
    ///
    /// This is the travel time of every leg plus the waits between them.
    pub fn total_minutes(&self) -> u64 {
        let travel: u64 = self.legs.iter().map(|leg| leg.travel_minutes()).sum();
        let waiting: u64 = self
            .legs
            .windows(2)
            .map(|pair| pair[0].arrival().minutes_until(pair[1].departure()).max(0) as u64)
            .sum();
        travel + waiting
    }

    /// Departure time of the first leg.
    pub fn departure_time(&self) -> Option<ClockTime> {
        self.legs.first().map(|leg| leg.departure())
    }

    /// Arrival time of the last leg.
    pub fn arrival_time(&self) -> Option<ClockTime> {
        self.legs.last().map(|leg| leg.arrival())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Location;

    fn leg(from: &str, to: &str, dep: &str, arr: &str, cost: u32) -> Arc<Leg> {
        Arc::new(
            Leg::new(
                Location::parse(from).unwrap(),
                Location::parse(to).unwrap(),
                "train",
                ClockTime::parse_hhmm(dep).unwrap(),
                ClockTime::parse_hhmm(arr).unwrap(),
                cost,
            )
            .unwrap(),
        )
    }

    #[test]
    fn unreachable_is_empty() {
        let schedule = OptimalSchedule::unreachable(Criterion::Cost);
        assert!(schedule.legs().is_empty());
        assert_eq!(schedule.value(), 0);
        assert_eq!(schedule.criterion(), Criterion::Cost);
        assert!(!schedule.is_reachable());
        assert_eq!(schedule.departure_time(), None);
    }

    #[test]
    fn totals_include_waiting() {
        let legs = vec![
            leg("A", "C", "08:00", "08:30", 1),
            leg("C", "B", "08:45", "09:30", 1),
        ];
        let schedule = OptimalSchedule::found(legs, Criterion::Time, 90);

        assert!(schedule.is_reachable());
        assert_eq!(schedule.hop_count(), 2);
        assert_eq!(schedule.total_cost(), 2);
        assert_eq!(schedule.total_minutes(), 90);
        assert_eq!(schedule.departure_time().unwrap().to_string(), "08:00");
        assert_eq!(schedule.arrival_time().unwrap().to_string(), "09:30");
    }

    #[test]
    fn same_location_is_reachable_with_zero_value() {
        let schedule = OptimalSchedule::found(Vec::new(), Criterion::Hops, 0);
        assert!(schedule.is_reachable());
        assert_eq!(schedule.total_minutes(), 0);
        assert_eq!(schedule.hop_count(), 0);
    }
}
