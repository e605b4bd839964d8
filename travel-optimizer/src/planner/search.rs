//! Best-first itinerary search.
//!
//! Finds the itinerary from a request's source to its destination that is
//! minimal under the request's criterion. The frontier is a priority queue
//! of partial itineraries; the first one extracted at the destination wins.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::domain::{ClockTime, Criterion, Leg, Location, OptimalSchedule, Request};

use super::config::{FinalizeKey, SearchConfig};
use super::graph::ScheduleGraph;

/// Ordering key of a state: (primary, secondary, tertiary).
type Rank = (u64, u64, u64);

/// Result of one search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The winning itinerary, or the empty unreachable schedule.
    pub schedule: OptimalSchedule,

    /// Number of states taken off the frontier.
    pub states_extracted: usize,

    /// Number of extracted states discarded as already finalized.
    pub states_pruned: usize,
}

/// Search state: partial itinerary ending at a location.
///
/// The path is extended by copy, never in place, so states pushed from the
/// same parent do not share a buffer.
#[derive(Debug, Clone)]
struct SearchState {
    /// Current location.
    location: Location,

    /// Arrival time of the last leg taken. `None` before the first leg.
    last_arrival: Option<ClockTime>,

    /// Legs taken so far.
    path: Vec<Arc<Leg>>,

    /// Travel plus waiting minutes.
    total_minutes: u64,

    total_cost: u64,
}

impl SearchState {
    /// The state at the request's source, before any leg is taken.
    fn initial(source: &Location) -> Self {
        Self {
            location: source.clone(),
            last_arrival: None,
            path: Vec::new(),
            total_minutes: 0,
            total_cost: 0,
        }
    }

    fn hops(&self) -> u64 {
        self.path.len() as u64
    }

    fn rank(&self, criterion: Criterion) -> Rank {
        match criterion {
            Criterion::Time => (self.total_minutes, self.total_cost, self.hops()),
            Criterion::Cost => (self.total_cost, self.total_minutes, self.hops()),
            Criterion::Hops => (self.hops(), self.total_minutes, self.total_cost),
        }
    }

    /// Value of the primary metric.
    fn value(&self, criterion: Criterion) -> u64 {
        self.rank(criterion).0
    }

    fn at(&self, destination: &Location) -> bool {
        &self.location == destination
    }

    /// Key under which this state is finalized.
    fn finalize_key(&self, by: FinalizeKey) -> (Location, Option<ClockTime>) {
        match by {
            FinalizeKey::Location => (self.location.clone(), None),
            FinalizeKey::LocationAndArrival => (self.location.clone(), self.last_arrival),
        }
    }

    /// Take `leg` from the current location.
    ///
    /// Returns `None` if the leg departs before the previous leg arrives.
    /// There is no next-day boarding.
    fn extend(&self, leg: &Arc<Leg>) -> Option<Self> {
        let waiting = match self.last_arrival {
            Some(arrival) => {
                if !leg.boardable_after(arrival) {
                    return None;
                }
                arrival.minutes_until(leg.departure()) as u64
            }
            None => 0,
        };

        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend(self.path.iter().cloned());
        path.push(leg.clone());

        Some(Self {
            location: leg.destination().clone(),
            last_arrival: Some(leg.arrival()),
            path,
            total_minutes: self.total_minutes + leg.travel_minutes() + waiting,
            total_cost: self.total_cost + u64::from(leg.cost()),
        })
    }

    fn into_schedule(self, criterion: Criterion) -> OptimalSchedule {
        let value = self.value(criterion);
        OptimalSchedule::found(self.path, criterion, value)
    }
}

/// Frontier entry, ordered so that `BinaryHeap` pops the lowest rank.
///
/// Equal ranks pop in insertion order.
#[derive(Debug)]
struct FrontierEntry {
    rank: Rank,
    seq: u64,
    state: SearchState,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank && self.seq == other.seq
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .rank
            .cmp(&self.rank)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority frontier for one search.
struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    criterion: Criterion,
    next_seq: u64,
}

impl Frontier {
    fn new(criterion: Criterion) -> Self {
        Self {
            heap: BinaryHeap::new(),
            criterion,
            next_seq: 0,
        }
    }

    fn push(&mut self, state: SearchState) {
        let rank = state.rank(self.criterion);
        self.heap.push(FrontierEntry {
            rank,
            seq: self.next_seq,
            state,
        });
        self.next_seq += 1;
    }

    fn pop(&mut self) -> Option<SearchState> {
        self.heap.pop().map(|entry| entry.state)
    }
}

/// Itinerary planner over a shared schedule graph.
///
/// Holds only shared references, so one graph can serve any number of
/// planners on different threads.
pub struct Planner<'a> {
    graph: &'a ScheduleGraph,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a ScheduleGraph, config: &'a SearchConfig) -> Self {
        Self { graph, config }
    }

    /// Find the optimal schedule for a request.
    pub fn plan(&self, request: &Request) -> OptimalSchedule {
        self.search(&request.source, &request.destination, request.criterion)
            .schedule
    }

    /// Search for the best itinerary between two locations.
    pub fn search(
        &self,
        source: &Location,
        destination: &Location,
        criterion: Criterion,
    ) -> SearchResult {
        let mut frontier = Frontier::new(criterion);
        frontier.push(SearchState::initial(source));

        let mut finalized: HashSet<(Location, Option<ClockTime>)> = HashSet::new();
        let mut states_extracted = 0;
        let mut states_pruned = 0;

        while let Some(state) = frontier.pop() {
            states_extracted += 1;

            if state.at(destination) {
                debug!(
                    source = %source,
                    destination = %destination,
                    criterion = %criterion,
                    hops = state.path.len(),
                    value = state.value(criterion),
                    states_extracted,
                    states_pruned,
                    "Route found"
                );
                return SearchResult {
                    schedule: state.into_schedule(criterion),
                    states_extracted,
                    states_pruned,
                };
            }

            if !finalized.insert(state.finalize_key(self.config.finalize_by)) {
                states_pruned += 1;
                continue;
            }

            if !self.config.can_expand(state.path.len()) {
                continue;
            }

            for leg in self.graph.outbound(&state.location) {
                match state.extend(leg) {
                    Some(next) => frontier.push(next),
                    None => trace!(
                        location = %state.location,
                        departure = %leg.departure(),
                        "Skipping leg that departs before arrival"
                    ),
                }
            }
        }

        debug!(
            source = %source,
            destination = %destination,
            criterion = %criterion,
            states_extracted,
            states_pruned,
            "No route found"
        );

        SearchResult {
            schedule: OptimalSchedule::unreachable(criterion),
            states_extracted,
            states_pruned,
        }
    }
}
