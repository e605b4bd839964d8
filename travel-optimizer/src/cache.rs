//! Caching layer for planned schedules.
//!
//! The schedule graph never changes once built, so a search for the same
//! (source, destination, criterion) always yields the same schedule. Batches
//! often repeat popular requests; the cache answers repeats without
//! searching again.
//!
//! A cache is only valid for the graph and search configuration it was
//! filled with. Build a new one for a new catalog.

use std::sync::Arc;

use moka::sync::Cache as MokaCache;

use crate::domain::{Criterion, Location, OptimalSchedule, Request};
use crate::planner::Planner;

/// Cache key for schedules: (source, destination, criterion).
type PlanKey = (Location, Location, Criterion);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached schedules.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
        }
    }
}

/// Cache of planned schedules, shareable across worker threads.
///
/// Cloning is cheap and clones share the same entries.
#[derive(Clone)]
pub struct PlanCache {
    plans: MokaCache<PlanKey, Arc<OptimalSchedule>>,
}

impl PlanCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let plans = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .build();

        Self { plans }
    }

    /// Get the cached schedule for a request, planning it on a miss.
    ///
    /// Concurrent misses on the same key run the search once.
    pub fn get_or_plan(&self, planner: &Planner<'_>, request: &Request) -> Arc<OptimalSchedule> {
        let key = (
            request.source.clone(),
            request.destination.clone(),
            request.criterion,
        );
        self.plans.get_with(key, || Arc::new(planner.plan(request)))
    }

    /// Get a cached schedule, if present.
    pub fn get(
        &self,
        source: &Location,
        destination: &Location,
        criterion: Criterion,
    ) -> Option<Arc<OptimalSchedule>> {
        self.plans
            .get(&(source.clone(), destination.clone(), criterion))
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.plans.run_pending_tasks();
        self.plans.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.plans.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClockTime, Leg};
    use crate::planner::{ScheduleGraph, SearchConfig};

    fn loc(s: &str) -> Location {
        Location::parse(s).unwrap()
    }

    fn graph() -> ScheduleGraph {
        ScheduleGraph::from_legs(vec![
            Leg::new(
                loc("A"),
                loc("B"),
                "train",
                ClockTime::parse_hhmm("09:00").unwrap(),
                ClockTime::parse_hhmm("10:00").unwrap(),
                5,
            )
            .unwrap(),
        ])
    }

    #[test]
    fn default_config() {
        assert_eq!(CacheConfig::default().max_capacity, 10_000);
    }

    #[test]
    fn repeats_share_one_schedule() {
        let graph = graph();
        let config = SearchConfig::default();
        let planner = Planner::new(&graph, &config);
        let cache = PlanCache::new(&CacheConfig::default());

        let first = Request::new("R1", "Asha", loc("A"), loc("B"), Criterion::Time);
        let repeat = Request::new("R2", "Ravi", loc("A"), loc("B"), Criterion::Time);

        let a = cache.get_or_plan(&planner, &first);
        let b = cache.get_or_plan(&planner, &repeat);

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.value(), 60);
        assert_eq!(cache.entry_count(), 1);
    }

    #[test]
    fn criterion_is_part_of_key() {
        let graph = graph();
        let config = SearchConfig::default();
        let planner = Planner::new(&graph, &config);
        let cache = PlanCache::new(&CacheConfig::default());

        let by_time = Request::new("R1", "Asha", loc("A"), loc("B"), Criterion::Time);
        let by_cost = Request::new("R2", "Asha", loc("A"), loc("B"), Criterion::Cost);

        assert_eq!(cache.get_or_plan(&planner, &by_time).value(), 60);
        assert_eq!(cache.get_or_plan(&planner, &by_cost).value(), 5);
        assert!(cache.get(&loc("A"), &loc("B"), Criterion::Hops).is_none());
        assert_eq!(cache.entry_count(), 2);
    }

    #[test]
    fn invalidate_all_clears() {
        let graph = graph();
        let config = SearchConfig::default();
        let planner = Planner::new(&graph, &config);
        let cache = PlanCache::new(&CacheConfig::default());

        let request = Request::new("R1", "Asha", loc("A"), loc("B"), Criterion::Hops);
        cache.get_or_plan(&planner, &request);
        assert!(cache.get(&loc("A"), &loc("B"), Criterion::Hops).is_some());

        cache.invalidate_all();
        assert!(cache.get(&loc("A"), &loc("B"), Criterion::Hops).is_none());
    }
}
