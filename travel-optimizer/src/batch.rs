//! Solving a table of requests against one schedule graph.
//!
//! Requests are independent: the graph is read-only and each search keeps
//! its own state. `solve_batch` runs them one after another;
//! `solve_batch_concurrent` spreads them over tokio's blocking pool.
//!
//! A request with an unsupported criterion fails on its own and the rest of
//! the batch carries on.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, error, info, warn};

use crate::cache::PlanCache;
use crate::domain::{DomainError, OptimalSchedule, Request, RequestRecord};
use crate::planner::{Planner, ScheduleGraph, SearchConfig};

/// Result for a single request.
pub type Outcome = Result<Arc<OptimalSchedule>, DomainError>;

/// Results keyed by request id.
pub type BatchResults = BTreeMap<String, Outcome>;

/// Configuration for concurrent batch solving.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum number of searches running at once.
    pub workers: usize,
}

impl BatchConfig {
    /// Create a new configuration. At least one worker is always used.
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { workers: 4 }
    }
}

/// Solve every request in order, one at a time.
pub fn solve_batch(
    graph: &ScheduleGraph,
    records: &[RequestRecord],
    config: &SearchConfig,
    cache: Option<&PlanCache>,
) -> BatchResults {
    let planner = Planner::new(graph, config);
    let mut results = BatchResults::new();

    for record in records {
        let outcome = solve_one(&planner, record, cache);
        insert_outcome(&mut results, request_key(record), outcome);
    }

    log_summary(&results);
    results
}

/// Solve requests concurrently with at most `batch.workers` searches in flight.
///
/// Completion order does not matter. When a request id repeats, the later
/// row wins, as in `solve_batch`.
pub async fn solve_batch_concurrent(
    graph: Arc<ScheduleGraph>,
    records: Vec<RequestRecord>,
    config: Arc<SearchConfig>,
    batch: &BatchConfig,
    cache: Option<PlanCache>,
) -> BatchResults {
    let searches = records.into_iter().enumerate().map(|(idx, record)| {
        let graph = Arc::clone(&graph);
        let config = Arc::clone(&config);
        let cache = cache.clone();
        let key = request_key(&record);

        async move {
            let joined = tokio::task::spawn_blocking(move || {
                let planner = Planner::new(&graph, &config);
                solve_one(&planner, &record, cache.as_ref())
            })
            .await;
            (idx, key, joined)
        }
    });

    let mut finished: Vec<_> = stream::iter(searches)
        .buffer_unordered(batch.workers.max(1))
        .collect()
        .await;

    // Restore row order so duplicate ids resolve the same way as sequentially
    finished.sort_by_key(|(idx, _, _)| *idx);

    let mut results = BatchResults::new();
    for (_, key, joined) in finished {
        match joined {
            Ok(outcome) => insert_outcome(&mut results, key, outcome),
            Err(e) => {
                error!(request_id = %key, error = %e, "Search task failed");
            }
        }
    }

    log_summary(&results);
    results
}

fn solve_one(planner: &Planner<'_>, record: &RequestRecord, cache: Option<&PlanCache>) -> Outcome {
    let request = Request::from_record(record).inspect_err(|e| {
        warn!(request_id = %record.request_id, error = %e, "Rejecting request");
    })?;

    debug!(
        request_id = %request.id,
        customer = %request.customer,
        source = %request.source,
        destination = %request.destination,
        criterion = %request.criterion,
        "Planning request"
    );

    let schedule = match cache {
        Some(cache) => cache.get_or_plan(planner, &request),
        None => Arc::new(planner.plan(&request)),
    };
    Ok(schedule)
}

fn request_key(record: &RequestRecord) -> String {
    record.request_id.trim().to_string()
}

fn insert_outcome(results: &mut BatchResults, key: String, outcome: Outcome) {
    if results.insert(key.clone(), outcome).is_some() {
        warn!(request_id = %key, "Duplicate request id, keeping the later row");
    }
}

fn log_summary(results: &BatchResults) {
    let failed = results.values().filter(|o| o.is_err()).count();
    let unreachable = results
        .values()
        .filter(|o| matches!(o, Ok(s) if !s.is_reachable()))
        .count();

    info!(
        requests = results.len(),
        solved = results.len() - failed - unreachable,
        unreachable,
        failed,
        "Batch complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;
    use crate::domain::{ClockTime, Criterion, Leg, Location};

    fn loc(s: &str) -> Location {
        Location::parse(s).unwrap()
    }

    fn leg(from: &str, to: &str, dep: &str, arr: &str, cost: u32) -> Leg {
        Leg::new(
            loc(from),
            loc(to),
            "train",
            ClockTime::parse_hhmm(dep).unwrap(),
            ClockTime::parse_hhmm(arr).unwrap(),
            cost,
        )
        .unwrap()
    }

    fn graph() -> ScheduleGraph {
        ScheduleGraph::from_legs(vec![
            leg("A", "B", "09:00", "10:00", 5),
            leg("A", "C", "08:00", "08:30", 1),
            leg("C", "B", "08:45", "09:30", 1),
        ])
    }

    fn records() -> Vec<RequestRecord> {
        vec![
            RequestRecord::new("R1", "Asha", "A", "B", "time"),
            RequestRecord::new("R2", "Ravi", "A", "B", "COST"),
            RequestRecord::new("R3", "Meera", "A", "B", "distance"),
            RequestRecord::new("R4", "Dev", "B", "A", "hops"),
            RequestRecord::new("R5", "Asha", "A", "A", "hops"),
        ]
    }

    fn check(results: &BatchResults) {
        assert_eq!(results.len(), 5);

        let r1 = results["R1"].as_ref().unwrap();
        assert_eq!(r1.value(), 60);
        assert_eq!(r1.hop_count(), 1);

        let r2 = results["R2"].as_ref().unwrap();
        assert_eq!(r2.value(), 2);
        assert_eq!(r2.criterion(), Criterion::Cost);

        assert_eq!(
            results["R3"],
            Err(DomainError::InvalidCriterion("distance".into()))
        );

        let r4 = results["R4"].as_ref().unwrap();
        assert!(!r4.is_reachable());
        assert_eq!(r4.value(), 0);

        let r5 = results["R5"].as_ref().unwrap();
        assert!(r5.is_reachable());
        assert!(r5.legs().is_empty());
    }

    #[test]
    fn sequential_batch() {
        let results = solve_batch(&graph(), &records(), &SearchConfig::default(), None);
        check(&results);
    }

    #[test]
    fn invalid_criterion_does_not_stop_batch() {
        let records = vec![
            RequestRecord::new("R1", "Asha", "A", "B", "distance"),
            RequestRecord::new("R2", "Ravi", "A", "B", "hops"),
        ];
        let results = solve_batch(&graph(), &records, &SearchConfig::default(), None);

        assert!(results["R1"].is_err());
        assert_eq!(results["R2"].as_ref().unwrap().value(), 1);
    }

    #[test]
    fn duplicate_ids_keep_later_row() {
        let records = vec![
            RequestRecord::new("R1", "Asha", "A", "B", "time"),
            RequestRecord::new(" R1 ", "Asha", "A", "B", "cost"),
        ];
        let results = solve_batch(&graph(), &records, &SearchConfig::default(), None);

        assert_eq!(results.len(), 1);
        assert_eq!(results["R1"].as_ref().unwrap().criterion(), Criterion::Cost);
    }

    #[test]
    fn sequential_batch_with_cache() {
        let cache = PlanCache::new(&CacheConfig::default());
        let mut records = records();
        records.push(RequestRecord::new("R6", "Dev", "A", "B", "time"));

        let results = solve_batch(&graph(), &records, &SearchConfig::default(), Some(&cache));

        assert!(Arc::ptr_eq(
            results["R1"].as_ref().unwrap(),
            results["R6"].as_ref().unwrap()
        ));
        // R3 never reaches the cache
        assert_eq!(cache.entry_count(), 4);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_batch_matches_sequential() {
        let graph = Arc::new(graph());
        let config = Arc::new(SearchConfig::default());

        let results = solve_batch_concurrent(
            graph,
            records(),
            config,
            &BatchConfig::new(3),
            Some(PlanCache::new(&CacheConfig::default())),
        )
        .await;

        check(&results);
    }

    #[tokio::test]
    async fn concurrent_duplicate_ids_keep_later_row() {
        let records = vec![
            RequestRecord::new("R1", "Asha", "A", "B", "time"),
            RequestRecord::new("R1", "Asha", "A", "B", "hops"),
        ];

        let results = solve_batch_concurrent(
            Arc::new(graph()),
            records,
            Arc::new(SearchConfig::default()),
            &BatchConfig::default(),
            None,
        )
        .await;

        assert_eq!(results["R1"].as_ref().unwrap().criterion(), Criterion::Hops);
    }

    #[test]
    fn batch_config_needs_a_worker() {
        assert_eq!(BatchConfig::new(0).workers, 1);
        assert_eq!(BatchConfig::default().workers, 4);
    }
}
