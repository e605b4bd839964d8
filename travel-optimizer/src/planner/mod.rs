//! Itinerary planner using best-first search.
//!
//! This module implements the core planning algorithm that answers:
//! "Which sequence of legs gets me from here to there best, by this
//! criterion?"
//!
//! The leg catalog is indexed once into a `ScheduleGraph`, then each request
//! runs a priority-ordered search over partial itineraries that only takes
//! connections a traveller could actually make.

mod config;
mod graph;
mod search;

pub use config::{FinalizeKey, SearchConfig};
pub use graph::ScheduleGraph;
pub use search::{Planner, SearchResult};
