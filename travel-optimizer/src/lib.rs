//! Travel itinerary optimizer.
//!
//! Answers, for each customer request: "Which connecting legs get me from
//! my source to my destination fastest, cheapest, or with fewest hops?"

pub mod batch;
pub mod cache;
pub mod domain;
pub mod planner;
pub mod tables;
