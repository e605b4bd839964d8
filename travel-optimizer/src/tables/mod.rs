//! Input tables and result output.
//!
//! Reads the schedule and request tables into domain types, and writes the
//! results mapping as JSON.

mod error;
mod reader;
mod writer;

pub use error::TableError;
pub use reader::{read_requests, read_schedules};
pub use writer::{OutcomeDto, RouteDto, ScheduleDto, write_results};
