//! Domain types for the travel optimizer.
//!
//! This module contains the core domain model types that represent
//! validated schedule data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod error;
mod leg;
mod location;
mod request;
mod schedule;
mod time;

pub use error::DomainError;
pub use leg::Leg;
pub use location::{InvalidLocation, Location};
pub use request::{Criterion, Request, RequestRecord};
pub use schedule::OptimalSchedule;
pub use time::{ClockTime, TimeError};
