//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from file and format errors, which live in `io`.

use super::{ClockTime, InvalidLocation};

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Leg arrives earlier in the day than it departs
    #[error("leg arrives at {arrival} before it departs at {departure} (overnight legs are not supported)")]
    OvernightLeg {
        departure: ClockTime,
        arrival: ClockTime,
    },

    /// Criterion is not one of the supported values
    #[error("invalid criterion {0:?}: expected one of time/cost/hops")]
    InvalidCriterion(String),

    /// Location token is blank
    #[error(transparent)]
    InvalidLocation(#[from] InvalidLocation),
}
