//! Search configuration for the planner.

use std::fmt;
use std::str::FromStr;

/// What a finalized search state is keyed on.
///
/// Once a state is extracted from the frontier, later states with the same
/// key are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinalizeKey {
    /// Location only. Can discard a state that arrives later but still
    /// leads to a better itinerary.
    Location,

    /// Location plus the arrival time of the last leg. Exact, because
    /// every continuation depends only on this pair.
    #[default]
    LocationAndArrival,
}

impl FromStr for FinalizeKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "location" => Ok(FinalizeKey::Location),
            "location-and-arrival" => Ok(FinalizeKey::LocationAndArrival),
            other => Err(format!(
                "unknown finalize key {other:?}: expected location or location-and-arrival"
            )),
        }
    }
}

impl fmt::Display for FinalizeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinalizeKey::Location => f.write_str("location"),
            FinalizeKey::LocationAndArrival => f.write_str("location-and-arrival"),
        }
    }
}

/// Configuration parameters for route search.
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    /// Key used to discard states at already-finalized positions.
    pub finalize_by: FinalizeKey,

    /// Maximum number of legs in an itinerary.
    /// States at the limit are not expanded. `None` means unbounded.
    pub max_hops: Option<usize>,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(finalize_by: FinalizeKey, max_hops: Option<usize>) -> Self {
        Self {
            finalize_by,
            max_hops,
        }
    }

    /// Configuration matching the location-keyed pruning of the original
    /// batch tool, for byte-for-byte comparisons.
    pub fn location_keyed() -> Self {
        Self::new(FinalizeKey::Location, None)
    }

    /// Whether a state with `hops` legs may be expanded further.
    pub fn can_expand(&self, hops: usize) -> bool {
        self.max_hops.is_none_or(|max| hops < max)
    }
}
