//! Location identifiers.

use std::fmt;
use std::sync::Arc;

/// Error returned when parsing an invalid location token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid location: {reason}")]
pub struct InvalidLocation {
    reason: &'static str,
}

/// An opaque location identifier.
///
/// No structure is assumed beyond being a non-empty token. Surrounding
/// whitespace is trimmed. Cloning is cheap since the token is shared.
///
/// # Examples
///
/// ```
/// use travel_optimizer::domain::Location;
///
/// let city = Location::parse(" Mumbai ").unwrap();
/// assert_eq!(city.as_str(), "Mumbai");
///
/// // Blank tokens are rejected
/// assert!(Location::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location(Arc<str>);

impl Location {
    /// Parse a location token, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidLocation> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidLocation {
                reason: "must not be empty",
            });
        }
        Ok(Location(Arc::from(trimmed)))
    }

    /// Returns the location token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location({})", self.as_str())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
