//! Scheduled leg type.
//!
//! A `Leg` is one directed, timetabled movement between two locations.
//! Legs are immutable once loaded and are shared through `Arc` by the
//! schedule graph and every itinerary that uses them.

use super::{ClockTime, DomainError, Location};

/// One scheduled leg of the catalog.
///
/// # Invariants
///
/// - `arrival >= departure` (no overnight legs)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    source: Location,
    destination: Location,
    mode: String,
    departure: ClockTime,
    arrival: ClockTime,
    cost: u32,
}

impl Leg {
    /// Construct a leg, rejecting one that arrives before it departs.
    ///
    /// # Examples
    ///
    /// ```
    /// use travel_optimizer::domain::{ClockTime, Leg, Location};
    ///
    /// let leg = Leg::new(
    ///     Location::parse("A").unwrap(),
    ///     Location::parse("B").unwrap(),
    ///     "train",
    ///     ClockTime::parse_hhmm("09:00").unwrap(),
    ///     ClockTime::parse_hhmm("10:15").unwrap(),
    ///     5,
    /// )
    /// .unwrap();
    /// assert_eq!(leg.travel_minutes(), 75);
    ///
    /// // Overnight legs are rejected
    /// assert!(Leg::new(
    ///     Location::parse("A").unwrap(),
    ///     Location::parse("B").unwrap(),
    ///     "bus",
    ///     ClockTime::parse_hhmm("23:00").unwrap(),
    ///     ClockTime::parse_hhmm("01:00").unwrap(),
    ///     5,
    /// )
    /// .is_err());
    /// ```
    pub fn new(
        source: Location,
        destination: Location,
        mode: impl Into<String>,
        departure: ClockTime,
        arrival: ClockTime,
        cost: u32,
    ) -> Result<Self, DomainError> {
        if arrival < departure {
            return Err(DomainError::OvernightLeg { departure, arrival });
        }

        Ok(Leg {
            source,
            destination,
            mode: mode.into(),
            departure,
            arrival,
            cost,
        })
    }

    /// Returns the origin location.
    pub fn source(&self) -> &Location {
        &self.source
    }

    /// Returns the destination location.
    pub fn destination(&self) -> &Location {
        &self.destination
    }

    /// Returns the transport mode label.
    pub fn mode(&self) -> &str {
        &self.mode
    }

    /// Returns the departure time.
    pub fn departure(&self) -> ClockTime {
        self.departure
    }

    /// Returns the arrival time.
    pub fn arrival(&self) -> ClockTime {
        self.arrival
    }

    /// Returns the fare.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Minutes spent travelling on this leg.
    pub fn travel_minutes(&self) -> u64 {
        // Non-negative: checked at construction
        self.departure.minutes_until(self.arrival) as u64
    }

    /// Whether this leg can be boarded by someone arriving at `arrival`.
    pub fn boardable_after(&self, arrival: ClockTime) -> bool {
        self.departure >= arrival
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(s: &str) -> Location {
        Location::parse(s).unwrap()
    }

    fn time(s: &str) -> ClockTime {
        ClockTime::parse_hhmm(s).unwrap()
    }

    #[test]
    fn valid_leg() {
        let leg = Leg::new(loc("A"), loc("B"), "flight", time("09:00"), time("10:00"), 5).unwrap();
        assert_eq!(leg.source(), &loc("A"));
        assert_eq!(leg.destination(), &loc("B"));
        assert_eq!(leg.mode(), "flight");
        assert_eq!(leg.departure(), time("09:00"));
        assert_eq!(leg.arrival(), time("10:00"));
        assert_eq!(leg.cost(), 5);
        assert_eq!(leg.travel_minutes(), 60);
    }

    #[test]
    fn zero_duration_leg_allowed() {
        let leg = Leg::new(loc("A"), loc("B"), "walk", time("09:00"), time("09:00"), 0).unwrap();
        assert_eq!(leg.travel_minutes(), 0);
    }

    #[test]
    fn overnight_leg_rejected() {
        let err = Leg::new(loc("A"), loc("B"), "bus", time("23:30"), time("00:30"), 1).unwrap_err();
        assert_eq!(
            err,
            DomainError::OvernightLeg {
                departure: time("23:30"),
                arrival: time("00:30"),
            }
        );
    }

    #[test]
    fn boardable_after() {
        let leg = Leg::new(loc("C"), loc("B"), "train", time("08:45"), time("09:30"), 1).unwrap();
        assert!(leg.boardable_after(time("08:30")));
        assert!(leg.boardable_after(time("08:45")));
        assert!(!leg.boardable_after(time("08:46")));
    }
}
