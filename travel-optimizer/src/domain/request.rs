//! Customer requests and optimisation criteria.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::{DomainError, Location};

/// The metric an itinerary is ranked by.
///
/// # Examples
///
/// ```
/// use travel_optimizer::domain::Criterion;
///
/// assert_eq!("Time".parse::<Criterion>().unwrap(), Criterion::Time);
/// assert_eq!(" HOPS ".parse::<Criterion>().unwrap(), Criterion::Hops);
/// assert!("distance".parse::<Criterion>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    /// Total minutes, travelling plus waiting between legs.
    Time,
    /// Total fare.
    Cost,
    /// Number of legs.
    Hops,
}

impl Criterion {
    /// Lowercase name, as accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Time => "time",
            Criterion::Cost => "cost",
            Criterion::Hops => "hops",
        }
    }
}

impl FromStr for Criterion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("time") {
            Ok(Criterion::Time)
        } else if trimmed.eq_ignore_ascii_case("cost") {
            Ok(Criterion::Cost)
        } else if trimmed.eq_ignore_ascii_case("hops") {
            Ok(Criterion::Hops)
        } else {
            Err(DomainError::InvalidCriterion(s.to_string()))
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request row as read from the request table, before validation.
///
/// Columns are positional: `requestId, customerName, source, destination, criteria`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestRecord {
    pub request_id: String,
    pub customer_name: String,
    pub source: String,
    pub destination: String,
    pub criteria: String,
}

impl RequestRecord {
    /// Create a record from its raw columns.
    pub fn new(
        request_id: impl Into<String>,
        customer_name: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
        criteria: impl Into<String>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            customer_name: customer_name.into(),
            source: source.into(),
            destination: destination.into(),
            criteria: criteria.into(),
        }
    }
}

/// A validated travel request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Caller-supplied identifier, used as the result key.
    pub id: String,

    /// Customer the request was made for.
    pub customer: String,

    pub source: Location,
    pub destination: Location,

    /// Metric the itinerary is optimised for.
    pub criterion: Criterion,
}

impl Request {
    /// Create a request from validated parts.
    pub fn new(
        id: impl Into<String>,
        customer: impl Into<String>,
        source: Location,
        destination: Location,
        criterion: Criterion,
    ) -> Self {
        Self {
            id: id.into(),
            customer: customer.into(),
            source,
            destination,
            criterion,
        }
    }

    /// Validate a raw record.
    ///
    /// This is where an unsupported criterion is rejected, before any
    /// search starts.
    pub fn from_record(record: &RequestRecord) -> Result<Self, DomainError> {
        let criterion = record.criteria.parse::<Criterion>()?;
        let source = Location::parse(&record.source)?;
        let destination = Location::parse(&record.destination)?;

        Ok(Self {
            id: record.request_id.trim().to_string(),
            customer: record.customer_name.trim().to_string(),
            source,
            destination,
            criterion,
        })
    }
}
