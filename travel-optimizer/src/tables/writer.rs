//! Data transfer objects for the results mapping.

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;

use crate::batch::{BatchResults, Outcome};
use crate::domain::{Leg, OptimalSchedule};

use super::TableError;

/// A leg in a result itinerary.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteDto {
    pub source: String,
    pub destination: String,
    pub mode: String,

    /// Departure in HH:MM format
    pub departure_time: String,

    /// Arrival in HH:MM format
    pub arrival_time: String,
}

impl From<&Leg> for RouteDto {
    fn from(leg: &Leg) -> Self {
        Self {
            source: leg.source().to_string(),
            destination: leg.destination().to_string(),
            mode: leg.mode().to_string(),
            departure_time: leg.departure().to_string(),
            arrival_time: leg.arrival().to_string(),
        }
    }
}

/// The optimal schedule for one request.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ScheduleDto {
    /// Legs in travel order
    pub routes: Vec<RouteDto>,

    /// Criterion name: time, cost or hops
    pub criteria: String,

    /// Criterion value of the itinerary (0 when unreachable)
    pub value: u64,

    /// False when no itinerary reaches the destination
    pub reachable: bool,
}

impl From<&OptimalSchedule> for ScheduleDto {
    fn from(schedule: &OptimalSchedule) -> Self {
        Self {
            routes: schedule
                .legs()
                .iter()
                .map(|leg| RouteDto::from(leg.as_ref()))
                .collect(),
            criteria: schedule.criterion().to_string(),
            value: schedule.value(),
            reachable: schedule.is_reachable(),
        }
    }
}

/// Result entry for one request: a schedule or the reason it failed.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OutcomeDto {
    Schedule(ScheduleDto),
    Failed { error: String },
}

impl From<&Outcome> for OutcomeDto {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Ok(schedule) => OutcomeDto::Schedule(ScheduleDto::from(schedule.as_ref())),
            Err(e) => OutcomeDto::Failed {
                error: e.to_string(),
            },
        }
    }
}

/// Write the results mapping as pretty-printed JSON, keyed by request id.
pub fn write_results<W: Write>(writer: W, results: &BatchResults) -> Result<(), TableError> {
    let dtos: BTreeMap<&str, OutcomeDto> = results
        .iter()
        .map(|(id, outcome)| (id.as_str(), OutcomeDto::from(outcome)))
        .collect();
    serde_json::to_writer_pretty(writer, &dtos)?;
    Ok(())
}
