//! Readers for the schedule and request tables.
//!
//! Both tables are comma-separated with a header line that is skipped.
//! Columns are read by position, not by header name.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::{ClockTime, Leg, Location, RequestRecord};

use super::TableError;

/// Raw schedule row: `source, destination, mode, departureTime, arrivalTime, cost`.
#[derive(Debug, Deserialize)]
struct LegRow {
    source: String,
    destination: String,
    mode: String,
    departure_time: String,
    arrival_time: String,
    cost: String,
}

impl LegRow {
    fn into_leg(self, path: &Path, line: u64) -> Result<Leg, TableError> {
        let source =
            Location::parse(&self.source).map_err(|e| TableError::column(path, line, "source", e))?;
        let destination = Location::parse(&self.destination)
            .map_err(|e| TableError::column(path, line, "destination", e))?;
        let departure = ClockTime::parse_hhmm(&self.departure_time)
            .map_err(|e| TableError::time(path, line, "departureTime", e))?;
        let arrival = ClockTime::parse_hhmm(&self.arrival_time)
            .map_err(|e| TableError::time(path, line, "arrivalTime", e))?;
        let cost: u32 = self
            .cost
            .parse()
            .map_err(|e| TableError::column(path, line, "cost", e))?;

        Leg::new(source, destination, self.mode, departure, arrival, cost).map_err(|source| {
            TableError::Invalid {
                path: path.to_path_buf(),
                line,
                source,
            }
        })
    }
}

/// Read the leg catalog from a schedule table.
///
/// Any malformed row fails the whole load, naming the file and line.
pub fn read_schedules(path: &Path) -> Result<Vec<Leg>, TableError> {
    let reader = open(path)?;
    let legs = read_legs(reader, path)?;
    info!(path = %path.display(), legs = legs.len(), "Loaded schedule table");
    Ok(legs)
}

/// Read request rows from a request table.
///
/// Criteria are left unvalidated so that one bad criterion fails only its
/// own request.
pub fn read_requests(path: &Path) -> Result<Vec<RequestRecord>, TableError> {
    let reader = open(path)?;
    let records = read_request_records(reader, path)?;
    info!(path = %path.display(), requests = records.len(), "Loaded request table");
    Ok(records)
}

fn open(path: &Path) -> Result<csv::Reader<std::fs::File>, TableError> {
    builder()
        .from_path(path)
        .map_err(|source| TableError::Open {
            path: path.to_path_buf(),
            source,
        })
}

fn builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).trim(csv::Trim::All);
    builder
}

fn read_legs<R: Read>(mut reader: csv::Reader<R>, path: &Path) -> Result<Vec<Leg>, TableError> {
    let mut legs = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|source| row_error(path, source))?;
        let line = line_of(&record);

        let row: LegRow = record
            .deserialize(None)
            .map_err(|source| TableError::Row {
                path: path.to_path_buf(),
                line,
                source,
            })?;
        legs.push(row.into_leg(path, line)?);
    }

    debug!(path = %path.display(), rows = legs.len(), "Parsed schedule rows");
    Ok(legs)
}

fn read_request_records<R: Read>(
    mut reader: csv::Reader<R>,
    path: &Path,
) -> Result<Vec<RequestRecord>, TableError> {
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|source| row_error(path, source))?;
        let line = line_of(&record);

        let row: RequestRecord = record
            .deserialize(None)
            .map_err(|source| TableError::Row {
                path: path.to_path_buf(),
                line,
                source,
            })?;
        records.push(row);
    }

    Ok(records)
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn row_error(path: &Path, source: csv::Error) -> TableError {
    let line = source.position().map(|p| p.line()).unwrap_or(0);
    TableError::Row {
        path: path.to_path_buf(),
        line,
        source,
    }
}
