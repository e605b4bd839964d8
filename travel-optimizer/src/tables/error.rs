//! Table reading and result writing errors.

use std::path::PathBuf;

use crate::domain::{DomainError, TimeError};

/// Errors from reading the input tables or writing results.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The file could not be opened or its header read
    #[error("cannot read {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A row is malformed (wrong column count, bad encoding)
    #[error("{}:{line}: malformed row: {source}", path.display())]
    Row {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// A column could not be parsed
    #[error("{}:{line}: invalid {column}: {message}", path.display())]
    Column {
        path: PathBuf,
        line: u64,
        column: &'static str,
        message: String,
    },

    /// A row parsed but does not describe a valid leg
    #[error("{}:{line}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        line: u64,
        #[source]
        source: DomainError,
    },

    /// The results file could not be created or written
    #[error("cannot write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Results could not be serialized
    #[error("failed to write results: {0}")]
    Write(#[from] serde_json::Error),
}

impl TableError {
    pub(crate) fn column(
        path: &std::path::Path,
        line: u64,
        column: &'static str,
        err: impl std::fmt::Display,
    ) -> Self {
        TableError::Column {
            path: path.to_path_buf(),
            line,
            column,
            message: err.to_string(),
        }
    }

    pub(crate) fn time(
        path: &std::path::Path,
        line: u64,
        column: &'static str,
        err: TimeError,
    ) -> Self {
        Self::column(path, line, column, err)
    }
}
