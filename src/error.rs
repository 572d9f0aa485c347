use std::path::PathBuf;

use thiserror::Error;

use crate::data::model::{FilterKind, FilterValue};

/// Canonical result for the filter core.
pub type Result<T> = std::result::Result<T, FilterError>;

/// Every way a filter run can stop.  All variants are terminal for the run.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Source path unset, missing, unreadable, or not a supported table.
    #[error("Source file is unavailable: {reason}")]
    SourceUnavailable {
        path: Option<PathBuf>,
        reason: String,
    },

    /// Filter column or value was left blank.
    #[error("Specify both the filter column and the filter value")]
    MissingFilter,

    /// The value text cannot be read as the selected type.
    #[error("'{raw}' is not a valid {kind} filter value: {reason}")]
    InvalidFilterInput {
        kind: FilterKind,
        raw: String,
        reason: String,
    },

    #[error("Column '{column}' was not found in the table headers")]
    UnknownColumn { column: String },

    #[error("Value '{value}' was not found in column '{column}'")]
    NoMatchingValue { column: String, value: FilterValue },

    #[error("Output column '{column}' was not found in the table headers")]
    UnknownOutputColumn { column: String },

    #[error("No destination file name was given")]
    DestinationUndefined,

    #[error("Could not write {}: {reason}", .path.display())]
    WriteFailed { path: PathBuf, reason: String },

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl FilterError {
    /// Build a [`FilterError::SourceUnavailable`] from a detailed cause chain.
    pub fn source_unavailable(path: Option<PathBuf>, cause: &anyhow::Error) -> Self {
        FilterError::SourceUnavailable {
            path,
            reason: format!("{cause:#}"),
        }
    }

    /// Whether the failure is about the filter inputs (column/value) rather
    /// than files.
    pub fn is_filter_error(&self) -> bool {
        matches!(
            self,
            FilterError::UnknownColumn { .. }
                | FilterError::NoMatchingValue { .. }
                | FilterError::InvalidFilterInput { .. }
                | FilterError::MissingFilter
        )
    }
}
