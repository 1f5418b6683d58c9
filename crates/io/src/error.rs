//! Error types for boreas-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the boreas-io crate.
///
/// Covers I/O failures, NetCDF-specific errors, time decoding issues, and
/// data-model mismatches encountered when reading or writing grid files.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Returned when a required variable is not present in a file.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a dimension has an unexpected size or count.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when a time coordinate cannot be decoded.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time decoding issue.
        reason: String,
    },

    /// Wraps a structural error from the grid data model.
    #[error("grid error: {reason}")]
    Grid {
        /// Description of the underlying grid failure.
        reason: String,
    },
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<boreas_grid::GridError> for IoError {
    fn from(e: boreas_grid::GridError) -> Self {
        IoError::Grid {
            reason: e.to_string(),
        }
    }
}

impl From<boreas_calendar::CalendarError> for IoError {
    fn from(e: boreas_calendar::CalendarError) -> Self {
        IoError::InvalidTime {
            reason: e.to_string(),
        }
    }
}
