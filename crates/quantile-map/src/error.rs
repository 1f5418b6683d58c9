//! Error types for the boreas-quantile-map crate.

/// Error type for all fallible operations in the boreas-quantile-map crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QuantileMapError {
    /// Returned when input data is empty.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when grids or series disagree in a dimension that must match.
    #[error("shape mismatch for {name}: expected {expected}, got {got}")]
    ShapeMismatch {
        /// Name of the offending dimension or array.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when two grids share a spatial shape but not coordinates.
    #[error("coordinate mismatch on axis '{axis}' at index {index}: {left} vs {right}")]
    CoordinateMismatch {
        /// Name of the offending axis.
        axis: String,
        /// First differing position.
        index: usize,
        /// Coordinate value in the left-hand grid.
        left: f64,
        /// Coordinate value in the right-hand grid.
        right: f64,
    },

    /// Returned when a distribution has too few samples to be usable.
    #[error("insufficient data in {which}: {n} sample(s), need at least {min}")]
    InsufficientData {
        /// Which input is deficient.
        which: String,
        /// Number of samples present.
        n: usize,
        /// Minimum required.
        min: usize,
    },

    /// Returned by the bulk rank transform when an input contains a
    /// non-finite sample.
    #[error("non-finite sample in {which} at index {index}; pre-filter the input")]
    NonFiniteSample {
        /// Which input holds the sample.
        which: String,
        /// Index of the first offending sample.
        index: usize,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}
