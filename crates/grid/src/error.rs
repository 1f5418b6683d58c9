//! Error types for the boreas-grid crate.

/// Error type for all fallible operations in the boreas-grid crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GridError {
    /// Returned when an array length disagrees with the declared dimensions.
    #[error("shape mismatch for {name}: expected {expected} elements, got {got}")]
    ShapeMismatch {
        /// Name of the offending array or dimension.
        name: String,
        /// Expected element count.
        expected: usize,
        /// Actual element count.
        got: usize,
    },

    /// Returned when a coordinate vector is empty.
    #[error("coordinate axis '{axis}' is empty")]
    EmptyAxis {
        /// Name of the empty axis.
        axis: String,
    },

    /// Returned when a coordinate vector is not strictly monotonic.
    #[error("coordinate axis '{axis}' is not strictly monotonic")]
    NonMonotonicAxis {
        /// Name of the offending axis.
        axis: String,
    },
}
