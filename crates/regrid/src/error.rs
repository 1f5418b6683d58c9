//! Error types for the boreas-regrid crate.

/// Error type for all fallible operations in the boreas-regrid crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegridError {
    /// Returned when a spatial axis has too few points for interpolation.
    #[error("axis '{axis}' has {len} point(s); at least 2 are required for interpolation")]
    DegenerateAxis {
        /// Name of the offending axis.
        axis: String,
        /// Number of points on the axis.
        len: usize,
    },

    /// Returned when a coordinate vector is not strictly monotonic.
    #[error("coordinate axis '{axis}' is not strictly monotonic")]
    NonMonotonicAxis {
        /// Name of the offending axis.
        axis: String,
    },

    /// Returned when a data array disagrees with the declared grid shape.
    #[error("shape mismatch for {name}: expected {expected} elements, got {got}")]
    ShapeMismatch {
        /// Name of the offending array.
        name: String,
        /// Expected element count.
        expected: usize,
        /// Actual element count.
        got: usize,
    },
}
