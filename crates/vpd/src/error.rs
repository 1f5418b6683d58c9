//! Error types for the boreas-vpd crate.

/// Error type for all fallible operations in the boreas-vpd crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum VpdError {
    /// Returned when the temperature and humidity grids disagree in shape.
    #[error("shape mismatch for {name}: temperature has {expected}, humidity has {got}")]
    ShapeMismatch {
        /// Name of the offending dimension.
        name: String,
        /// Size on the temperature grid.
        expected: usize,
        /// Size on the humidity grid.
        got: usize,
    },
}
