//! Error types for the boreas-calendar crate.

/// Error type for all fallible operations in the boreas-calendar crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a month value is outside 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month value.
        month: u8,
    },

    /// Returned when a block length of zero years is requested.
    #[error("years_per_block must be >= 1")]
    InvalidBlockLength,
}
