//! Time axis representations for gridded climate data.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;

/// The time coordinate of a grid.
///
/// Climate files carry time either as calendar-decodable day offsets
/// (already resolved to dates by the reader) or as integer month counts
/// since a base month. Both decode to a `(year, month)` pair per index,
/// which is all the bucketing layer needs.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeAxis {
    /// Decoded calendar timestamps, one per time step.
    Dates(Vec<NaiveDate>),
    /// Integer offsets in months since a base month.
    MonthOffsets {
        /// Base year of the offset origin.
        base_year: i32,
        /// Base month (1..=12) of the offset origin.
        base_month: u8,
        /// Whole-month offsets from the base, one per time step.
        offsets: Vec<i64>,
    },
}

impl TimeAxis {
    /// Builds a month-offset axis after validating the base month.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `base_month` is outside
    /// 1..=12.
    pub fn from_month_offsets(
        base_year: i32,
        base_month: u8,
        offsets: Vec<i64>,
    ) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&base_month) {
            return Err(CalendarError::InvalidMonth { month: base_month });
        }
        Ok(TimeAxis::MonthOffsets {
            base_year,
            base_month,
            offsets,
        })
    }

    /// Number of time steps.
    pub fn len(&self) -> usize {
        match self {
            TimeAxis::Dates(d) => d.len(),
            TimeAxis::MonthOffsets { offsets, .. } => offsets.len(),
        }
    }

    /// Returns `true` if the axis has no time steps.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `(year, month)` of time step `idx`, or `None` if out of range.
    pub fn year_month(&self, idx: usize) -> Option<(i32, u8)> {
        match self {
            TimeAxis::Dates(d) => d.get(idx).map(|dt| (dt.year(), dt.month() as u8)),
            TimeAxis::MonthOffsets {
                base_year,
                base_month,
                offsets,
            } => {
                let offset = *offsets.get(idx)?;
                let total = i64::from(*base_month) - 1 + offset;
                let year = *base_year as i64 + total.div_euclid(12);
                let month = total.rem_euclid(12) + 1;
                Some((year as i32, month as u8))
            }
        }
    }

    /// Restricts the axis to the given time indices, preserving their order.
    ///
    /// Out-of-range indices are ignored.
    pub fn subset(&self, indices: &[usize]) -> TimeAxis {
        match self {
            TimeAxis::Dates(d) => {
                TimeAxis::Dates(indices.iter().filter_map(|&i| d.get(i).copied()).collect())
            }
            TimeAxis::MonthOffsets {
                base_year,
                base_month,
                offsets,
            } => TimeAxis::MonthOffsets {
                base_year: *base_year,
                base_month: *base_month,
                offsets: indices
                    .iter()
                    .filter_map(|&i| offsets.get(i).copied())
                    .collect(),
            },
        }
    }
}
