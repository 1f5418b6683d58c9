//! Time-index bucketing by calendar period.
//!
//! Each grouping makes a single pass over the axis and accumulates indices
//! into a `BTreeMap`, giving deterministic iteration order sorted by key.
//! Indices whose time step cannot be decoded are skipped.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::error::CalendarError;
use crate::season::Season;
use crate::time_axis::TimeAxis;

/// Groups time indices by `(year, month)`.
pub fn group_by_month(axis: &TimeAxis) -> BTreeMap<(i32, u8), Vec<usize>> {
    let mut groups: BTreeMap<(i32, u8), Vec<usize>> = BTreeMap::new();
    for idx in 0..axis.len() {
        if let Some((year, month)) = axis.year_month(idx) {
            groups.entry((year, month)).or_default().push(idx);
        }
    }
    groups
}

/// Groups time indices by `(year, season)`.
///
/// December joins the winter labelled with its own calendar year, so the
/// winter bucket of 2020 spans January, February, and December 2020.
pub fn group_by_season(axis: &TimeAxis) -> BTreeMap<(i32, Season), Vec<usize>> {
    let mut groups: BTreeMap<(i32, Season), Vec<usize>> = BTreeMap::new();
    for idx in 0..axis.len() {
        if let Some((year, month)) = axis.year_month(idx) {
            // year_month only yields months in 1..=12.
            let season = Season::from_month(month).expect("decoded month is valid");
            groups.entry((year, season)).or_default().push(idx);
        }
    }
    groups
}

/// Groups time indices by calendar year.
pub fn group_by_year(axis: &TimeAxis) -> BTreeMap<i32, Vec<usize>> {
    let mut groups: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for idx in 0..axis.len() {
        if let Some((year, _)) = axis.year_month(idx) {
            groups.entry(year).or_default().push(idx);
        }
    }
    groups
}

/// A consecutive block of whole years in a monthly time series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearBlock {
    /// First calendar year covered by the block.
    pub start_year: i32,
    /// Last calendar year covered by the block.
    pub end_year: i32,
    /// Time-index range of the block.
    pub range: Range<usize>,
}

/// Splits a monthly series of `n_time` steps into consecutive blocks of
/// `years_per_block` years (12 steps per year), labelling blocks from
/// `start_year` onward. A trailing partial block is kept.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidBlockLength`] if `years_per_block` is 0.
pub fn monthly_blocks(
    n_time: usize,
    start_year: i32,
    years_per_block: usize,
) -> Result<Vec<YearBlock>, CalendarError> {
    if years_per_block == 0 {
        return Err(CalendarError::InvalidBlockLength);
    }

    let steps_per_block = years_per_block * 12;
    let mut blocks = Vec::new();
    let mut year = start_year;

    let mut start = 0;
    while start < n_time {
        let end = (start + steps_per_block).min(n_time);
        let end_year = year + years_per_block as i32 - 1;
        blocks.push(YearBlock {
            start_year: year,
            end_year,
            range: start..end,
        });
        year = end_year + 1;
        start = end;
    }

    Ok(blocks)
}
