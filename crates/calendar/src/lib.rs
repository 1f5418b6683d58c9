//! # boreas-calendar
//!
//! Time axis decoding and time-index bucketing for gridded climate data.
//!
//! Climate model files carry their time coordinate either as decoded
//! calendar timestamps or as integer "months since" offsets; [`TimeAxis`]
//! unifies both behind a per-index `(year, month)` lookup. On top of that,
//! the bucketing functions partition time indices into calendar periods
//! (month, season, year, multi-year block) for block extraction and
//! per-period processing.
//!
//! ## Quick start
//!
//! ```
//! use boreas_calendar::{TimeAxis, group_by_season, Season};
//!
//! // Three years of monthly data starting January 2015.
//! let axis = TimeAxis::from_month_offsets(2015, 1, (0..36).collect()).unwrap();
//!
//! let seasons = group_by_season(&axis);
//! let winter_2015 = &seasons[&(2015, Season::Winter)];
//! assert_eq!(winter_2015, &vec![0, 1, 11]); // Jan, Feb, Dec 2015
//! ```

mod buckets;
mod error;
mod season;
mod time_axis;

pub use buckets::{YearBlock, group_by_month, group_by_season, group_by_year, monthly_blocks};
pub use error::CalendarError;
pub use season::Season;
pub use time_axis::TimeAxis;
