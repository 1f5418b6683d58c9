//! # boreas-grid
//!
//! The in-memory data model shared by the Boreas pipeline: a [`Grid`] is a
//! 3-D variable (`time x lat x lon`, flat C-order storage) plus its
//! coordinate vectors and time axis. Structural invariants (array length
//! matching the declared dimensions, strictly monotonic spatial axes) are
//! enforced at construction so downstream code can index without
//! re-validating.
//!
//! ## Quick start
//!
//! ```
//! use boreas_calendar::TimeAxis;
//! use boreas_grid::Grid;
//!
//! let time = TimeAxis::from_month_offsets(2015, 1, vec![0, 1]).unwrap();
//! let grid = Grid::new(vec![0.0; 2 * 2 * 3], time, vec![40.0, 41.0], vec![5.0, 6.0, 7.0]).unwrap();
//! assert_eq!(grid.cell_series(0, 1).len(), grid.n_time());
//! ```

mod error;
mod grid;

pub use error::GridError;
pub use grid::Grid;
