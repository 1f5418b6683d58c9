//! Result of a grid-level quantile-mapping correction.

use boreas_grid::Grid;

/// The corrected grid together with per-cell bookkeeping.
#[derive(Debug, Clone)]
pub struct QmResult {
    grid: Grid,
    n_corrected: usize,
    n_skipped: usize,
}

impl QmResult {
    pub(crate) fn new(grid: Grid, n_corrected: usize, n_skipped: usize) -> Self {
        Self {
            grid,
            n_corrected,
            n_skipped,
        }
    }

    /// The bias-corrected grid, shaped like the future input. Skipped
    /// cells hold NaN through their whole time column.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Consumes the result, returning the corrected grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Number of cells that were corrected.
    pub fn n_corrected(&self) -> usize {
        self.n_corrected
    }

    /// Number of cells skipped for insufficient reference or historical
    /// data.
    pub fn n_skipped(&self) -> usize {
        self.n_skipped
    }
}
