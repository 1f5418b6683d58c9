//! Empirical quantile mapping for climate bias correction.
//!
//! This crate adjusts model output so its statistical distribution matches
//! an observational reference. Two functionally distinct operations are
//! provided and deliberately kept separate:
//!
//! - **Per-cell correction** ([`correct_series`], [`correct_grid`]): the
//!   three-distribution form. Each spatial cell's future series is ranked
//!   within the model's *historical* distribution and those percentiles are
//!   inverted through the *reference* distribution's quantile map
//!   (open-interval plotting positions, monotone linear interpolation).
//!   Cells whose reference or historical series fall below a valid-sample
//!   threshold are left as NaN.
//! - **Bulk rank transform** ([`rank_transform`]): the two-distribution
//!   form. Observed and model arrays are flattened whole, and every model
//!   value is replaced by the observed value at its normalized rank
//!   (closed-interval double-argsort ranks). Requires pre-filtered finite
//!   input.
//!
//! The two differ in rank convention and in missing-data handling; their
//! numeric results are not interchangeable.
//!
//! # Quick start
//!
//! ```
//! use boreas_quantile_map::{QmConfig, correct_series};
//!
//! let reference: Vec<f64> = (1..=12).map(f64::from).collect();
//! let historical: Vec<f64> = reference.iter().map(|v| v + 2.0).collect();
//! let future = [8.0, f64::NAN, 14.0];
//!
//! let corrected = correct_series(&reference, &historical, &future, &QmConfig::new());
//! assert_eq!(corrected.len(), 3);
//! assert!(corrected[1].is_nan());
//! ```

mod bulk;
mod cell;
mod config;
mod error;
mod map;
mod result;

pub use bulk::rank_transform;
pub use cell::{correct_series, empirical_percentile};
pub use config::QmConfig;
pub use error::QuantileMapError;
pub use map::QuantileMap;
pub use result::QmResult;

use boreas_grid::Grid;
use rayon::prelude::*;
use tracing::{debug, info};

/// Validates that two grids agree on a named spatial axis.
fn check_axis(
    axis: &str,
    which: &str,
    left: &[f64],
    right: &[f64],
) -> Result<(), QuantileMapError> {
    if left.len() != right.len() {
        return Err(QuantileMapError::ShapeMismatch {
            name: format!("{which} {axis}"),
            expected: left.len(),
            got: right.len(),
        });
    }
    for (index, (&a, &b)) in left.iter().zip(right.iter()).enumerate() {
        if (a - b).abs() > 1e-6 {
            return Err(QuantileMapError::CoordinateMismatch {
                axis: format!("{which} {axis}"),
                index,
                left: a,
                right: b,
            });
        }
    }
    Ok(())
}

/// Validates that all three grids share the reference's spatial grid.
fn validate_grids(
    reference: &Grid,
    historical: &Grid,
    future: &Grid,
) -> Result<(), QuantileMapError> {
    for (which, grid) in [("historical", historical), ("future", future)] {
        check_axis("lat", which, reference.lat(), grid.lat())?;
        check_axis("lon", which, reference.lon(), grid.lon())?;
    }
    Ok(())
}

/// Bias-corrects a future grid cell by cell against a reference grid,
/// conditioned on the model's historical grid.
///
/// All three grids must share the same spatial coordinates (time lengths
/// may differ). Each cell is corrected independently with
/// [`correct_series`] semantics; the per-cell work is fanned out over a
/// thread pool and gathered into a pre-allocated output, each worker
/// owning a disjoint set of output columns.
///
/// The returned [`QmResult`] holds a grid shaped like `future` (skipped
/// cells all-NaN) plus corrected/skipped cell counts.
///
/// # Errors
///
/// Returns [`QuantileMapError::ShapeMismatch`] or
/// [`QuantileMapError::CoordinateMismatch`] if the grids disagree
/// spatially, or [`QuantileMapError::InvalidConfig`] for an unusable
/// configuration.
pub fn correct_grid(
    reference: &Grid,
    historical: &Grid,
    future: &Grid,
    config: &QmConfig,
) -> Result<QmResult, QuantileMapError> {
    config.validate()?;
    validate_grids(reference, historical, future)?;

    let (n_lat, n_lon) = future.spatial_shape();
    let n_cells = n_lat * n_lon;
    let n_time = future.n_time();
    debug!(n_cells, n_time, min_valid = config.min_valid(), "correcting grid");

    // Fan out: one task per cell, each returning its corrected column (or
    // None for a skip). Fan in: scatter the columns into a NaN-filled
    // output buffer.
    let columns: Vec<Option<Vec<f64>>> = (0..n_cells)
        .into_par_iter()
        .map(|cell| {
            let (i, j) = (cell / n_lon, cell % n_lon);
            cell::correct_cell(
                &reference.cell_series(i, j),
                &historical.cell_series(i, j),
                &future.cell_series(i, j),
                config.min_valid(),
            )
        })
        .collect();

    let mut data = vec![f64::NAN; n_time * n_cells];
    let mut n_corrected = 0usize;
    let mut n_skipped = 0usize;
    for (cell, column) in columns.into_iter().enumerate() {
        match column {
            Some(series) => {
                for (t, value) in series.into_iter().enumerate() {
                    data[t * n_cells + cell] = value;
                }
                n_corrected += 1;
            }
            None => n_skipped += 1,
        }
    }

    info!(n_corrected, n_skipped, "grid correction complete");

    // Coordinates come from an already-validated grid and the buffer was
    // sized to match, so reconstruction cannot fail.
    let grid = Grid::new(
        data,
        future.time().clone(),
        future.lat().to_vec(),
        future.lon().to_vec(),
    )
    .expect("output grid mirrors the validated future grid");

    Ok(QmResult::new(grid, n_corrected, n_skipped))
}
