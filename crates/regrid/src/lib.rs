//! # boreas-regrid
//!
//! Spatial regridding between rectilinear climate grids: maps a field
//! sampled on a coarse source grid onto a finer target grid's coordinates.
//!
//! Two interchangeable strategies are provided:
//!
//! 1. **Weighted regridding** ([`RegridWeights`]): a sparse
//!    source-to-target weight mapping precomputed once per grid pair and
//!    reused across time steps and variables, with bilinear (default),
//!    nearest-neighbor, and conservative-area methods.
//! 2. **Scattered-point interpolation** ([`scattered`]): the source grid is
//!    treated as a triangulated point cloud and evaluated piecewise
//!    linearly, the way an unstructured interpolator would.
//!
//! Both strategies report missing data (NaN) for target points outside the
//! source extent rather than extrapolating. Longitude-convention handling
//! (0..360 vs -180..180) lives in [`normalize_longitudes`] and
//! [`restrict_longitudes`].
//!
//! ## Quick start
//!
//! ```
//! use boreas_regrid::{RegridMethod, RegridWeights};
//!
//! let weights = RegridWeights::build(
//!     &[0.0, 10.0],         // source lat
//!     &[0.0, 10.0],         // source lon
//!     &[2.5, 5.0, 7.5],     // target lat
//!     &[2.5, 5.0, 7.5],     // target lon
//!     RegridMethod::Bilinear,
//! ).unwrap();
//!
//! let fine = weights.apply(&[0.0, 1.0, 2.0, 3.0]).unwrap();
//! assert_eq!(fine.len(), 9);
//! ```

mod axis;
mod error;
mod longitude;
mod method;
pub mod scattered;
mod weights;

pub use error::RegridError;
pub use longitude::{normalize_longitudes, restrict_longitudes, wrap_longitude};
pub use method::RegridMethod;
pub use weights::RegridWeights;

/// One-shot regridding of a 3-D stack: builds the weights for the grid pair
/// and applies them to all `n_time` planes.
///
/// When several stacks share a grid pair, build [`RegridWeights`] once and
/// reuse it instead.
///
/// # Errors
///
/// Propagates [`RegridError`] from weight construction and application.
pub fn regrid_stack(
    src_lat: &[f64],
    src_lon: &[f64],
    data: &[f64],
    n_time: usize,
    tgt_lat: &[f64],
    tgt_lon: &[f64],
    method: RegridMethod,
) -> Result<Vec<f64>, RegridError> {
    let weights = RegridWeights::build(src_lat, src_lon, tgt_lat, tgt_lon, method)?;
    weights.apply_stack(data, n_time)
}
