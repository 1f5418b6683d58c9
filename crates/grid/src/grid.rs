//! The in-memory gridded data model.

use boreas_calendar::TimeAxis;

use crate::error::GridError;

/// Returns `true` if `values` is strictly ascending or strictly descending.
///
/// Single-element axes are trivially monotonic. NaN coordinates fail both
/// orderings and are therefore rejected.
fn strictly_monotonic(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] < w[1]) || values.windows(2).all(|w| w[0] > w[1])
}

/// A gridded variable: a 3-D array in `time x lat x lon` order, stored flat
/// in C order, together with its coordinate vectors and time axis.
///
/// Construction validates that the data length matches the product of the
/// coordinate lengths and that both spatial axes are strictly monotonic
/// (ascending or descending). Missing values are NaN.
#[derive(Debug, Clone)]
pub struct Grid {
    data: Vec<f64>,
    time: TimeAxis,
    lat: Vec<f64>,
    lon: Vec<f64>,
}

impl Grid {
    /// Creates a grid after validating shapes and coordinate monotonicity.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyAxis`] if a spatial axis is empty,
    /// [`GridError::NonMonotonicAxis`] if one is not strictly monotonic, or
    /// [`GridError::ShapeMismatch`] if `data.len()` differs from
    /// `time.len() * lat.len() * lon.len()`.
    pub fn new(
        data: Vec<f64>,
        time: TimeAxis,
        lat: Vec<f64>,
        lon: Vec<f64>,
    ) -> Result<Self, GridError> {
        for (axis, coords) in [("lat", &lat), ("lon", &lon)] {
            if coords.is_empty() {
                return Err(GridError::EmptyAxis { axis: axis.into() });
            }
            if !strictly_monotonic(coords) {
                return Err(GridError::NonMonotonicAxis { axis: axis.into() });
            }
        }

        let expected = time.len() * lat.len() * lon.len();
        if data.len() != expected {
            return Err(GridError::ShapeMismatch {
                name: "data".into(),
                expected,
                got: data.len(),
            });
        }

        Ok(Self {
            data,
            time,
            lat,
            lon,
        })
    }

    /// Number of time steps.
    pub fn n_time(&self) -> usize {
        self.time.len()
    }

    /// Number of latitude points.
    pub fn n_lat(&self) -> usize {
        self.lat.len()
    }

    /// Number of longitude points.
    pub fn n_lon(&self) -> usize {
        self.lon.len()
    }

    /// The spatial shape `(n_lat, n_lon)`.
    pub fn spatial_shape(&self) -> (usize, usize) {
        (self.lat.len(), self.lon.len())
    }

    /// Latitude coordinate values (degrees north).
    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    /// Longitude coordinate values (degrees east).
    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    /// The time axis.
    pub fn time(&self) -> &TimeAxis {
        &self.time
    }

    /// The full flat data array in `time x lat x lon` order.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Flat index of `(t, i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of range.
    pub fn index(&self, t: usize, i: usize, j: usize) -> usize {
        assert!(t < self.n_time() && i < self.n_lat() && j < self.n_lon());
        (t * self.n_lat() + i) * self.n_lon() + j
    }

    /// Value at `(t, i, j)`.
    pub fn value(&self, t: usize, i: usize, j: usize) -> f64 {
        self.data[self.index(t, i, j)]
    }

    /// The 2-D plane of time step `t` as a `lat x lon` slice.
    ///
    /// # Panics
    ///
    /// Panics if `t` is out of range.
    pub fn plane(&self, t: usize) -> &[f64] {
        assert!(t < self.n_time(), "time index {t} out of range");
        let plane_len = self.n_lat() * self.n_lon();
        &self.data[t * plane_len..(t + 1) * plane_len]
    }

    /// The time series of spatial cell `(i, j)` as an owned vector.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of range.
    pub fn cell_series(&self, i: usize, j: usize) -> Vec<f64> {
        assert!(i < self.n_lat() && j < self.n_lon());
        let plane_len = self.n_lat() * self.n_lon();
        let offset = i * self.n_lon() + j;
        (0..self.n_time())
            .map(|t| self.data[t * plane_len + offset])
            .collect()
    }

    /// Multiplies every element by `factor` in place. NaN stays NaN.
    ///
    /// This is the unit-conversion primitive (e.g. mm to m with
    /// `factor = 1e-3`).
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.data {
            *v *= factor;
        }
    }

    /// Extracts the time steps in `indices` (in the given order) as a new
    /// grid on the same spatial coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ShapeMismatch`] if any index is out of range.
    pub fn select_time(&self, indices: &[usize]) -> Result<Grid, GridError> {
        let plane_len = self.n_lat() * self.n_lon();
        let mut data = Vec::with_capacity(indices.len() * plane_len);
        for &t in indices {
            if t >= self.n_time() {
                return Err(GridError::ShapeMismatch {
                    name: "time index".into(),
                    expected: self.n_time(),
                    got: t,
                });
            }
            data.extend_from_slice(self.plane(t));
        }
        Grid::new(data, self.time.subset(indices), self.lat.clone(), self.lon.clone())
    }

    /// Consumes the grid, returning `(data, time, lat, lon)`.
    pub fn into_parts(self) -> (Vec<f64>, TimeAxis, Vec<f64>, Vec<f64>) {
        (self.data, self.time, self.lat, self.lon)
    }
}
