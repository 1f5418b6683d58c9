//! Precomputed regridding weights.

use rayon::prelude::*;
use tracing::debug;

use crate::axis::Axis;
use crate::error::RegridError;
use crate::method::RegridMethod;

/// A reusable source-to-target weight mapping for one (source grid, target
/// grid) pair.
///
/// Building the weights costs one pass over the target grid; applying them
/// is a sparse weighted sum per target cell and can be repeated across any
/// number of time steps and variables that share the same grid pair.
///
/// Target cells with no source support (outside the source extent) carry an
/// empty stencil and always produce NaN, never an extrapolated value. A
/// NaN source value anywhere in a cell's stencil also produces NaN.
#[derive(Debug, Clone)]
pub struct RegridWeights {
    src_len: usize,
    tgt_shape: (usize, usize),
    stencils: Vec<Vec<(usize, f64)>>,
    method: RegridMethod,
}

impl RegridWeights {
    /// Builds the weight mapping from source to target coordinates.
    ///
    /// Both grids must have at least 2 strictly monotonic points per axis;
    /// ascending and descending axes are both accepted.
    ///
    /// # Errors
    ///
    /// Returns [`RegridError::DegenerateAxis`] or
    /// [`RegridError::NonMonotonicAxis`] for unusable coordinates.
    pub fn build(
        src_lat: &[f64],
        src_lon: &[f64],
        tgt_lat: &[f64],
        tgt_lon: &[f64],
        method: RegridMethod,
    ) -> Result<Self, RegridError> {
        let sy = Axis::new(src_lat, "source lat")?;
        let sx = Axis::new(src_lon, "source lon")?;
        let ty = Axis::new(tgt_lat, "target lat")?;
        let tx = Axis::new(tgt_lon, "target lon")?;

        let n_src_lon = sx.len();
        let to_src = |i: usize, j: usize| sy.original_index(i) * n_src_lon + sx.original_index(j);

        let n_tgt = tgt_lat.len() * tgt_lon.len();
        let mut stencils = vec![Vec::new(); n_tgt];

        match method {
            RegridMethod::Bilinear => {
                for (ti, &y) in tgt_lat.iter().enumerate() {
                    let lat_bracket = sy.bracket(y);
                    for (tj, &x) in tgt_lon.iter().enumerate() {
                        let (Some((i0, i1, u)), Some((j0, j1, v))) = (lat_bracket, sx.bracket(x))
                        else {
                            continue;
                        };
                        stencils[ti * tgt_lon.len() + tj] = vec![
                            (to_src(i0, j0), (1.0 - u) * (1.0 - v)),
                            (to_src(i0, j1), (1.0 - u) * v),
                            (to_src(i1, j0), u * (1.0 - v)),
                            (to_src(i1, j1), u * v),
                        ];
                    }
                }
            }
            RegridMethod::NearestNeighbor => {
                for (ti, &y) in tgt_lat.iter().enumerate() {
                    let lat_nearest = sy.nearest(y);
                    for (tj, &x) in tgt_lon.iter().enumerate() {
                        let (Some(i), Some(j)) = (lat_nearest, sx.nearest(x)) else {
                            continue;
                        };
                        stencils[ti * tgt_lon.len() + tj] = vec![(to_src(i, j), 1.0)];
                    }
                }
            }
            RegridMethod::ConservativeArea => {
                let src_lat_edges = sy.cell_edges();
                let src_lon_edges = sx.cell_edges();
                let tgt_lat_edges = ty.cell_edges();
                let tgt_lon_edges = tx.cell_edges();

                // Separable per-axis overlap lengths, indexed by ascending
                // target position.
                let lat_overlaps: Vec<Vec<(usize, f64)>> = (0..ty.len())
                    .map(|k| axis_overlaps(&src_lat_edges, tgt_lat_edges[k], tgt_lat_edges[k + 1]))
                    .collect();
                let lon_overlaps: Vec<Vec<(usize, f64)>> = (0..tx.len())
                    .map(|k| axis_overlaps(&src_lon_edges, tgt_lon_edges[k], tgt_lon_edges[k + 1]))
                    .collect();

                for ti in 0..tgt_lat.len() {
                    for tj in 0..tgt_lon.len() {
                        // Ascending positions of this target cell on both axes.
                        let pi = ty.perm_position(ti);
                        let pj = tx.perm_position(tj);
                        let lats = &lat_overlaps[pi];
                        let lons = &lon_overlaps[pj];

                        let total: f64 = lats.iter().map(|(_, a)| a).sum::<f64>()
                            * lons.iter().map(|(_, a)| a).sum::<f64>();
                        if total <= 0.0 {
                            continue;
                        }

                        let mut stencil = Vec::with_capacity(lats.len() * lons.len());
                        for &(i, wy) in lats {
                            for &(j, wx) in lons {
                                stencil.push((to_src(i, j), wy * wx / total));
                            }
                        }
                        stencils[ti * tgt_lon.len() + tj] = stencil;
                    }
                }
            }
        }

        debug!(
            n_src = src_lat.len() * src_lon.len(),
            n_tgt,
            ?method,
            "built regrid weights"
        );

        Ok(Self {
            src_len: src_lat.len() * src_lon.len(),
            tgt_shape: (tgt_lat.len(), tgt_lon.len()),
            stencils,
            method,
        })
    }

    /// The interpolation method these weights were built with.
    pub fn method(&self) -> RegridMethod {
        self.method
    }

    /// The target shape `(n_lat, n_lon)`.
    pub fn target_shape(&self) -> (usize, usize) {
        self.tgt_shape
    }

    /// Regrids a single 2-D plane (`lat x lon`, source order) onto the
    /// target grid.
    ///
    /// # Errors
    ///
    /// Returns [`RegridError::ShapeMismatch`] if `plane` does not match the
    /// source grid size.
    pub fn apply(&self, plane: &[f64]) -> Result<Vec<f64>, RegridError> {
        if plane.len() != self.src_len {
            return Err(RegridError::ShapeMismatch {
                name: "plane".into(),
                expected: self.src_len,
                got: plane.len(),
            });
        }

        let out = self
            .stencils
            .iter()
            .map(|stencil| {
                if stencil.is_empty() {
                    return f64::NAN;
                }
                let mut acc = 0.0;
                for &(idx, w) in stencil {
                    let v = plane[idx];
                    if v.is_nan() {
                        return f64::NAN;
                    }
                    acc += w * v;
                }
                acc
            })
            .collect();
        Ok(out)
    }

    /// Regrids a 3-D stack of `n_time` planes, fanning the independent time
    /// steps out over a thread pool.
    ///
    /// # Errors
    ///
    /// Returns [`RegridError::ShapeMismatch`] if `data` does not hold
    /// exactly `n_time` source planes.
    pub fn apply_stack(&self, data: &[f64], n_time: usize) -> Result<Vec<f64>, RegridError> {
        if data.len() != n_time * self.src_len {
            return Err(RegridError::ShapeMismatch {
                name: "stack".into(),
                expected: n_time * self.src_len,
                got: data.len(),
            });
        }

        let planes: Vec<Vec<f64>> = data
            .par_chunks(self.src_len)
            .map(|plane| self.apply(plane))
            .collect::<Result<_, _>>()?;
        Ok(planes.concat())
    }
}

/// Overlap lengths of the interval `[lo, hi]` with each source cell.
fn axis_overlaps(src_edges: &[f64], lo: f64, hi: f64) -> Vec<(usize, f64)> {
    let mut out = Vec::new();
    for k in 0..src_edges.len() - 1 {
        let a = src_edges[k].max(lo);
        let b = src_edges[k + 1].min(hi);
        if b > a {
            out.push((k, b - a));
        }
    }
    out
}
