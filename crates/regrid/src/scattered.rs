//! Scattered-point interpolation over a triangulated source grid.
//!
//! The source grid is treated as a point cloud on the cross product of its
//! coordinate vectors. Each grid quad is split into two triangles along a
//! fixed diagonal and target points are evaluated by barycentric
//! interpolation within their containing triangle, which is the
//! piecewise-linear interpolant a Delaunay triangulation produces on a
//! rectilinear point set. Target points outside the source convex hull
//! receive NaN.

use rayon::prelude::*;

use crate::axis::Axis;
use crate::error::RegridError;

/// Interpolates one source plane (`lat x lon`) onto the cross product of
/// the target coordinates.
///
/// Any NaN source vertex of the containing triangle makes the target point
/// NaN; points outside the source extent are NaN, never extrapolated.
///
/// # Errors
///
/// Returns [`RegridError::DegenerateAxis`] / [`RegridError::NonMonotonicAxis`]
/// for unusable coordinates and [`RegridError::ShapeMismatch`] if `plane`
/// disagrees with the source grid size.
pub fn interpolate_plane(
    src_lat: &[f64],
    src_lon: &[f64],
    plane: &[f64],
    tgt_lat: &[f64],
    tgt_lon: &[f64],
) -> Result<Vec<f64>, RegridError> {
    let sy = Axis::new(src_lat, "source lat")?;
    let sx = Axis::new(src_lon, "source lon")?;
    Axis::new(tgt_lat, "target lat")?;
    Axis::new(tgt_lon, "target lon")?;

    if plane.len() != src_lat.len() * src_lon.len() {
        return Err(RegridError::ShapeMismatch {
            name: "plane".into(),
            expected: src_lat.len() * src_lon.len(),
            got: plane.len(),
        });
    }

    let n_lon = src_lon.len();
    let at = |i: usize, j: usize| plane[sy.original_index(i) * n_lon + sx.original_index(j)];

    let mut out = Vec::with_capacity(tgt_lat.len() * tgt_lon.len());
    for &y in tgt_lat {
        let lat_bracket = sy.bracket(y);
        for &x in tgt_lon {
            let (Some((i0, i1, u)), Some((j0, j1, v))) = (lat_bracket, sx.bracket(x)) else {
                out.push(f64::NAN);
                continue;
            };

            let z00 = at(i0, j0);
            let z10 = at(i1, j0);
            let z01 = at(i0, j1);
            let z11 = at(i1, j1);

            // Diagonal from (i1, j0) to (i0, j1).
            let value = if u + v <= 1.0 {
                z00 * (1.0 - u - v) + z10 * u + z01 * v
            } else {
                z11 * (u + v - 1.0) + z10 * (1.0 - v) + z01 * (1.0 - u)
            };
            out.push(value);
        }
    }
    Ok(out)
}

/// Interpolates a stack of `n_time` planes, one thread-pool task per time
/// step.
///
/// # Errors
///
/// Same conditions as [`interpolate_plane`], plus
/// [`RegridError::ShapeMismatch`] if `data` does not hold exactly `n_time`
/// source planes.
pub fn interpolate_stack(
    src_lat: &[f64],
    src_lon: &[f64],
    data: &[f64],
    n_time: usize,
    tgt_lat: &[f64],
    tgt_lon: &[f64],
) -> Result<Vec<f64>, RegridError> {
    // Validate the source axes up front so a degenerate grid cannot slip
    // through the shape check below as an empty stack.
    Axis::new(src_lat, "source lat")?;
    Axis::new(src_lon, "source lon")?;

    let plane_len = src_lat.len() * src_lon.len();
    if data.len() != n_time * plane_len {
        return Err(RegridError::ShapeMismatch {
            name: "stack".into(),
            expected: n_time * plane_len,
            got: data.len(),
        });
    }

    let planes: Vec<Vec<f64>> = data
        .par_chunks(plane_len)
        .map(|plane| interpolate_plane(src_lat, src_lon, plane, tgt_lat, tgt_lon))
        .collect::<Result<_, _>>()?;
    Ok(planes.concat())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn linear_plane(lat: &[f64], lon: &[f64]) -> Vec<f64> {
        let mut plane = Vec::new();
        for &y in lat {
            for &x in lon {
                plane.push(3.0 * y - 2.0 * x + 1.0);
            }
        }
        plane
    }

    #[test]
    fn reproduces_linear_field_in_both_triangles() {
        let lat = vec![0.0, 1.0];
        let lon = vec![0.0, 1.0];
        let plane = linear_plane(&lat, &lon);

        // (0.2, 0.2) falls in the lower triangle, (0.8, 0.8) in the upper.
        let out = interpolate_plane(&lat, &lon, &plane, &[0.2, 0.8], &[0.2, 0.8]).unwrap();
        assert_relative_eq!(out[0], 3.0 * 0.2 - 2.0 * 0.2 + 1.0, epsilon = 1e-12);
        assert_relative_eq!(out[3], 3.0 * 0.8 - 2.0 * 0.8 + 1.0, epsilon = 1e-12);
    }

    #[test]
    fn continuous_across_the_diagonal() {
        let lat = vec![0.0, 1.0];
        let lon = vec![0.0, 1.0];
        // A non-planar quad: the two triangles differ away from the diagonal.
        let plane = vec![0.0, 1.0, 1.0, 10.0];

        // Points on the diagonal u + v = 1 belong to both triangles.
        let out = interpolate_plane(&lat, &lon, &plane, &[0.5, 0.25], &[0.5, 0.75]).unwrap();
        assert_relative_eq!(out[0], 1.0, epsilon = 1e-12); // u=v=0.5
        assert_relative_eq!(out[3], 1.0, epsilon = 1e-12); // u=0.25, v=0.75
    }

    #[test]
    fn outside_hull_is_nan() {
        let lat = vec![0.0, 1.0];
        let lon = vec![0.0, 1.0];
        let plane = linear_plane(&lat, &lon);

        let out = interpolate_plane(&lat, &lon, &plane, &[0.5, 1.5], &[0.5, -0.5]).unwrap();
        assert!(out[0].is_finite()); // (0.5, 0.5)
        assert!(out[1].is_nan()); // lon outside
        assert!(out[2].is_nan()); // lat outside
        assert!(out[3].is_nan()); // both outside
    }

    #[test]
    fn hull_edge_is_finite() {
        let lat = vec![0.0, 1.0];
        let lon = vec![0.0, 1.0];
        let plane = linear_plane(&lat, &lon);

        let out = interpolate_plane(&lat, &lon, &plane, &[0.0, 1.0], &[0.0, 1.0]).unwrap();
        for (&v, &expected) in out.iter().zip(plane.iter()) {
            assert_relative_eq!(v, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn nan_vertex_poisons_containing_triangle_only() {
        let lat = vec![0.0, 1.0, 2.0];
        let lon = vec![0.0, 1.0, 2.0];
        let mut plane = linear_plane(&lat, &lon);
        plane[0] = f64::NAN; // vertex (0, 0)

        let out = interpolate_plane(&lat, &lon, &plane, &[0.1, 1.5], &[0.1, 1.5]).unwrap();
        assert!(out[0].is_nan()); // near the poisoned corner
        assert!(out[3].is_finite()); // opposite quad untouched
    }

    #[test]
    fn descending_source_axes_match_ascending() {
        let lat = vec![0.0, 1.0, 2.0];
        let lon = vec![0.0, 1.0, 2.0];
        let plane = linear_plane(&lat, &lon);

        let lat_desc: Vec<f64> = lat.iter().rev().copied().collect();
        let mut plane_desc = vec![0.0; 9];
        for i in 0..3 {
            for j in 0..3 {
                plane_desc[(2 - i) * 3 + j] = plane[i * 3 + j];
            }
        }

        let tgt = [0.3, 1.7];
        let a = interpolate_plane(&lat, &lon, &plane, &tgt, &tgt).unwrap();
        let b = interpolate_plane(&lat_desc, &lon, &plane_desc, &tgt, &tgt).unwrap();
        for (&x, &y) in a.iter().zip(b.iter()) {
            assert_relative_eq!(x, y, epsilon = 1e-12);
        }
    }

    #[test]
    fn degenerate_target_rejected() {
        let lat = vec![0.0, 1.0];
        let lon = vec![0.0, 1.0];
        let plane = linear_plane(&lat, &lon);
        let result = interpolate_plane(&lat, &lon, &plane, &[0.5], &[0.25, 0.75]);
        assert!(matches!(result, Err(RegridError::DegenerateAxis { .. })));
    }

    #[test]
    fn stack_interpolates_each_time_step() {
        let lat = vec![0.0, 1.0];
        let lon = vec![0.0, 1.0];
        let p0 = linear_plane(&lat, &lon);
        let p1: Vec<f64> = p0.iter().map(|v| v * 2.0).collect();
        let mut stack = p0.clone();
        stack.extend_from_slice(&p1);

        let tgt = [0.25, 0.75];
        let out = interpolate_stack(&lat, &lon, &stack, 2, &tgt, &tgt).unwrap();
        let out0 = interpolate_plane(&lat, &lon, &p0, &tgt, &tgt).unwrap();
        let out1 = interpolate_plane(&lat, &lon, &p1, &tgt, &tgt).unwrap();
        assert_eq!(&out[..4], out0.as_slice());
        assert_eq!(&out[4..], out1.as_slice());
    }
}
