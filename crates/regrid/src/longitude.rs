//! Longitude convention handling.
//!
//! CMIP6 grids commonly run 0..360 degrees east while observational grids
//! run -180..180. [`normalize_longitudes`] rewrites a grid's longitude axis
//! into the -180..180 convention, reordering the data columns to keep the
//! axis monotonic; [`restrict_longitudes`] drops any columns left outside
//! the canonical range before output.

use crate::error::RegridError;

/// Wraps a single longitude into [-180, 180).
pub fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Rewrites `lon` into the -180..180 convention and reorders the columns of
/// `data` (shape `n_time x n_lat x lon.len()`) to match the re-sorted axis.
///
/// Returns the new `(lon, data)` pair.
///
/// # Errors
///
/// Returns [`RegridError::ShapeMismatch`] if `data` disagrees with the
/// declared shape and [`RegridError::NonMonotonicAxis`] if two columns wrap
/// onto the same meridian (e.g. both 0 and 360 present).
pub fn normalize_longitudes(
    lon: &[f64],
    data: &[f64],
    n_time: usize,
    n_lat: usize,
) -> Result<(Vec<f64>, Vec<f64>), RegridError> {
    let n_lon = lon.len();
    if data.len() != n_time * n_lat * n_lon {
        return Err(RegridError::ShapeMismatch {
            name: "data".into(),
            expected: n_time * n_lat * n_lon,
            got: data.len(),
        });
    }

    let wrapped: Vec<f64> = lon.iter().copied().map(wrap_longitude).collect();

    let mut order: Vec<usize> = (0..n_lon).collect();
    order.sort_by(|&a, &b| {
        wrapped[a]
            .partial_cmp(&wrapped[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let sorted_lon: Vec<f64> = order.iter().map(|&j| wrapped[j]).collect();
    if sorted_lon.windows(2).any(|w| w[0] >= w[1]) {
        return Err(RegridError::NonMonotonicAxis { axis: "lon".into() });
    }

    let mut out = Vec::with_capacity(data.len());
    for t in 0..n_time {
        for i in 0..n_lat {
            let row = &data[(t * n_lat + i) * n_lon..(t * n_lat + i + 1) * n_lon];
            out.extend(order.iter().map(|&j| row[j]));
        }
    }

    Ok((sorted_lon, out))
}

/// Keeps only the columns whose longitude lies within [-180, 180].
///
/// Returns the subset `(lon, data)` pair.
///
/// # Errors
///
/// Returns [`RegridError::ShapeMismatch`] if `data` disagrees with the
/// declared shape and [`RegridError::DegenerateAxis`] if no columns remain.
pub fn restrict_longitudes(
    lon: &[f64],
    data: &[f64],
    n_time: usize,
    n_lat: usize,
) -> Result<(Vec<f64>, Vec<f64>), RegridError> {
    let n_lon = lon.len();
    if data.len() != n_time * n_lat * n_lon {
        return Err(RegridError::ShapeMismatch {
            name: "data".into(),
            expected: n_time * n_lat * n_lon,
            got: data.len(),
        });
    }

    let keep: Vec<usize> = (0..n_lon)
        .filter(|&j| (-180.0..=180.0).contains(&lon[j]))
        .collect();
    if keep.is_empty() {
        return Err(RegridError::DegenerateAxis {
            axis: "lon".into(),
            len: 0,
        });
    }

    let kept_lon: Vec<f64> = keep.iter().map(|&j| lon[j]).collect();
    let mut out = Vec::with_capacity(n_time * n_lat * keep.len());
    for t in 0..n_time {
        for i in 0..n_lat {
            let row = &data[(t * n_lat + i) * n_lon..(t * n_lat + i + 1) * n_lon];
            out.extend(keep.iter().map(|&j| row[j]));
        }
    }

    Ok((kept_lon, out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn wrap_basic() {
        assert_relative_eq!(wrap_longitude(0.0), 0.0);
        assert_relative_eq!(wrap_longitude(185.0), -175.0);
        assert_relative_eq!(wrap_longitude(359.0), -1.0);
        assert_relative_eq!(wrap_longitude(-170.0), -170.0);
    }

    #[test]
    fn wrap_180_maps_to_minus_180() {
        assert_relative_eq!(wrap_longitude(180.0), -180.0);
    }

    #[test]
    fn normalize_rotates_zero_360_grid() {
        // Longitudes 0, 90, 180, 270 -> -180, -90, 0, 90 after wrapping.
        let lon = [0.0, 90.0, 180.0, 270.0];
        let data = [10.0, 11.0, 12.0, 13.0];

        let (new_lon, new_data) = normalize_longitudes(&lon, &data, 1, 1).unwrap();
        assert_eq!(new_lon, vec![-180.0, -90.0, 0.0, 90.0]);
        // Column order follows the longitudes: 180, 270, 0, 90.
        assert_eq!(new_data, vec![12.0, 13.0, 10.0, 11.0]);
    }

    #[test]
    fn normalize_reorders_every_row() {
        let lon = [270.0, 0.0];
        // 2 time steps x 2 lats x 2 lons.
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];

        let (new_lon, new_data) = normalize_longitudes(&lon, &data, 2, 2).unwrap();
        assert_eq!(new_lon, vec![-90.0, 0.0]);
        assert_eq!(new_data, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn normalize_detects_duplicate_meridian() {
        let lon = [0.0, 360.0];
        let data = [1.0, 2.0];
        assert!(matches!(
            normalize_longitudes(&lon, &data, 1, 1),
            Err(RegridError::NonMonotonicAxis { .. })
        ));
    }

    #[test]
    fn restrict_drops_out_of_range_columns() {
        let lon = [-190.0, -90.0, 0.0, 90.0, 190.0];
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];

        let (kept_lon, kept) = restrict_longitudes(&lon, &data, 1, 1).unwrap();
        assert_eq!(kept_lon, vec![-90.0, 0.0, 90.0]);
        assert_eq!(kept, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn restrict_keeps_inclusive_bounds() {
        let lon = [-180.0, 180.0];
        let data = [1.0, 2.0];
        let (kept_lon, _) = restrict_longitudes(&lon, &data, 1, 1).unwrap();
        assert_eq!(kept_lon.len(), 2);
    }

    #[test]
    fn restrict_empty_result_is_error() {
        let lon = [200.0, 210.0];
        let data = [1.0, 2.0];
        assert!(matches!(
            restrict_longitudes(&lon, &data, 1, 1),
            Err(RegridError::DegenerateAxis { len: 0, .. })
        ));
    }

    #[test]
    fn shape_mismatch_rejected() {
        let lon = [0.0, 90.0];
        let data = [1.0; 3];
        assert!(normalize_longitudes(&lon, &data, 1, 1).is_err());
        assert!(restrict_longitudes(&lon, &data, 1, 1).is_err());
    }
}
