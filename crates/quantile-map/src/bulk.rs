//! Bulk two-distribution rank transform.
//!
//! Calibrates one model epoch against observations directly: every model
//! value is replaced by the observed value at its own normalized rank.
//! Unlike the per-cell correction this flattens all cells into a single
//! pair of distributions and has no missing-data tolerance; inputs must
//! be pre-filtered to finite values.

use boreas_stats::{interp, uniform_positions};

use crate::error::QuantileMapError;

/// Rejects empty or non-finite input.
fn validate_samples(values: &[f64], which: &str) -> Result<(), QuantileMapError> {
    if values.len() < 2 {
        return Err(QuantileMapError::InsufficientData {
            which: which.to_string(),
            n: values.len(),
            min: 2,
        });
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(QuantileMapError::NonFiniteSample {
            which: which.to_string(),
            index,
        });
    }
    Ok(())
}

/// Normalized ranks of `values`: double argsort divided by `n - 1`.
///
/// The inner sort is stable, so tied values receive consecutive ranks in
/// input order rather than jittered or averaged ranks. The minimum maps to
/// rank 0 and the maximum to rank 1 exactly.
fn normalized_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0.0; n];
    let denom = (n - 1) as f64;
    for (rank, &idx) in order.iter().enumerate() {
        ranks[idx] = rank as f64 / denom;
    }
    ranks
}

/// Maps every model value onto the observed distribution by normalized
/// rank.
///
/// The sorted observed samples are first resampled onto a uniform
/// probability grid with the model's cardinality, then each model value's
/// rank (double argsort over `n - 1`) is looked up in that curve by linear
/// interpolation. The output has the model's length and ordering; callers
/// keep responsibility for any reshaping.
///
/// Observed and model arrays may differ in length.
///
/// # Errors
///
/// Returns [`QuantileMapError::InsufficientData`] if either input has
/// fewer than 2 samples, or [`QuantileMapError::NonFiniteSample`] if
/// either contains NaN or infinity: ranks computed over non-finite
/// samples would silently corrupt every downstream value, so the finite
/// precondition is enforced rather than assumed.
pub fn rank_transform(observed: &[f64], model: &[f64]) -> Result<Vec<f64>, QuantileMapError> {
    validate_samples(observed, "observed")?;
    validate_samples(model, "model")?;

    let mut sorted_obs = observed.to_vec();
    sorted_obs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    // Resample the observed quantile curve to the model's cardinality.
    let obs_positions = uniform_positions(sorted_obs.len());
    let model_positions = uniform_positions(model.len());
    let resampled: Vec<f64> = model_positions
        .iter()
        .map(|&p| interp(p, &obs_positions, &sorted_obs))
        .collect();

    let ranks = normalized_ranks(model);
    let mapped = ranks
        .iter()
        .map(|&r| interp(r, &model_positions, &resampled))
        .collect();
    Ok(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn boundary_ranks_hit_zero_and_one() {
        let ranks = normalized_ranks(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_relative_eq!(ranks[0], 0.0);
        assert_relative_eq!(ranks[4], 1.0);
        assert_relative_eq!(ranks[2], 0.5);
    }

    #[test]
    fn ranks_follow_input_order() {
        let ranks = normalized_ranks(&[30.0, 10.0, 20.0]);
        assert_relative_eq!(ranks[0], 1.0);
        assert_relative_eq!(ranks[1], 0.0);
        assert_relative_eq!(ranks[2], 0.5);
    }

    #[test]
    fn ties_get_consecutive_ranks_in_input_order() {
        let ranks = normalized_ranks(&[5.0, 5.0, 1.0]);
        // Stable sort: the first 5.0 outranks nothing but the 1.0.
        assert_relative_eq!(ranks[2], 0.0);
        assert_relative_eq!(ranks[0], 0.5);
        assert_relative_eq!(ranks[1], 1.0);
    }

    #[test]
    fn min_and_max_map_to_observed_extremes() {
        let observed = [100.0, 110.0, 120.0, 130.0];
        let model = [1.0, 2.0, 3.0, 4.0, 5.0];

        let out = rank_transform(&observed, &model).unwrap();
        assert_relative_eq!(out[0], 100.0);
        assert_relative_eq!(out[4], 130.0);
    }

    #[test]
    fn identical_distributions_reproduce_model() {
        let model = [4.0, 1.0, 3.0, 2.0, 5.0];
        let out = rank_transform(&model, &model).unwrap();
        for (&m, &o) in model.iter().zip(out.iter()) {
            assert_relative_eq!(o, m, epsilon = 1e-12);
        }
    }

    #[test]
    fn preserves_model_ordering() {
        let observed: Vec<f64> = (0..50).map(|i| (i as f64).sqrt() * 3.0).collect();
        let model = [9.0, 2.0, 7.0, 7.5, 0.1];

        let out = rank_transform(&observed, &model).unwrap();
        for i in 0..model.len() {
            for j in 0..model.len() {
                if model[i] < model[j] {
                    assert!(out[i] <= out[j], "rank order broken at ({i}, {j})");
                }
            }
        }
    }

    #[test]
    fn differing_lengths_resample_observed_curve() {
        let observed = [0.0, 10.0]; // coarse curve
        let model = [1.0, 2.0, 3.0];

        let out = rank_transform(&observed, &model).unwrap();
        assert_relative_eq!(out[0], 0.0);
        assert_relative_eq!(out[1], 5.0);
        assert_relative_eq!(out[2], 10.0);
    }

    #[test]
    fn nan_in_model_rejected() {
        let observed = [1.0, 2.0, 3.0];
        let model = [1.0, f64::NAN, 3.0];
        let result = rank_transform(&observed, &model);
        assert!(matches!(
            result,
            Err(QuantileMapError::NonFiniteSample { index: 1, .. })
        ));
    }

    #[test]
    fn nan_in_observed_rejected() {
        let observed = [f64::NAN, 2.0, 3.0];
        let model = [1.0, 2.0, 3.0];
        assert!(rank_transform(&observed, &model).is_err());
    }

    #[test]
    fn too_few_samples_rejected() {
        assert!(matches!(
            rank_transform(&[1.0], &[1.0, 2.0]),
            Err(QuantileMapError::InsufficientData { .. })
        ));
        assert!(rank_transform(&[1.0, 2.0], &[1.0]).is_err());
    }
}
