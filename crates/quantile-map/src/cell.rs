//! Per-cell three-distribution empirical quantile mapping.

use boreas_stats::sorted_finite;

use crate::config::QmConfig;
use crate::map::QuantileMap;

/// Empirical CDF position of `value` within a sorted historical series:
/// the fraction of samples strictly less than `value`, in [0, 1].
///
/// Ties count as "not strictly less", biasing the percentile slightly low
/// for repeated values. This tie-break is part of the numeric contract and
/// must not be changed.
pub fn empirical_percentile(sorted_historical: &[f64], value: f64) -> f64 {
    debug_assert!(!sorted_historical.is_empty());
    let below = sorted_historical.partition_point(|&h| h < value);
    below as f64 / sorted_historical.len() as f64
}

/// Corrects one cell's future series, or skips it.
///
/// Returns `None` when the reference or historical series holds fewer than
/// `min_valid` finite samples; the caller decides what the skip means (the
/// grid driver leaves the cell's output column as NaN).
pub(crate) fn correct_cell(
    reference: &[f64],
    historical: &[f64],
    future: &[f64],
    min_valid: usize,
) -> Option<Vec<f64>> {
    let ref_sorted = sorted_finite(reference);
    let hist_sorted = sorted_finite(historical);
    if ref_sorted.len() < min_valid || hist_sorted.len() < min_valid {
        return None;
    }

    // min_valid >= 1 is enforced by QmConfig::validate, so the map exists.
    let map = QuantileMap::from_samples(&ref_sorted)?;

    let corrected = future
        .iter()
        .map(|&fv| {
            if !fv.is_finite() {
                return f64::NAN;
            }
            let p = empirical_percentile(&hist_sorted, fv);
            map.value_at(p)
        })
        .collect();
    Some(corrected)
}

/// Bias-corrects a future series against a reference distribution,
/// conditioned on a historical-model series.
///
/// For each finite future value, its percentile within the historical
/// distribution (strict-less empirical CDF) is inverted through the
/// reference distribution's quantile map. Non-finite future values stay
/// NaN at their original index. If the reference or historical series has
/// fewer than `config.min_valid()` finite samples the whole output series
/// is NaN and the cell is left uncorrected.
pub fn correct_series(
    reference: &[f64],
    historical: &[f64],
    future: &[f64],
    config: &QmConfig,
) -> Vec<f64> {
    correct_cell(reference, historical, future, config.min_valid())
        .unwrap_or_else(|| vec![f64::NAN; future.len()])
}
