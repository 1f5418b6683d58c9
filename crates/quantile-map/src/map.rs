//! The empirical quantile map: rank positions paired with sorted values.

use boreas_stats::{plotting_positions, sorted_finite};

/// A monotone rank-to-value lookup built from an empirical distribution.
///
/// Positions are the open-interval plotting positions `i / (n + 1)`, so the
/// map never claims the exact 0th or 100th percentile; lookups beyond the
/// covered rank range clamp to the smallest/largest sample value.
#[derive(Debug, Clone)]
pub struct QuantileMap {
    positions: Vec<f64>,
    values: Vec<f64>,
}

impl QuantileMap {
    /// Builds the map from raw samples, dropping non-finite values.
    ///
    /// Returns `None` if no finite samples remain.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        let values = sorted_finite(samples);
        if values.is_empty() {
            return None;
        }
        let positions = plotting_positions(values.len());
        Some(Self { positions, values })
    }

    /// Number of samples backing the map.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the map holds no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value at fractional rank `p`, by monotone linear interpolation.
    ///
    /// Ranks below the first plotting position return the smallest sample;
    /// ranks above the last return the largest.
    pub fn value_at(&self, p: f64) -> f64 {
        boreas_stats::interp(p, &self.positions, &self.values)
    }
}
