//! Monte Carlo output.

use serde::{Deserialize, Serialize};

/// Named confidence intervals as `(low, high)` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceIntervals {
    /// 25th to 75th percentile.
    pub ci50: (f64, f64),
    /// 10th to 90th percentile.
    pub ci80: (f64, f64),
    /// 5th to 95th percentile.
    pub ci90: (f64, f64),
}

impl ConfidenceIntervals {
    /// Whether ci50 ⊆ ci80 ⊆ ci90.
    #[must_use]
    pub fn is_nested(&self) -> bool {
        let within = |inner: (f64, f64), outer: (f64, f64)| outer.0 <= inner.0 && inner.1 <= outer.1;
        within(self.ci50, self.ci80) && within(self.ci80, self.ci90)
    }
}

/// Selected percentiles of the simulated fair values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percentiles {
    /// 5th percentile.
    pub p5: f64,
    /// 10th percentile.
    pub p10: f64,
    /// 25th percentile.
    pub p25: f64,
    /// Median.
    pub p50: f64,
    /// 75th percentile.
    pub p75: f64,
    /// 90th percentile.
    pub p90: f64,
    /// 95th percentile.
    pub p95: f64,
}

impl Percentiles {
    /// Levels reported, in percent, matching field order.
    pub const LEVELS: [f64; 7] = [5.0, 10.0, 25.0, 50.0, 75.0, 90.0, 95.0];

    /// Build from values computed at [`Self::LEVELS`].
    #[must_use]
    pub const fn from_levels(values: [f64; 7]) -> Self {
        let [p5, p10, p25, p50, p75, p90, p95] = values;
        Self { p5, p10, p25, p50, p75, p90, p95 }
    }

    /// Confidence intervals implied by these percentiles.
    #[must_use]
    pub const fn intervals(&self) -> ConfidenceIntervals {
        ConfidenceIntervals {
            ci50: (self.p25, self.p75),
            ci80: (self.p10, self.p90),
            ci90: (self.p5, self.p95),
        }
    }
}

/// Summary of a Monte Carlo fair-value distribution.
///
/// Statistics are per-share fair values unless prefixed `enterprise_value`.
/// The raw samples are not retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloResult {
    /// Valid trials the caller asked for.
    pub requested_trials: usize,
    /// Valid trials actually obtained.
    pub valid_trials: usize,
    /// Draws discarded because sampled terminal growth met or exceeded the discount rate.
    pub discarded_trials: usize,
    /// Seed used for sampling.
    pub seed: u64,
    /// Sample mean.
    pub mean: f64,
    /// Sample median.
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Smallest simulated fair value.
    pub min: f64,
    /// Largest simulated fair value.
    pub max: f64,
    /// Mean of the simulated enterprise values.
    pub enterprise_value_mean: f64,
    /// Median of the simulated enterprise values.
    pub enterprise_value_median: f64,
    /// Confidence intervals.
    pub intervals: ConfidenceIntervals,
    /// Selected percentiles.
    pub percentiles: Percentiles,
}

impl MonteCarloResult {
    /// Share of all draws that were discarded.
    #[must_use]
    pub fn discard_rate(&self) -> f64 {
        let attempts = self.valid_trials + self.discarded_trials;
        if attempts == 0 { 0.0 } else { self.discarded_trials as f64 / attempts as f64 }
    }

    /// Whether fewer valid trials than requested were obtained.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        self.valid_trials < self.requested_trials
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn sample_percentiles() -> Percentiles {
        Percentiles::from_levels([1.0, 2.0, 4.0, 5.0, 6.0, 8.0, 9.0])
    }

    #[test]
    fn intervals_from_percentiles() {
        let ci = sample_percentiles().intervals();
        assert_eq!(ci.ci50, (4.0, 6.0));
        assert_eq!(ci.ci80, (2.0, 8.0));
        assert_eq!(ci.ci90, (1.0, 9.0));
        assert!(ci.is_nested());
    }

    #[test]
    fn non_nested_detected() {
        let ci = ConfidenceIntervals { ci50: (1.0, 6.0), ci80: (2.0, 8.0), ci90: (1.0, 9.0) };
        assert!(!ci.is_nested());
    }

    #[test]
    fn discard_rate() {
        let p = sample_percentiles();
        let r = MonteCarloResult {
            requested_trials: 100,
            valid_trials: 90,
            discarded_trials: 10,
            seed: 7,
            mean: 5.0,
            median: 5.0,
            std_dev: 1.0,
            min: 0.5,
            max: 9.5,
            enterprise_value_mean: 500.0,
            enterprise_value_median: 480.0,
            intervals: p.intervals(),
            percentiles: p,
        };
        assert_relative_eq!(r.discard_rate(), 0.1);
        assert!(r.is_partial());
    }
}
