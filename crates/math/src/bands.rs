//! Threshold tables.

use serde::{Deserialize, Serialize};

/// A descending list of `(threshold, output)` steps with a fallback.
///
/// Lookup returns the output of the first step whose threshold the value
/// meets: `value >= threshold`, or `value > threshold` when `strict` is set.
/// Values below every threshold, and NaN, map to `below`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepBands<T = f64> {
    /// Steps ordered by descending threshold.
    pub steps: Vec<(f64, T)>,
    /// Output for values that meet no threshold.
    pub below: T,
    /// Use strict comparison.
    #[serde(default)]
    pub strict: bool,
}

impl<T: Copy> StepBands<T> {
    /// Bands using inclusive (`>=`) thresholds.
    #[must_use]
    pub const fn new(steps: Vec<(f64, T)>, below: T) -> Self {
        Self { steps, below, strict: false }
    }

    /// Bands using strict (`>`) thresholds.
    #[must_use]
    pub const fn strict(steps: Vec<(f64, T)>, below: T) -> Self {
        Self { steps, below, strict: true }
    }

    /// Output for `value`.
    #[must_use]
    pub fn lookup(&self, value: f64) -> T {
        self.steps
            .iter()
            .find(|(threshold, _)| {
                if self.strict { value > *threshold } else { value >= *threshold }
            })
            .map_or(self.below, |(_, out)| *out)
    }

    /// Whether thresholds are finite and strictly descending.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.steps.iter().all(|(t, _)| t.is_finite())
            && self.steps.windows(2).all(|w| w[0].0 > w[1].0)
    }
}

impl StepBands<f64> {
    /// Whether every output, including the fallback, is finite and positive.
    #[must_use]
    pub fn has_positive_factors(&self) -> bool {
        std::iter::once(self.below)
            .chain(self.steps.iter().map(|(_, f)| *f))
            .all(|f| f.is_finite() && f > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn growth_bands() -> StepBands {
        StepBands::new(vec![(0.50, 1.5), (0.30, 1.3), (0.15, 1.1), (0.0, 1.0)], 0.7)
    }

    #[rstest]
    #[case(0.80, 1.5)]
    #[case(0.50, 1.5)]
    #[case(0.45, 1.3)]
    #[case(0.30, 1.3)]
    #[case(0.20, 1.1)]
    #[case(0.10, 1.0)]
    #[case(0.0, 1.0)]
    #[case(-0.05, 0.7)]
    fn inclusive_lookup(#[case] value: f64, #[case] expected: f64) {
        assert_eq!(growth_bands().lookup(value), expected);
    }

    #[rstest]
    #[case(5.0, 1.1)]
    #[case(5.01, 1.3)]
    #[case(3.0, 1.0)]
    #[case(2.0, 0.8)]
    fn strict_lookup(#[case] value: f64, #[case] expected: f64) {
        let bands = StepBands::strict(vec![(5.0, 1.3), (3.0, 1.1), (2.0, 1.0)], 0.8);
        assert_eq!(bands.lookup(value), expected);
    }

    #[test]
    fn nan_falls_through() {
        assert_eq!(growth_bands().lookup(f64::NAN), 0.7);
    }

    #[test]
    fn well_formed() {
        assert!(growth_bands().is_well_formed());
        assert!(growth_bands().has_positive_factors());

        let unordered = StepBands::new(vec![(0.1, 1.0), (0.5, 1.5)], 0.7);
        assert!(!unordered.is_well_formed());

        let zero = StepBands::new(vec![(0.1, 0.0)], 0.7);
        assert!(!zero.has_positive_factors());
    }

    #[test]
    fn generic_outputs() {
        let bands = StepBands::new(vec![(60.0, 'A'), (40.0, 'B')], 'C');
        assert_eq!(bands.lookup(45.0), 'B');
        assert_eq!(bands.lookup(10.0), 'C');
    }

    #[test]
    fn deserializes_without_strict_flag() {
        let json = r#"{"steps": [[0.5, 1.5]], "below": 1.0}"#;
        let bands: StepBands = serde_json::from_str(json).unwrap();
        assert!(!bands.strict);
        assert_eq!(bands.lookup(0.6), 1.5);
    }
}
