//! Valuation assumptions and their documented ranges.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Caller-controlled DCF assumptions.
///
/// Documented ranges:
/// * `growth_rate` in [-0.5, 1.0]
/// * `discount_rate` in (0, 0.5]
/// * `terminal_growth` in [0, 0.1]
/// * `projection_years` in [1, 20]
///
/// Independently of the ranges, `terminal_growth` must be strictly less than
/// `discount_rate`; the terminal value formula is undefined otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationAssumptions {
    /// Annual cash-flow growth over the explicit projection period.
    pub growth_rate: f64,
    /// Discount rate (WACC).
    pub discount_rate: f64,
    /// Perpetual growth after the projection period.
    pub terminal_growth: f64,
    /// Number of explicitly projected years.
    pub projection_years: u32,
}

impl ValuationAssumptions {
    /// Allowed growth rate range.
    pub const GROWTH_RANGE: (f64, f64) = (-0.5, 1.0);
    /// Allowed discount rate range (lower bound exclusive).
    pub const DISCOUNT_RANGE: (f64, f64) = (0.0, 0.5);
    /// Allowed terminal growth range.
    pub const TERMINAL_GROWTH_RANGE: (f64, f64) = (0.0, 0.1);
    /// Allowed projection horizon.
    pub const YEARS_RANGE: (u32, u32) = (1, 20);

    /// Create a new set of assumptions.
    #[must_use]
    pub const fn new(
        growth_rate: f64,
        discount_rate: f64,
        terminal_growth: f64,
        projection_years: u32,
    ) -> Self {
        Self { growth_rate, discount_rate, terminal_growth, projection_years }
    }

    /// Whether the terminal growth / discount rate invariant holds.
    #[must_use]
    pub fn has_valid_spread(&self) -> bool {
        self.terminal_growth < self.discount_rate
    }

    /// First documented range this set of assumptions violates, if any.
    #[must_use]
    pub fn out_of_range(&self) -> Option<RangeViolation> {
        let (g_lo, g_hi) = Self::GROWTH_RANGE;
        let (d_lo, d_hi) = Self::DISCOUNT_RANGE;
        let (t_lo, t_hi) = Self::TERMINAL_GROWTH_RANGE;
        let (y_lo, y_hi) = Self::YEARS_RANGE;

        if !(g_lo..=g_hi).contains(&self.growth_rate) {
            return Some(RangeViolation::new("growth_rate", self.growth_rate, g_lo, g_hi));
        }
        if !(self.discount_rate > d_lo && self.discount_rate <= d_hi) {
            return Some(RangeViolation::new("discount_rate", self.discount_rate, d_lo, d_hi));
        }
        if !(t_lo..=t_hi).contains(&self.terminal_growth) {
            return Some(RangeViolation::new("terminal_growth", self.terminal_growth, t_lo, t_hi));
        }
        if !(y_lo..=y_hi).contains(&self.projection_years) {
            return Some(RangeViolation::new(
                "projection_years",
                f64::from(self.projection_years),
                f64::from(y_lo),
                f64::from(y_hi),
            ));
        }
        None
    }

    /// Value of one sweepable parameter.
    #[must_use]
    pub const fn parameter(&self, parameter: SweepParameter) -> f64 {
        match parameter {
            SweepParameter::GrowthRate => self.growth_rate,
            SweepParameter::DiscountRate => self.discount_rate,
            SweepParameter::TerminalGrowth => self.terminal_growth,
        }
    }

    /// Copy with one parameter replaced.
    #[must_use]
    pub const fn with_parameter(mut self, parameter: SweepParameter, value: f64) -> Self {
        match parameter {
            SweepParameter::GrowthRate => self.growth_rate = value,
            SweepParameter::DiscountRate => self.discount_rate = value,
            SweepParameter::TerminalGrowth => self.terminal_growth = value,
        }
        self
    }
}

impl Default for ValuationAssumptions {
    fn default() -> Self {
        Self { growth_rate: 0.10, discount_rate: 0.10, terminal_growth: 0.025, projection_years: 5 }
    }
}

/// A documented range that an assumption falls outside of.
#[derive(Debug, Clone, Copy, PartialEq, Display)]
#[display("{field} = {value} is outside [{min}, {max}]")]
pub struct RangeViolation {
    /// Offending field.
    pub field: &'static str,
    /// Supplied value.
    pub value: f64,
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl RangeViolation {
    const fn new(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self { field, value, min, max }
    }
}

/// Standard deviations for Monte Carlo parameter sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssumptionStdDevs {
    /// Standard deviation of the growth rate.
    pub growth_rate: f64,
    /// Standard deviation of the discount rate.
    pub discount_rate: f64,
    /// Standard deviation of the terminal growth rate.
    pub terminal_growth: f64,
}

impl AssumptionStdDevs {
    /// Create a new set of standard deviations.
    #[must_use]
    pub const fn new(growth_rate: f64, discount_rate: f64, terminal_growth: f64) -> Self {
        Self { growth_rate, discount_rate, terminal_growth }
    }

    /// First field that is negative or non-finite, if any.
    #[must_use]
    pub fn first_invalid(&self) -> Option<&'static str> {
        [
            ("growth_rate", self.growth_rate),
            ("discount_rate", self.discount_rate),
            ("terminal_growth", self.terminal_growth),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite() || *v < 0.0)
        .map(|(name, _)| name)
    }
}

impl Default for AssumptionStdDevs {
    fn default() -> Self {
        Self { growth_rate: 0.03, discount_rate: 0.01, terminal_growth: 0.005 }
    }
}

/// An assumption that can be swept in sensitivity analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum SweepParameter {
    /// Projection-period growth rate.
    #[display("growth_rate")]
    GrowthRate,
    /// Discount rate (WACC).
    #[display("discount_rate")]
    DiscountRate,
    /// Terminal growth rate.
    #[display("terminal_growth")]
    TerminalGrowth,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn defaults_are_in_range() {
        let a = ValuationAssumptions::default();
        assert!(a.out_of_range().is_none());
        assert!(a.has_valid_spread());
        assert_eq!(a.projection_years, 5);
    }

    #[rstest]
    #[case(ValuationAssumptions::new(1.5, 0.1, 0.02, 5), "growth_rate")]
    #[case(ValuationAssumptions::new(0.1, 0.0, 0.02, 5), "discount_rate")]
    #[case(ValuationAssumptions::new(0.1, 0.6, 0.02, 5), "discount_rate")]
    #[case(ValuationAssumptions::new(0.1, 0.1, -0.01, 5), "terminal_growth")]
    #[case(ValuationAssumptions::new(0.1, 0.1, 0.02, 0), "projection_years")]
    #[case(ValuationAssumptions::new(0.1, 0.1, 0.02, 21), "projection_years")]
    fn out_of_range_names_field(#[case] a: ValuationAssumptions, #[case] field: &str) {
        let violation = a.out_of_range().unwrap();
        assert_eq!(violation.field, field);
        assert!(violation.to_string().contains(field));
    }

    #[test]
    fn spread_boundary_is_invalid() {
        let a = ValuationAssumptions::new(0.1, 0.05, 0.05, 5);
        assert!(!a.has_valid_spread());
    }

    #[rstest]
    #[case(SweepParameter::GrowthRate)]
    #[case(SweepParameter::DiscountRate)]
    #[case(SweepParameter::TerminalGrowth)]
    fn with_parameter_replaces_only_target(#[case] p: SweepParameter) {
        let base = ValuationAssumptions::default();
        let swept = base.with_parameter(p, 0.042);
        assert_eq!(swept.parameter(p), 0.042);
        assert_eq!(swept.projection_years, base.projection_years);
        for other in
            [SweepParameter::GrowthRate, SweepParameter::DiscountRate, SweepParameter::TerminalGrowth]
        {
            if other != p {
                assert_eq!(swept.parameter(other), base.parameter(other));
            }
        }
    }

    #[test]
    fn std_devs_reject_negative() {
        assert!(AssumptionStdDevs::default().first_invalid().is_none());
        let s = AssumptionStdDevs::new(0.01, -0.01, 0.0);
        assert_eq!(s.first_invalid(), Some("discount_rate"));
    }

    #[test]
    fn sweep_parameter_display() {
        assert_eq!(SweepParameter::DiscountRate.to_string(), "discount_rate");
    }
}
