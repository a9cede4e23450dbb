//! Discounted free cash flow model.

use intrinsic_math::{discount_factor, present_value, terminal_value};
use intrinsic_primitives::{
    DataQuality, FinancialSnapshot, MethodKind, MethodResult, ValuationAssumptions,
};
use serde::{Deserialize, Serialize};

use crate::ValuationError;

/// Balance-sheet items that convert enterprise value to a per-share figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Cash and equivalents, added to enterprise value.
    pub cash: f64,
    /// Net debt, subtracted from enterprise value.
    pub net_debt: f64,
    /// Shares outstanding.
    pub shares_outstanding: f64,
}

impl BalanceSheet {
    /// Create a new balance sheet.
    #[must_use]
    pub const fn new(cash: f64, net_debt: f64, shares_outstanding: f64) -> Self {
        Self { cash, net_debt, shares_outstanding }
    }

    /// Extract from a snapshot; absent cash and net debt count as zero.
    ///
    /// # Errors
    /// `InsufficientData` when shares outstanding are absent, `InvalidInput`
    /// when they are zero or negative.
    pub fn from_snapshot(snapshot: &FinancialSnapshot) -> Result<Self, ValuationError> {
        let shares = snapshot.shares_outstanding.ok_or_else(|| ValuationError::InsufficientData {
            ticker: snapshot.ticker.clone(),
            reasons: vec!["missing shares_outstanding".to_string()],
        })?;
        if shares <= 0.0 {
            return Err(ValuationError::InvalidInput(format!(
                "shares_outstanding must be positive, got {shares}"
            )));
        }
        Ok(Self::new(snapshot.cash.unwrap_or(0.0), snapshot.net_debt.unwrap_or(0.0), shares))
    }
}

/// One explicitly projected year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedYear {
    /// Year index, starting at 1.
    pub year: u32,
    /// Projected cash flow.
    pub cash_flow: f64,
    /// `1 / (1 + discount_rate)^year`.
    pub discount_factor: f64,
    /// Discounted cash flow.
    pub present_value: f64,
}

/// Full output of a DCF run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfValuation {
    /// Starting cash flow.
    pub base_cash_flow: f64,
    /// Assumptions used.
    pub assumptions: ValuationAssumptions,
    /// Year-by-year breakdown.
    pub years: Vec<ProjectedYear>,
    /// Undiscounted terminal value at the end of the horizon.
    pub terminal_value: f64,
    /// Terminal value discounted to today.
    pub pv_terminal_value: f64,
    /// Explicit-period present value plus discounted terminal value.
    pub enterprise_value: f64,
    /// Enterprise value plus cash minus net debt.
    pub equity_value: f64,
    /// Equity value per share.
    pub fair_value: f64,
}

impl DcfValuation {
    /// Sum of discounted explicit-period cash flows.
    #[must_use]
    pub fn pv_explicit(&self) -> f64 {
        self.years.iter().map(|y| y.present_value).sum()
    }

    /// Share of enterprise value contributed by the terminal value.
    #[must_use]
    pub fn terminal_value_share(&self) -> f64 {
        if self.enterprise_value == 0.0 { 0.0 } else { self.pv_terminal_value / self.enterprise_value }
    }

    /// Convert to a method result with the given input quality.
    #[must_use]
    pub fn into_method_result(self, data_quality: DataQuality) -> MethodResult {
        let mut result =
            MethodResult::new(MethodKind::Dcf, self.fair_value, self.enterprise_value, data_quality)
                .with_entry("base_cash_flow", self.base_cash_flow)
                .with_entry("growth_rate", self.assumptions.growth_rate)
                .with_entry("discount_rate", self.assumptions.discount_rate)
                .with_entry("terminal_growth", self.assumptions.terminal_growth)
                .with_entry("terminal_value", self.terminal_value)
                .with_entry("pv_terminal_value", self.pv_terminal_value)
                .with_entry("pv_explicit", self.pv_explicit())
                .with_entry("terminal_value_share", self.terminal_value_share())
                .with_entry("equity_value", self.equity_value);
        for y in &self.years {
            result = result
                .with_entry(format!("year_{}_cash_flow", y.year), y.cash_flow)
                .with_entry(format!("year_{}_discount_factor", y.year), y.discount_factor)
                .with_entry(format!("year_{}_present_value", y.year), y.present_value);
        }
        result
    }
}

/// Discounted cash flow model.
///
/// Projects `base * (1 + g)^t` for `t` in `1..=N`, discounts each year, adds
/// the Gordon-growth terminal value discounted by the year-`N` factor, and
/// bridges to equity with cash and net debt.
#[derive(Debug, Clone, Copy, Default)]
pub struct DcfModel;

impl DcfModel {
    /// Create a new model.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Value a cash-flow stream.
    ///
    /// Only the terminal-growth invariant is checked on `assumptions`; range
    /// checks are the caller's responsibility.
    ///
    /// # Errors
    /// * `DcfNotApplicable` if `base_cash_flow` is not positive
    /// * `InvalidInput` if shares outstanding are not positive
    /// * `InvalidAssumption` if terminal growth is not below the discount rate,
    ///   or the discount rate is at or below -100%
    pub fn value(
        &self,
        base_cash_flow: f64,
        assumptions: &ValuationAssumptions,
        balance_sheet: &BalanceSheet,
    ) -> Result<DcfValuation, ValuationError> {
        if base_cash_flow.is_nan() || base_cash_flow <= 0.0 {
            return Err(ValuationError::DcfNotApplicable { free_cash_flow: Some(base_cash_flow) });
        }
        if balance_sheet.shares_outstanding.is_nan() || balance_sheet.shares_outstanding <= 0.0 {
            return Err(ValuationError::InvalidInput(format!(
                "shares_outstanding must be positive, got {}",
                balance_sheet.shares_outstanding
            )));
        }

        let ValuationAssumptions { growth_rate, discount_rate, terminal_growth, projection_years } =
            *assumptions;
        if !assumptions.has_valid_spread() || 1.0 + discount_rate <= 0.0 {
            return Err(ValuationError::InvalidAssumption { discount_rate, terminal_growth });
        }

        let years: Vec<ProjectedYear> = (1..=projection_years)
            .map(|year| {
                let cash_flow = base_cash_flow * (1.0 + growth_rate).powf(f64::from(year));
                ProjectedYear {
                    year,
                    cash_flow,
                    discount_factor: discount_factor(discount_rate, year),
                    present_value: present_value(cash_flow, discount_rate, year),
                }
            })
            .collect();

        let final_cash_flow = years.last().map_or(base_cash_flow, |y| y.cash_flow);
        let tv = terminal_value(final_cash_flow, terminal_growth, discount_rate)?;
        let pv_terminal_value = present_value(tv, discount_rate, projection_years);
        let enterprise_value = years.iter().map(|y| y.present_value).sum::<f64>() + pv_terminal_value;
        let equity_value = enterprise_value + balance_sheet.cash - balance_sheet.net_debt;

        Ok(DcfValuation {
            base_cash_flow,
            assumptions: *assumptions,
            years,
            terminal_value: tv,
            pv_terminal_value,
            enterprise_value,
            equity_value,
            fair_value: equity_value / balance_sheet.shares_outstanding,
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use intrinsic_primitives::SweepParameter;
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use rstest::rstest;

    use super::*;

    fn sheet() -> BalanceSheet {
        BalanceSheet::new(0.0, 0.0, 1_000_000.0)
    }

    #[test]
    fn equal_growth_and_discount_gives_flat_present_values() {
        let a = ValuationAssumptions::new(0.10, 0.10, 0.025, 5);
        let v = DcfModel::new().value(1_000_000.0, &a, &sheet()).unwrap();

        assert_eq!(v.years.len(), 5);
        for y in &v.years {
            assert_relative_eq!(y.present_value, 1_000_000.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn matches_hand_computation() {
        let a = ValuationAssumptions::new(0.05, 0.09, 0.02, 3);
        let bs = BalanceSheet::new(50.0, 20.0, 10.0);
        let v = DcfModel::new().value(100.0, &a, &bs).unwrap();

        let cfs = [105.0, 110.25, 115.7625];
        let pv: f64 = cfs.iter().zip(1..).map(|(cf, t)| cf / 1.09f64.powi(t)).sum();
        let tv = 115.7625 * 1.02 / 0.07;
        let ev = pv + tv / 1.09f64.powi(3);

        assert_relative_eq!(v.terminal_value, tv, epsilon = 1e-9);
        assert_relative_eq!(v.enterprise_value, ev, epsilon = 1e-9);
        assert_relative_eq!(v.fair_value, (ev + 30.0) / 10.0, epsilon = 1e-9);
        assert_relative_eq!(v.pv_explicit() + v.pv_terminal_value, v.enterprise_value, epsilon = 1e-9);
    }

    #[test]
    fn terminal_value_dominates_long_lived_firms() {
        let v = DcfModel::new().value(100.0, &ValuationAssumptions::default(), &sheet()).unwrap();
        let share = v.terminal_value_share();
        assert!(share > 0.5 && share < 1.0);
    }

    #[test]
    fn fair_value_is_monotone_in_growth() {
        let mut rng = StdRng::seed_from_u64(23);
        let (g_lo, g_hi) = ValuationAssumptions::GROWTH_RANGE;
        let model = DcfModel::new();

        for _ in 0..500 {
            let base = ValuationAssumptions::new(
                0.0,
                rng.gen_range(0.03..0.5),
                rng.gen_range(0.0..0.025),
                rng.gen_range(1..=20),
            );
            let cash_flow = rng.gen_range(1.0..1e7);
            let bs = BalanceSheet::new(rng.gen_range(0.0..1e6), rng.gen_range(0.0..1e6), 1_000.0);

            let mut growths: Vec<f64> = (0..8).map(|_| rng.gen_range(g_lo..g_hi)).collect();
            growths.sort_by(f64::total_cmp);
            let values: Vec<f64> = growths
                .iter()
                .map(|&g| model.value(cash_flow, &base.with_parameter(SweepParameter::GrowthRate, g), &bs))
                .map(|v| v.unwrap().fair_value)
                .collect();
            assert!(values.windows(2).all(|w| w[0] <= w[1]), "{growths:?} -> {values:?}");
        }
    }

    #[rstest]
    #[case(0.0)]
    #[case(-5.0)]
    fn non_positive_cash_flow_is_not_applicable(#[case] fcf: f64) {
        let err = DcfModel::new().value(fcf, &ValuationAssumptions::default(), &sheet()).unwrap_err();
        assert!(matches!(err, ValuationError::DcfNotApplicable { .. }));
    }

    #[rstest]
    #[case(0.05, 0.05)]
    #[case(0.04, 0.05)]
    fn inverted_spread_is_invalid_assumption(#[case] discount: f64, #[case] terminal: f64) {
        let a = ValuationAssumptions::new(0.1, discount, terminal, 5);
        let err = DcfModel::new().value(100.0, &a, &sheet()).unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn zero_shares_is_invalid_input() {
        let bs = BalanceSheet::new(0.0, 0.0, 0.0);
        let err = DcfModel::new().value(100.0, &ValuationAssumptions::default(), &bs).unwrap_err();
        assert!(matches!(err, ValuationError::InvalidInput(_)));
    }

    #[test]
    fn balance_sheet_from_snapshot() {
        let s = FinancialSnapshot::new("X").with_shares_outstanding(5.0).with_balance_sheet(3.0, 1.0);
        assert_eq!(BalanceSheet::from_snapshot(&s).unwrap(), BalanceSheet::new(3.0, 1.0, 5.0));

        let err = BalanceSheet::from_snapshot(&FinancialSnapshot::new("X")).unwrap_err();
        assert!(matches!(err, ValuationError::InsufficientData { .. }));

        let s = FinancialSnapshot::new("X").with_shares_outstanding(-1.0);
        assert!(matches!(BalanceSheet::from_snapshot(&s), Err(ValuationError::InvalidInput(_))));
    }

    #[test]
    fn method_result_carries_breakdown() {
        let v = DcfModel::new().value(100.0, &ValuationAssumptions::default(), &sheet()).unwrap();
        let r = v.into_method_result(DataQuality::Low);
        assert_eq!(r.method, MethodKind::Dcf);
        assert!(r.entry("year_5_present_value").is_some());
        assert!(r.entry("terminal_value_share").is_some());
    }
}
