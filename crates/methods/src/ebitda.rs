//! EBITDA multiple valuation.

use intrinsic_math::StepBands;
use intrinsic_primitives::{DataQuality, MethodKind, MethodResult};
use intrinsic_traits::{MethodContext, MethodDeclined, ValuationMethod, require_positive};
use serde::{Deserialize, Serialize};

use crate::IndustryTable;

/// Configuration for [`EbitdaMultiple`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EbitdaConfig {
    /// Multiplier by EBITDA margin.
    pub margin_bands: StepBands,
}

impl Default for EbitdaConfig {
    fn default() -> Self {
        Self { margin_bands: StepBands::new(vec![(0.30, 1.2), (0.20, 1.1), (0.10, 1.0)], 0.9) }
    }
}

/// Enterprise value as EBITDA times a growth- and margin-adjusted industry multiple.
#[derive(Debug, Clone, Default)]
pub struct EbitdaMultiple {
    industries: IndustryTable,
    config: EbitdaConfig,
}

impl EbitdaMultiple {
    /// Create with default multiples and margin bands.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(IndustryTable::default(), EbitdaConfig::default())
    }

    /// Create with custom multiples and margin bands.
    #[must_use]
    pub const fn with_config(industries: IndustryTable, config: EbitdaConfig) -> Self {
        Self { industries, config }
    }
}

impl ValuationMethod for EbitdaMultiple {
    fn kind(&self) -> MethodKind {
        MethodKind::EbitdaMultiple
    }

    fn evaluate(&self, ctx: &MethodContext<'_>) -> Result<MethodResult, MethodDeclined> {
        let kind = self.kind();
        let snapshot = ctx.snapshot;
        let ebitda = require_positive(kind, "ebitda", snapshot.ebitda)?;
        let mut estimated = 0;

        let growth = snapshot.revenue_growth.unwrap_or_else(|| {
            estimated += 1;
            0.0
        });

        let margin = snapshot
            .ebitda_margin
            .or_else(|| snapshot.positive_revenue().map(|revenue| ebitda / revenue));
        let margin_adjustment = match margin {
            Some(m) => self.config.margin_bands.lookup(m),
            None => {
                estimated += 1;
                1.0
            }
        };

        let profile = self.industries.get(ctx.company);
        let growth_adjustment = profile.growth_adjustment(growth);
        let multiple = profile.ebitda_multiple * growth_adjustment * margin_adjustment;
        let enterprise_value = ebitda * multiple;
        let fair_value = ctx.per_share(kind, enterprise_value)?;

        let mut result =
            MethodResult::new(kind, fair_value, enterprise_value, DataQuality::from_estimated(estimated))
                .with_entry("ebitda", ebitda)
                .with_entry("base_multiple", profile.ebitda_multiple)
                .with_entry("growth_adjustment", growth_adjustment)
                .with_entry("margin_adjustment", margin_adjustment)
                .with_entry("ebitda_multiple", multiple);
        if let Some(m) = margin {
            result = result.with_entry("ebitda_margin", m);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use intrinsic_primitives::{CapitalMarket, CompanyType, FinancialSnapshot};
    use intrinsic_traits::DeclineReason;
    use rstest::rstest;

    use super::*;

    fn run(snapshot: &FinancialSnapshot) -> Result<MethodResult, MethodDeclined> {
        let market = CapitalMarket::default();
        EbitdaMultiple::new().evaluate(&MethodContext::new(snapshot, CompanyType::Default, &market))
    }

    fn base() -> FinancialSnapshot {
        FinancialSnapshot::new("X").with_ebitda(50.0).with_revenue_growth(0.05).with_shares_outstanding(5.0)
    }

    #[rstest]
    #[case(0.35, 1.2)]
    #[case(0.30, 1.2)]
    #[case(0.25, 1.1)]
    #[case(0.15, 1.0)]
    #[case(0.05, 0.9)]
    fn margin_bands(#[case] margin: f64, #[case] adjustment: f64) {
        let r = run(&base().with_ebitda_margin(margin)).unwrap();
        assert_relative_eq!(r.enterprise_value, 50.0 * 12.0 * adjustment, epsilon = 1e-9);
        assert_eq!(r.data_quality, DataQuality::High);
    }

    #[test]
    fn margin_derived_from_revenue() {
        let r = run(&base().with_revenue(200.0)).unwrap();
        assert_eq!(r.entry("ebitda_margin"), Some(0.25));
        assert_eq!(r.entry("margin_adjustment"), Some(1.1));
        assert_eq!(r.data_quality, DataQuality::High);
    }

    #[test]
    fn unknown_margin_is_estimated() {
        let r = run(&base()).unwrap();
        assert_eq!(r.entry("margin_adjustment"), Some(1.0));
        assert_eq!(r.data_quality, DataQuality::Medium);

        let s = FinancialSnapshot::new("X").with_ebitda(50.0).with_shares_outstanding(5.0);
        assert_eq!(run(&s).unwrap().data_quality, DataQuality::Low);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-10.0)]
    fn declines_non_positive_ebitda(#[case] ebitda: f64) {
        let s = FinancialSnapshot::new("X").with_ebitda(ebitda).with_shares_outstanding(5.0);
        assert_eq!(run(&s).unwrap_err().reason, DeclineReason::NonPositive("ebitda"));
    }
}
