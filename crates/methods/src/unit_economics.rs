//! LTV:CAC based valuation.

use intrinsic_math::StepBands;
use intrinsic_primitives::{Assessment, CompanyType, DataQuality, MethodKind, MethodResult};
use intrinsic_traits::{
    DeclineReason, MethodContext, MethodDeclined, ValuationMethod, require_positive,
};
use serde::{Deserialize, Serialize};

/// Configuration for [`UnitEconomics`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitEconomicsConfig {
    /// Revenue multiple before efficiency adjustment.
    pub base_multiple: f64,
    /// Multiplier by LTV:CAC ratio.
    pub ltv_cac_bands: StepBands,
    /// Monthly churn assumed by revenue growth when none is reported.
    pub churn_by_growth: StepBands,
}

impl Default for UnitEconomicsConfig {
    fn default() -> Self {
        Self {
            base_multiple: 8.0,
            ltv_cac_bands: StepBands::strict(vec![(5.0, 1.3), (3.0, 1.1), (2.0, 1.0)], 0.8),
            churn_by_growth: StepBands::strict(vec![(0.50, 0.03), (0.30, 0.04)], 0.05),
        }
    }
}

/// Health tag from LTV:CAC and CAC payback in months.
fn health(ratio: f64, payback_months: f64) -> Assessment {
    if ratio > 5.0 && payback_months < 12.0 {
        Assessment::Excellent
    } else if ratio > 3.0 && payback_months < 18.0 {
        Assessment::Good
    } else if ratio > 2.0 {
        Assessment::Fair
    } else {
        Assessment::Poor
    }
}

/// Revenue multiple scaled by customer acquisition efficiency.
///
/// The health tag is informational; it does not change the fair value.
#[derive(Debug, Clone, Default)]
pub struct UnitEconomics {
    config: UnitEconomicsConfig,
}

impl UnitEconomics {
    /// Create with default bands.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(UnitEconomicsConfig::default())
    }

    /// Create with custom bands.
    #[must_use]
    pub const fn with_config(config: UnitEconomicsConfig) -> Self {
        Self { config }
    }
}

impl ValuationMethod for UnitEconomics {
    fn kind(&self) -> MethodKind {
        MethodKind::UnitEconomics
    }

    fn applies_to(&self, company: CompanyType) -> bool {
        matches!(company, CompanyType::Saas | CompanyType::Software | CompanyType::Ecommerce)
    }

    fn evaluate(&self, ctx: &MethodContext<'_>) -> Result<MethodResult, MethodDeclined> {
        let kind = self.kind();
        if !self.applies_to(ctx.company) {
            return Err(MethodDeclined::new(kind, DeclineReason::NotApplicable(ctx.company)));
        }

        let snapshot = ctx.snapshot;
        let ltv = require_positive(kind, "customer_lifetime_value", snapshot.customer_lifetime_value)?;
        let cac =
            require_positive(kind, "customer_acquisition_cost", snapshot.customer_acquisition_cost)?;
        let revenue = require_positive(kind, "revenue", snapshot.revenue)?;
        let mut estimated = 0;

        let churn = match snapshot.monthly_churn.filter(|&c| c > 0.0) {
            Some(c) => c,
            None => {
                estimated += 1;
                self.config.churn_by_growth.lookup(snapshot.revenue_growth.unwrap_or(0.0))
            }
        };

        let ratio = ltv / cac;
        let payback_months = cac / (ltv * churn);
        let adjustment = self.config.ltv_cac_bands.lookup(ratio);
        let multiple = self.config.base_multiple * adjustment;
        let enterprise_value = revenue * multiple;
        let fair_value = ctx.per_share(kind, enterprise_value)?;

        Ok(MethodResult::new(kind, fair_value, enterprise_value, DataQuality::from_estimated(estimated))
            .with_assessment(health(ratio, payback_months))
            .with_entry("ltv", ltv)
            .with_entry("cac", cac)
            .with_entry("ltv_cac_ratio", ratio)
            .with_entry("monthly_churn", churn)
            .with_entry("payback_months", payback_months)
            .with_entry("efficiency_adjustment", adjustment)
            .with_entry("revenue_multiple", multiple))
    }
}
