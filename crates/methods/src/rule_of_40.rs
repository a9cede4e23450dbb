//! Rule of 40 valuation for subscription software.

use intrinsic_math::StepBands;
use intrinsic_primitives::{Assessment, CompanyType, DataQuality, MethodKind, MethodResult};
use intrinsic_traits::{
    DeclineReason, MethodContext, MethodDeclined, ValuationMethod, require_positive,
};
use serde::{Deserialize, Serialize};

/// Configuration for [`RuleOf40`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOf40Config {
    /// Revenue multiple before score adjustment.
    pub base_multiple: f64,
    /// Multiplier by score (growth % + FCF margin %).
    pub bands: StepBands,
    /// Rating by score.
    pub ratings: StepBands<Assessment>,
}

impl Default for RuleOf40Config {
    fn default() -> Self {
        Self {
            base_multiple: 8.0,
            bands: StepBands::new(vec![(60.0, 1.5), (40.0, 1.2), (20.0, 1.0)], 0.7),
            ratings: StepBands::new(
                vec![(60.0, Assessment::Excellent), (40.0, Assessment::Good), (20.0, Assessment::Fair)],
                Assessment::Poor,
            ),
        }
    }
}

/// Revenue multiple scaled by the sum of growth and free-cash-flow margin.
#[derive(Debug, Clone, Default)]
pub struct RuleOf40 {
    config: RuleOf40Config,
}

impl RuleOf40 {
    /// Create with default bands.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RuleOf40Config::default())
    }

    /// Create with custom bands.
    #[must_use]
    pub const fn with_config(config: RuleOf40Config) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &RuleOf40Config {
        &self.config
    }
}

impl ValuationMethod for RuleOf40 {
    fn kind(&self) -> MethodKind {
        MethodKind::RuleOf40
    }

    fn applies_to(&self, company: CompanyType) -> bool {
        company.is_subscription_like()
    }

    fn evaluate(&self, ctx: &MethodContext<'_>) -> Result<MethodResult, MethodDeclined> {
        let kind = self.kind();
        if !self.applies_to(ctx.company) {
            return Err(MethodDeclined::new(kind, DeclineReason::NotApplicable(ctx.company)));
        }

        let snapshot = ctx.snapshot;
        let revenue = require_positive(kind, "revenue", snapshot.revenue)?;
        let growth = snapshot
            .revenue_growth
            .ok_or_else(|| MethodDeclined::new(kind, DeclineReason::MissingField("revenue_growth")))?;
        let mut estimated = 0;

        let fcf_margin = snapshot.free_cash_flow.map_or_else(
            || {
                estimated += 1;
                0.0
            },
            |fcf| fcf / revenue,
        );

        let score = (growth + fcf_margin) * 100.0;
        let adjustment = self.config.bands.lookup(score);
        let rating = self.config.ratings.lookup(score);
        let multiple = self.config.base_multiple * adjustment;
        let enterprise_value = revenue * multiple;
        let fair_value = ctx.per_share(kind, enterprise_value)?;

        Ok(MethodResult::new(kind, fair_value, enterprise_value, DataQuality::from_estimated(estimated))
            .with_assessment(rating)
            .with_entry("rule_of_40_score", score)
            .with_entry("revenue_growth_pct", growth * 100.0)
            .with_entry("fcf_margin_pct", fcf_margin * 100.0)
            .with_entry("score_adjustment", adjustment)
            .with_entry("revenue_multiple", multiple))
    }
}
