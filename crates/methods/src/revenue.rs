//! Revenue multiple valuation.

use intrinsic_primitives::{DataQuality, MethodKind, MethodResult};
use intrinsic_traits::{MethodContext, MethodDeclined, ValuationMethod, require_positive};

use crate::IndustryTable;

/// Enterprise value as revenue times a growth-adjusted industry multiple.
#[derive(Debug, Clone, Default)]
pub struct RevenueMultiple {
    industries: IndustryTable,
}

impl RevenueMultiple {
    /// Create with default industry multiples.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(IndustryTable::default())
    }

    /// Create with custom industry multiples.
    #[must_use]
    pub const fn with_config(industries: IndustryTable) -> Self {
        Self { industries }
    }
}

impl ValuationMethod for RevenueMultiple {
    fn kind(&self) -> MethodKind {
        MethodKind::RevenueMultiple
    }

    fn evaluate(&self, ctx: &MethodContext<'_>) -> Result<MethodResult, MethodDeclined> {
        let kind = self.kind();
        let revenue = require_positive(kind, "revenue", ctx.snapshot.revenue)?;
        let mut estimated = 0;

        let growth = ctx.snapshot.revenue_growth.unwrap_or_else(|| {
            estimated += 1;
            0.0
        });

        let profile = self.industries.get(ctx.company);
        let growth_adjustment = profile.growth_adjustment(growth);
        let multiple = profile.revenue_multiple * growth_adjustment;
        let enterprise_value = revenue * multiple;
        let fair_value = ctx.per_share(kind, enterprise_value)?;

        Ok(MethodResult::new(kind, fair_value, enterprise_value, DataQuality::from_estimated(estimated))
            .with_entry("revenue", revenue)
            .with_entry("revenue_growth", growth)
            .with_entry("base_multiple", profile.revenue_multiple)
            .with_entry("growth_adjustment", growth_adjustment)
            .with_entry("revenue_multiple", multiple))
    }
}
