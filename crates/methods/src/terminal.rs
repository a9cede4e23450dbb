//! Revenue-driven discounted cash flow with a perpetual terminal value.

use intrinsic_math::{cagr, present_value, terminal_value, wacc};
use intrinsic_primitives::{CapitalMarket, DataQuality, MethodKind, MethodResult};
use intrinsic_traits::{
    DeclineReason, MethodContext, MethodDeclined, ValuationMethod, require_positive,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Configuration for [`RevenueTerminalValue`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevenueTerminalConfig {
    /// Years of explicit revenue projection.
    pub projection_years: u32,
    /// Cash-flow margin on revenue when no EBITDA margin is reported.
    pub cash_flow_margin: f64,
    /// Starting growth when neither history nor a growth rate is reported.
    pub default_growth: f64,
}

impl Default for RevenueTerminalConfig {
    fn default() -> Self {
        Self { projection_years: 5, cash_flow_margin: 0.20, default_growth: 0.15 }
    }
}

impl RevenueTerminalConfig {
    /// Whether the horizon is positive and rates are finite with a usable margin.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.projection_years > 0
            && self.default_growth.is_finite()
            && self.cash_flow_margin.is_finite()
            && self.cash_flow_margin > 0.0
    }
}

/// Projects revenue at a CAGR that decelerates linearly to terminal growth,
/// converts it to cash flow with a margin, and discounts at the CAPM rate.
///
/// The terminal growth rate is the market's, taken from the method context.
#[derive(Debug, Clone, Default)]
pub struct RevenueTerminalValue {
    config: RevenueTerminalConfig,
}

impl RevenueTerminalValue {
    /// Create with the default horizon and margins.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RevenueTerminalConfig::default())
    }

    /// Create with a custom configuration.
    #[must_use]
    pub const fn with_config(config: RevenueTerminalConfig) -> Self {
        Self { config }
    }

    /// Growth applied in year `year` of the projection.
    fn growth_in_year(&self, starting: f64, terminal: f64, year: u32) -> f64 {
        let n = f64::from(self.config.projection_years);
        starting + (terminal - starting) * f64::from(year) / n
    }
}

/// Trailing CAGR from a most-recent-first revenue history.
fn trailing_cagr(history: &[f64]) -> Option<f64> {
    let (&latest, &oldest) = (history.first()?, history.last()?);
    let periods = u32::try_from(history.len().checked_sub(1)?).ok()?;
    cagr(oldest, latest, periods)
}

impl ValuationMethod for RevenueTerminalValue {
    fn kind(&self) -> MethodKind {
        MethodKind::TerminalValue
    }

    fn evaluate(&self, ctx: &MethodContext<'_>) -> Result<MethodResult, MethodDeclined> {
        let kind = self.kind();
        let snapshot = ctx.snapshot;
        let revenue = require_positive(kind, "revenue", snapshot.revenue)?;
        let mut estimated = 0;

        let starting_growth = match trailing_cagr(&snapshot.revenue_history) {
            Some(g) => g,
            None => {
                estimated += 1;
                snapshot.revenue_growth.unwrap_or(self.config.default_growth)
            }
        };

        let margin = match snapshot.ebitda_margin.filter(|&m| m > 0.0) {
            Some(m) => m,
            None => {
                estimated += 1;
                self.config.cash_flow_margin
            }
        };

        let beta = snapshot.beta.unwrap_or_else(|| {
            estimated += 1;
            CapitalMarket::DEFAULT_BETA
        });
        let rate = wacc(ctx.market.risk_free_rate, beta, ctx.market.market_risk_premium);
        let terminal_growth = ctx.market.terminal_growth;

        let years = self.config.projection_years;
        let mut projected = revenue;
        let mut pv_explicit = 0.0;
        let mut final_cash_flow = 0.0;
        for year in 1..=years {
            projected *= 1.0 + self.growth_in_year(starting_growth, terminal_growth, year);
            final_cash_flow = projected * margin;
            pv_explicit += present_value(final_cash_flow, rate, year);
            trace!(year, revenue = projected, cash_flow = final_cash_flow, "projected revenue");
        }

        let tv = terminal_value(final_cash_flow, terminal_growth, rate)
            .map_err(|e| MethodDeclined::new(kind, DeclineReason::Formula(e.to_string())))?;
        let pv_terminal = present_value(tv, rate, years);
        let enterprise_value = pv_explicit + pv_terminal;
        let fair_value = ctx.per_share(kind, enterprise_value)?;

        Ok(MethodResult::new(kind, fair_value, enterprise_value, DataQuality::from_estimated(estimated))
            .with_entry("starting_growth", starting_growth)
            .with_entry("terminal_growth", terminal_growth)
            .with_entry("cash_flow_margin", margin)
            .with_entry("discount_rate", rate)
            .with_entry("terminal_revenue", projected)
            .with_entry("terminal_value", tv)
            .with_entry("pv_explicit", pv_explicit)
            .with_entry("pv_terminal_value", pv_terminal))
    }
}
