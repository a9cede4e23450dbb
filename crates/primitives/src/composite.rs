//! The orchestrator's combined valuation.

use std::collections::BTreeMap;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{CompanyType, MethodKind, MethodResult, Ticker};

/// Overall confidence in a composite valuation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
pub enum Confidence {
    /// Few methods, or mostly estimated inputs.
    #[display("low")]
    Low,
    /// At least two methods with one high-quality result.
    #[display("medium")]
    Medium,
    /// At least three methods with two high-quality results.
    #[display("high")]
    High,
}

/// Which valuation path produced a composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Methodology {
    /// Positive free cash flow; discounted cash flow only.
    #[display("dcf")]
    Dcf,
    /// No usable free cash flow; weighted alternative methods.
    #[display("zero_fcf_multi_method")]
    ZeroFcfMultiMethod,
}

/// Bear/base/bull/optimistic fair values.
///
/// These are the composite fair value scaled by fixed multipliers. They are
/// not re-runs of each method under different assumptions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenarios {
    /// Pessimistic case.
    pub bear: f64,
    /// Central case; equal to the composite fair value at the default multiplier.
    pub base: f64,
    /// Optimistic case.
    pub bull: f64,
    /// Most optimistic case.
    pub optimistic: f64,
}

impl Scenarios {
    /// Scale a fair value by `[bear, base, bull, optimistic]` multipliers.
    #[must_use]
    pub fn scaled(fair_value: f64, multipliers: [f64; 4]) -> Self {
        let [bear, base, bull, optimistic] = multipliers.map(|m| fair_value * m);
        Self { bear, base, bull, optimistic }
    }

    /// Whether `bear <= base <= bull <= optimistic`.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.bear <= self.base && self.base <= self.bull && self.bull <= self.optimistic
    }
}

/// A single weighted fair value with its per-method breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeValuation {
    /// Company being valued.
    pub ticker: Ticker,
    /// Classification used for weights and multiples.
    pub company_type: CompanyType,
    /// Which path produced this valuation.
    pub methodology: Methodology,
    /// Weighted fair value per share.
    pub fair_value: f64,
    /// Market price at valuation time, if known.
    pub current_price: Option<f64>,
    /// Percentage gap between fair value and current price.
    pub upside_pct: Option<f64>,
    /// Overall confidence.
    pub confidence: Confidence,
    /// Method with the largest effective weight.
    pub primary_method: MethodKind,
    /// Every method that produced a result.
    pub methods: BTreeMap<MethodKind, MethodResult>,
    /// Normalised effective weight of each contributing method; sums to one.
    pub weights: BTreeMap<MethodKind, f64>,
    /// Applicable methods that declined for lack of data.
    pub declined_methods: Vec<MethodKind>,
    /// Scenario set derived from `fair_value`.
    pub scenarios: Scenarios,
}

impl CompositeValuation {
    /// Number of methods that contributed.
    #[must_use]
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    /// Result of the primary method.
    #[must_use]
    pub fn primary_result(&self) -> Option<&MethodResult> {
        self.methods.get(&self.primary_method)
    }
}

/// Upside of `fair_value` over `price`, in percent.
///
/// `None` when the price is absent or not strictly positive.
#[must_use]
pub fn upside_pct(fair_value: f64, price: Option<f64>) -> Option<f64> {
    price.filter(|&p| p > 0.0).map(|p| (fair_value - p) / p * 100.0)
}
