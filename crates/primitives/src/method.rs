//! Per-method valuation output.

use std::collections::BTreeMap;

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Identifies a valuation method.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
pub enum MethodKind {
    /// Discounted free cash flow.
    #[display("DCF")]
    Dcf,
    /// Enterprise value as a multiple of revenue.
    #[display("Revenue Multiple")]
    RevenueMultiple,
    /// Enterprise value as a multiple of EBITDA.
    #[display("EBITDA Multiple")]
    EbitdaMultiple,
    /// Revenue multiple scaled by the Rule-of-40 score.
    #[display("Rule of 40")]
    RuleOf40,
    /// Revenue multiple scaled by LTV:CAC efficiency.
    #[display("Unit Economics")]
    UnitEconomics,
    /// Revenue-driven DCF variant with a perpetual terminal value.
    #[display("Revenue Terminal Value")]
    TerminalValue,
}

impl MethodKind {
    /// Alternative methods used when free cash flow is unusable, in evaluation order.
    pub const ZERO_FCF: [Self; 5] = [
        Self::RevenueMultiple,
        Self::EbitdaMultiple,
        Self::RuleOf40,
        Self::UnitEconomics,
        Self::TerminalValue,
    ];
}

/// How much of a method's input was observed rather than estimated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
pub enum DataQuality {
    /// Two or more inputs were estimated.
    #[display("low")]
    Low,
    /// Exactly one optional input was estimated.
    #[display("medium")]
    Medium,
    /// Every input was present.
    #[display("high")]
    High,
}

impl DataQuality {
    /// Derive quality from the number of estimated inputs.
    #[must_use]
    pub const fn from_estimated(estimated: usize) -> Self {
        match estimated {
            0 => Self::High,
            1 => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// Qualitative health rating attached to some methods.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
pub enum Assessment {
    /// Below benchmark.
    #[display("poor")]
    Poor,
    /// At benchmark.
    #[display("fair")]
    Fair,
    /// Above benchmark.
    #[display("good")]
    Good,
    /// Well above benchmark.
    #[display("excellent")]
    Excellent,
}

/// Result of a single valuation method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodResult {
    /// Which method produced this result.
    pub method: MethodKind,
    /// Fair value per share.
    pub fair_value: f64,
    /// Enterprise value before the equity bridge.
    pub enterprise_value: f64,
    /// Input quality.
    pub data_quality: DataQuality,
    /// Optional qualitative rating (Rule-of-40 band, unit-economics health).
    pub assessment: Option<Assessment>,
    /// Named intermediate values, for auditability.
    pub breakdown: BTreeMap<String, f64>,
}

impl MethodResult {
    /// Create a result with an empty breakdown.
    #[must_use]
    pub const fn new(
        method: MethodKind,
        fair_value: f64,
        enterprise_value: f64,
        data_quality: DataQuality,
    ) -> Self {
        Self {
            method,
            fair_value,
            enterprise_value,
            data_quality,
            assessment: None,
            breakdown: BTreeMap::new(),
        }
    }

    /// Attach an assessment.
    #[must_use]
    pub const fn with_assessment(mut self, assessment: Assessment) -> Self {
        self.assessment = Some(assessment);
        self
    }

    /// Record a named intermediate value.
    #[must_use]
    pub fn with_entry(mut self, name: impl Into<String>, value: f64) -> Self {
        self.breakdown.insert(name.into(), value);
        self
    }

    /// Look up a named intermediate value.
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<f64> {
        self.breakdown.get(name).copied()
    }
}
