//! Valuation method trait definitions.

use std::fmt::Debug;

use derive_more::Display;
use intrinsic_primitives::{
    CapitalMarket, CompanyType, FinancialSnapshot, MethodKind, MethodResult,
};

/// Why a method produced no result.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum DeclineReason {
    /// A required input was absent.
    #[display("missing {_0}")]
    MissingField(&'static str),
    /// A required input was zero or negative.
    #[display("non-positive {_0}")]
    NonPositive(&'static str),
    /// The method does not apply to this company type.
    #[display("not applicable to {_0}")]
    NotApplicable(CompanyType),
    /// A formula rejected the derived inputs.
    #[display("formula error: {_0}")]
    Formula(String),
}

/// A method declining to value a company.
///
/// This is an expected outcome, not a failure: the orchestrator records it
/// and continues with the remaining methods.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{method} declined: {reason}")]
pub struct MethodDeclined {
    /// Method that declined.
    pub method: MethodKind,
    /// Reason for declining.
    pub reason: DeclineReason,
}

impl MethodDeclined {
    /// Create a new decline.
    #[must_use]
    pub const fn new(method: MethodKind, reason: DeclineReason) -> Self {
        Self { method, reason }
    }
}

/// Inputs a method evaluates against.
#[derive(Debug, Clone, Copy)]
pub struct MethodContext<'a> {
    /// Company fundamentals.
    pub snapshot: &'a FinancialSnapshot,
    /// Classification derived from the snapshot.
    pub company: CompanyType,
    /// Market-wide rates.
    pub market: &'a CapitalMarket,
}

impl<'a> MethodContext<'a> {
    /// Create a new context.
    #[must_use]
    pub const fn new(
        snapshot: &'a FinancialSnapshot,
        company: CompanyType,
        market: &'a CapitalMarket,
    ) -> Self {
        Self { snapshot, company, market }
    }

    /// Convert enterprise value to fair value per share.
    ///
    /// Adds cash and subtracts net debt (absent fields count as zero), then
    /// divides by shares outstanding.
    ///
    /// # Errors
    /// Declines if shares outstanding are absent or not positive.
    pub fn per_share(&self, method: MethodKind, enterprise_value: f64) -> Result<f64, MethodDeclined> {
        let shares =
            require_positive(method, "shares_outstanding", self.snapshot.shares_outstanding)?;
        Ok((enterprise_value + self.snapshot.equity_bridge()) / shares)
    }
}

/// Unwrap a strictly positive input or decline.
///
/// # Errors
/// `MissingField` when `value` is `None`, `NonPositive` when it is zero or negative.
pub fn require_positive(
    method: MethodKind,
    field: &'static str,
    value: Option<f64>,
) -> Result<f64, MethodDeclined> {
    match value {
        None => Err(MethodDeclined::new(method, DeclineReason::MissingField(field))),
        Some(v) if v <= 0.0 => Err(MethodDeclined::new(method, DeclineReason::NonPositive(field))),
        Some(v) => Ok(v),
    }
}

/// A valuation technique usable when free cash flow is not.
pub trait ValuationMethod: Debug + Send + Sync {
    /// Which method this is.
    fn kind(&self) -> MethodKind;

    /// Whether this method applies to a company type.
    fn applies_to(&self, _company: CompanyType) -> bool {
        true
    }

    /// Value the company, or decline.
    ///
    /// # Errors
    /// Returns `MethodDeclined` when required inputs are absent or unusable.
    fn evaluate(&self, ctx: &MethodContext<'_>) -> Result<MethodResult, MethodDeclined>;
}
