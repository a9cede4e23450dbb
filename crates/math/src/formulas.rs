//! Closed-form valuation formulas.

use crate::MathError;

/// Required return on equity under CAPM.
///
/// `rate = risk_free_rate + beta * market_risk_premium`. A beta of zero yields
/// the risk-free rate.
#[must_use]
pub fn capm_required_return(risk_free_rate: f64, beta: f64, market_risk_premium: f64) -> f64 {
    beta.mul_add(market_risk_premium, risk_free_rate)
}

/// Discount rate used for cash flows.
///
/// Cost of equity stands in for WACC; debt is not blended in by leverage.
#[must_use]
pub fn wacc(risk_free_rate: f64, beta: f64, market_risk_premium: f64) -> f64 {
    capm_required_return(risk_free_rate, beta, market_risk_premium)
}

/// `1 / (1 + rate)^period`.
#[must_use]
pub fn discount_factor(rate: f64, period: u32) -> f64 {
    (1.0 + rate).powf(f64::from(period)).recip()
}

/// `cash_flow / (1 + rate)^period`.
#[must_use]
pub fn present_value(cash_flow: f64, rate: f64, period: u32) -> f64 {
    cash_flow * discount_factor(rate, period)
}

/// Gordon growth terminal value at the end of the final projected period.
///
/// `final_cash_flow * (1 + terminal_growth) / (discount_rate - terminal_growth)`.
///
/// # Errors
/// Returns `MathError::InvalidAssumption` if `discount_rate <= terminal_growth`.
pub fn terminal_value(
    final_cash_flow: f64,
    terminal_growth: f64,
    discount_rate: f64,
) -> Result<f64, MathError> {
    if discount_rate <= terminal_growth {
        return Err(MathError::InvalidAssumption { discount_rate, terminal_growth });
    }
    Ok(final_cash_flow * (1.0 + terminal_growth) / (discount_rate - terminal_growth))
}

/// Compound annual growth rate between two values `periods` apart.
///
/// `None` when `start` is not strictly positive, `end` is negative, or `periods` is zero.
#[must_use]
pub fn cagr(start: f64, end: f64, periods: u32) -> Option<f64> {
    if start <= 0.0 || end < 0.0 || periods == 0 {
        return None;
    }
    Some((end / start).powf(1.0 / f64::from(periods)) - 1.0)
}
