//! Error types for valuation.

use intrinsic_math::MathError;
use intrinsic_primitives::Ticker;

/// Errors that can occur during valuation, simulation and sensitivity analysis.
#[derive(Debug, thiserror::Error)]
pub enum ValuationError {
    /// Caller-supplied input is malformed or outside its documented range.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Terminal growth is not strictly below the discount rate.
    #[error(
        "invalid assumption: terminal growth {terminal_growth} must be below discount rate {discount_rate}"
    )]
    InvalidAssumption {
        /// Discount rate supplied.
        discount_rate: f64,
        /// Terminal growth supplied.
        terminal_growth: f64,
    },

    /// No valuation method could produce a result.
    #[error("insufficient data to value {ticker}: {}", .reasons.join("; "))]
    InsufficientData {
        /// Company being valued.
        ticker: Ticker,
        /// Why each method declined.
        reasons: Vec<String>,
    },

    /// Free cash flow is absent or not positive.
    #[error("DCF not applicable: free cash flow is {free_cash_flow:?}")]
    DcfNotApplicable {
        /// Free cash flow supplied.
        free_cash_flow: Option<f64>,
    },

    /// Invalid engine configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Every Monte Carlo draw was discarded.
    #[error("simulation exhausted: {valid} valid trials after {attempts} draws")]
    SimulationExhausted {
        /// Total draws made.
        attempts: usize,
        /// Valid trials obtained.
        valid: usize,
    },

    /// Polars error.
    #[error("data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl ValuationError {
    /// Returns whether this error is recoverable.
    ///
    /// Only an invalid assumption is: a sampled or swept point can be dropped
    /// without affecting the rest of the run.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidAssumption { .. })
    }
}

impl From<MathError> for ValuationError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InvalidAssumption { discount_rate, terminal_growth } => {
                Self::InvalidAssumption { discount_rate, terminal_growth }
            }
            other => Self::InvalidInput(other.to_string()),
        }
    }
}
