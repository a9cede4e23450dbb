//! Error types for valuation math.

/// Errors that can occur in formula evaluation and statistics.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MathError {
    /// Terminal growth is not strictly below the discount rate.
    #[error(
        "terminal growth {terminal_growth} must be below discount rate {discount_rate}"
    )]
    InvalidAssumption {
        /// Discount rate supplied.
        discount_rate: f64,
        /// Terminal growth supplied.
        terminal_growth: f64,
    },

    /// Empty data.
    #[error("empty data provided")]
    EmptyData,

    /// Percentile level outside [0, 100].
    #[error("invalid percentile: {0} (must be in [0, 100])")]
    InvalidPercentile(f64),

    /// A NaN or infinite value where a finite one is required.
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MathError::InvalidPercentile(101.0);
        assert!(err.to_string().contains("101"));

        let err = MathError::InvalidAssumption { discount_rate: 0.05, terminal_growth: 0.06 };
        let msg = err.to_string();
        assert!(msg.contains("0.05") && msg.contains("0.06"));
    }
}
