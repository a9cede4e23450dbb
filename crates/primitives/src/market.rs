//! Capital-market inputs shared by every valuation.

use serde::{Deserialize, Serialize};

/// Market-wide rates used to derive discount rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapitalMarket {
    /// Risk-free rate.
    pub risk_free_rate: f64,
    /// Expected market return in excess of the risk-free rate.
    pub market_risk_premium: f64,
    /// Long-run perpetual growth rate, shared by every terminal value.
    pub terminal_growth: f64,
}

impl Default for CapitalMarket {
    fn default() -> Self {
        Self { risk_free_rate: 0.04, market_risk_premium: 0.08, terminal_growth: 0.025 }
    }
}

impl CapitalMarket {
    /// Beta assumed when a snapshot does not report one.
    pub const DEFAULT_BETA: f64 = 1.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let m = CapitalMarket::default();
        assert_eq!(m.risk_free_rate, 0.04);
        assert_eq!(m.market_risk_premium, 0.08);
        assert_eq!(m.terminal_growth, 0.025);
    }
}
