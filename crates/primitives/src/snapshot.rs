//! Financial snapshot: the immutable input record for one valuation request.

use serde::{Deserialize, Serialize};

use crate::{Date, Ticker};

/// Trailing fundamentals for one company, as supplied by a data provider.
///
/// Every numeric field is optional: the engine degrades (fewer methods, lower
/// confidence) rather than failing when a field is absent. Only revenue and
/// shares outstanding are required by every alternative method, and free cash
/// flow by the DCF model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    /// Ticker symbol.
    pub ticker: Ticker,
    /// Date the fundamentals were observed.
    pub as_of: Option<Date>,
    /// Latest market price per share.
    pub current_price: Option<f64>,
    /// Trailing twelve-month revenue.
    pub revenue: Option<f64>,
    /// Year-over-year revenue growth (0.25 = 25%).
    pub revenue_growth: Option<f64>,
    /// Annual revenue history, most recent first.
    #[serde(default)]
    pub revenue_history: Vec<f64>,
    /// Trailing EBITDA.
    pub ebitda: Option<f64>,
    /// EBITDA margin (EBITDA / revenue).
    pub ebitda_margin: Option<f64>,
    /// Trailing free cash flow; may be negative.
    pub free_cash_flow: Option<f64>,
    /// Gross margin.
    pub gross_margin: Option<f64>,
    /// Debt subtracted when bridging enterprise value to equity value.
    pub net_debt: Option<f64>,
    /// Cash and equivalents added when bridging to equity value.
    pub cash: Option<f64>,
    /// Diluted shares outstanding.
    pub shares_outstanding: Option<f64>,
    /// Equity beta against the market.
    pub beta: Option<f64>,
    /// Sector classification from the provider.
    pub sector: Option<String>,
    /// Industry classification from the provider.
    pub industry: Option<String>,
    /// Customer lifetime value.
    pub customer_lifetime_value: Option<f64>,
    /// Customer acquisition cost.
    pub customer_acquisition_cost: Option<f64>,
    /// Monthly customer churn (0.03 = 3%).
    pub monthly_churn: Option<f64>,
}

impl FinancialSnapshot {
    /// Create an empty snapshot for a ticker.
    #[must_use]
    pub fn new(ticker: impl Into<Ticker>) -> Self {
        Self {
            ticker: ticker.into(),
            as_of: None,
            current_price: None,
            revenue: None,
            revenue_growth: None,
            revenue_history: Vec::new(),
            ebitda: None,
            ebitda_margin: None,
            free_cash_flow: None,
            gross_margin: None,
            net_debt: None,
            cash: None,
            shares_outstanding: None,
            beta: None,
            sector: None,
            industry: None,
            customer_lifetime_value: None,
            customer_acquisition_cost: None,
            monthly_churn: None,
        }
    }

    /// Set the observation date.
    #[must_use]
    pub fn with_as_of(mut self, date: Date) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Set the current share price.
    #[must_use]
    pub fn with_current_price(mut self, price: f64) -> Self {
        self.current_price = Some(price);
        self
    }

    /// Set trailing revenue.
    #[must_use]
    pub fn with_revenue(mut self, revenue: f64) -> Self {
        self.revenue = Some(revenue);
        self
    }

    /// Set revenue growth.
    #[must_use]
    pub fn with_revenue_growth(mut self, growth: f64) -> Self {
        self.revenue_growth = Some(growth);
        self
    }

    /// Set the annual revenue history, most recent first.
    #[must_use]
    pub fn with_revenue_history(mut self, history: Vec<f64>) -> Self {
        self.revenue_history = history;
        self
    }

    /// Set trailing EBITDA.
    #[must_use]
    pub fn with_ebitda(mut self, ebitda: f64) -> Self {
        self.ebitda = Some(ebitda);
        self
    }

    /// Set EBITDA margin.
    #[must_use]
    pub fn with_ebitda_margin(mut self, margin: f64) -> Self {
        self.ebitda_margin = Some(margin);
        self
    }

    /// Set free cash flow.
    #[must_use]
    pub fn with_free_cash_flow(mut self, fcf: f64) -> Self {
        self.free_cash_flow = Some(fcf);
        self
    }

    /// Set gross margin.
    #[must_use]
    pub fn with_gross_margin(mut self, margin: f64) -> Self {
        self.gross_margin = Some(margin);
        self
    }

    /// Set cash and net debt.
    #[must_use]
    pub fn with_balance_sheet(mut self, cash: f64, net_debt: f64) -> Self {
        self.cash = Some(cash);
        self.net_debt = Some(net_debt);
        self
    }

    /// Set shares outstanding.
    #[must_use]
    pub fn with_shares_outstanding(mut self, shares: f64) -> Self {
        self.shares_outstanding = Some(shares);
        self
    }

    /// Set beta.
    #[must_use]
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = Some(beta);
        self
    }

    /// Set sector and industry.
    #[must_use]
    pub fn with_classification(
        mut self,
        sector: impl Into<String>,
        industry: impl Into<String>,
    ) -> Self {
        self.sector = Some(sector.into());
        self.industry = Some(industry.into());
        self
    }

    /// Set the sector only.
    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Set customer lifetime value and acquisition cost.
    #[must_use]
    pub fn with_unit_economics(mut self, ltv: f64, cac: f64) -> Self {
        self.customer_lifetime_value = Some(ltv);
        self.customer_acquisition_cost = Some(cac);
        self
    }

    /// Set monthly churn.
    #[must_use]
    pub fn with_monthly_churn(mut self, churn: f64) -> Self {
        self.monthly_churn = Some(churn);
        self
    }

    /// Free cash flow when present and strictly positive.
    #[must_use]
    pub fn positive_free_cash_flow(&self) -> Option<f64> {
        self.free_cash_flow.filter(|&fcf| fcf > 0.0)
    }

    /// Revenue when present and strictly positive.
    #[must_use]
    pub fn positive_revenue(&self) -> Option<f64> {
        self.revenue.filter(|&r| r > 0.0)
    }

    /// Shares outstanding when present and strictly positive.
    #[must_use]
    pub fn positive_shares(&self) -> Option<f64> {
        self.shares_outstanding.filter(|&s| s > 0.0)
    }

    /// Amount added to enterprise value to reach equity value (cash minus net debt).
    ///
    /// Absent balance-sheet fields contribute zero.
    #[must_use]
    pub fn equity_bridge(&self) -> f64 {
        self.cash.unwrap_or(0.0) - self.net_debt.unwrap_or(0.0)
    }

    /// Number of balance-sheet fields (cash, net debt) that are absent.
    #[must_use]
    pub fn missing_balance_sheet_fields(&self) -> usize {
        usize::from(self.cash.is_none()) + usize::from(self.net_debt.is_none())
    }

    /// Lower-cased sector and industry joined by a space, for keyword matching.
    #[must_use]
    pub fn classification_text(&self) -> String {
        let sector = self.sector.as_deref().unwrap_or("");
        let industry = self.industry.as_deref().unwrap_or("");
        format!("{sector} {industry}").to_lowercase()
    }

    /// Name of the first provided numeric field that is NaN or infinite.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<&'static str> {
        let fields = [
            ("current_price", self.current_price),
            ("revenue", self.revenue),
            ("revenue_growth", self.revenue_growth),
            ("ebitda", self.ebitda),
            ("ebitda_margin", self.ebitda_margin),
            ("free_cash_flow", self.free_cash_flow),
            ("gross_margin", self.gross_margin),
            ("net_debt", self.net_debt),
            ("cash", self.cash),
            ("shares_outstanding", self.shares_outstanding),
            ("beta", self.beta),
            ("customer_lifetime_value", self.customer_lifetime_value),
            ("customer_acquisition_cost", self.customer_acquisition_cost),
            ("monthly_churn", self.monthly_churn),
        ];

        fields
            .iter()
            .find(|(_, v)| v.is_some_and(|x| !x.is_finite()))
            .map(|(name, _)| *name)
            .or_else(|| {
                self.revenue_history.iter().any(|x| !x.is_finite()).then_some("revenue_history")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let s = FinancialSnapshot::new("crm")
            .with_revenue(200.0)
            .with_revenue_growth(0.45)
            .with_sector("Software")
            .with_shares_outstanding(10.0);

        assert_eq!(s.ticker.as_str(), "CRM");
        assert_eq!(s.positive_revenue(), Some(200.0));
        assert_eq!(s.revenue_growth, Some(0.45));
        assert_eq!(s.positive_shares(), Some(10.0));
        assert!(s.free_cash_flow.is_none());
    }

    #[test]
    fn positive_fcf_filters_negative() {
        let s = FinancialSnapshot::new("X").with_free_cash_flow(-5.0);
        assert_eq!(s.positive_free_cash_flow(), None);

        let s = FinancialSnapshot::new("X").with_free_cash_flow(0.0);
        assert_eq!(s.positive_free_cash_flow(), None);
    }

    #[test]
    fn equity_bridge_defaults_to_zero() {
        let s = FinancialSnapshot::new("X");
        assert_eq!(s.equity_bridge(), 0.0);
        assert_eq!(s.missing_balance_sheet_fields(), 2);

        let s = s.with_balance_sheet(30.0, 10.0);
        assert_eq!(s.equity_bridge(), 20.0);
        assert_eq!(s.missing_balance_sheet_fields(), 0);
    }

    #[test]
    fn classification_text_lowercases() {
        let s = FinancialSnapshot::new("X").with_classification("Technology", "Software - SaaS");
        assert_eq!(s.classification_text(), "technology software - saas");
    }

    #[test]
    fn non_finite_detection() {
        let s = FinancialSnapshot::new("X").with_revenue(f64::NAN);
        assert_eq!(s.first_non_finite(), Some("revenue"));

        let s = FinancialSnapshot::new("X").with_revenue_history(vec![1.0, f64::INFINITY]);
        assert_eq!(s.first_non_finite(), Some("revenue_history"));

        let s = FinancialSnapshot::new("X").with_revenue(1.0);
        assert_eq!(s.first_non_finite(), None);
    }
}
