//! Industry multiples and method weights per company type.

use intrinsic_math::StepBands;
use intrinsic_primitives::{CompanyType, MethodKind};
use serde::{Deserialize, Serialize};

/// Growth-rate adjustment applied to industry multiples.
///
/// ≥50% → 1.5, ≥30% → 1.3, ≥15% → 1.1, ≥0% → 1.0, negative → 0.7.
#[must_use]
pub fn default_growth_bands() -> StepBands {
    StepBands::new(vec![(0.50, 1.5), (0.30, 1.3), (0.15, 1.1), (0.0, 1.0)], 0.7)
}

/// Valuation multiples for one company type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryProfile {
    /// Enterprise value to revenue.
    pub revenue_multiple: f64,
    /// Enterprise value to EBITDA.
    pub ebitda_multiple: f64,
    /// Multiplier on either multiple by revenue growth.
    #[serde(default = "default_growth_bands")]
    pub growth_bands: StepBands,
}

impl IndustryProfile {
    /// Profile with the default growth bands.
    #[must_use]
    pub fn new(revenue_multiple: f64, ebitda_multiple: f64) -> Self {
        Self { revenue_multiple, ebitda_multiple, growth_bands: default_growth_bands() }
    }

    fn for_type(company: CompanyType) -> Self {
        Self::new(company.default_revenue_multiple(), company.default_ebitda_multiple())
    }

    /// Growth adjustment factor for a revenue growth rate.
    #[must_use]
    pub fn growth_adjustment(&self, growth: f64) -> f64 {
        self.growth_bands.lookup(growth)
    }

    /// Whether multiples are finite and positive and bands are usable.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.revenue_multiple, self.ebitda_multiple].iter().all(|m| m.is_finite() && *m > 0.0)
            && self.growth_bands.is_well_formed()
            && self.growth_bands.has_positive_factors()
    }
}

/// Industry profiles keyed by company type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndustryTable {
    /// SaaS profile.
    pub saas: IndustryProfile,
    /// Software profile.
    pub software: IndustryProfile,
    /// E-commerce profile.
    pub ecommerce: IndustryProfile,
    /// Biotech profile.
    pub biotech: IndustryProfile,
    /// Fallback profile.
    pub default: IndustryProfile,
}

impl Default for IndustryTable {
    fn default() -> Self {
        Self {
            saas: IndustryProfile::for_type(CompanyType::Saas),
            software: IndustryProfile::for_type(CompanyType::Software),
            ecommerce: IndustryProfile::for_type(CompanyType::Ecommerce),
            biotech: IndustryProfile::for_type(CompanyType::Biotech),
            default: IndustryProfile::for_type(CompanyType::Default),
        }
    }
}

impl IndustryTable {
    /// Profile for a company type.
    #[must_use]
    pub const fn get(&self, company: CompanyType) -> &IndustryProfile {
        match company {
            CompanyType::Saas => &self.saas,
            CompanyType::Software => &self.software,
            CompanyType::Ecommerce => &self.ecommerce,
            CompanyType::Biotech => &self.biotech,
            CompanyType::Default => &self.default,
        }
    }

    /// First company type whose profile is invalid.
    #[must_use]
    pub fn first_invalid(&self) -> Option<CompanyType> {
        CompanyType::ALL.into_iter().find(|&t| !self.get(t).is_valid())
    }
}

/// Base weight per alternative method for one company type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MethodWeights {
    /// Revenue multiple weight.
    pub revenue_multiple: f64,
    /// EBITDA multiple weight.
    pub ebitda_multiple: f64,
    /// Rule of 40 weight.
    pub rule_of_40: f64,
    /// Unit economics weight.
    pub unit_economics: f64,
    /// Revenue terminal value weight.
    pub terminal_value: f64,
}

impl MethodWeights {
    /// Create a new weight set.
    #[must_use]
    pub const fn new(
        revenue_multiple: f64,
        ebitda_multiple: f64,
        rule_of_40: f64,
        unit_economics: f64,
        terminal_value: f64,
    ) -> Self {
        Self { revenue_multiple, ebitda_multiple, rule_of_40, unit_economics, terminal_value }
    }

    /// Weight for a method. DCF is never weighted against alternatives.
    #[must_use]
    pub const fn get(&self, method: MethodKind) -> f64 {
        match method {
            MethodKind::RevenueMultiple => self.revenue_multiple,
            MethodKind::EbitdaMultiple => self.ebitda_multiple,
            MethodKind::RuleOf40 => self.rule_of_40,
            MethodKind::UnitEconomics => self.unit_economics,
            MethodKind::TerminalValue => self.terminal_value,
            MethodKind::Dcf => 0.0,
        }
    }

    /// Whether every weight is finite and non-negative.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        MethodKind::ZERO_FCF.iter().map(|&m| self.get(m)).all(|w| w.is_finite() && w >= 0.0)
    }
}

/// Method weights keyed by company type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightTable {
    /// SaaS weights.
    pub saas: MethodWeights,
    /// Software weights.
    pub software: MethodWeights,
    /// E-commerce weights.
    pub ecommerce: MethodWeights,
    /// Biotech weights.
    pub biotech: MethodWeights,
    /// Fallback weights.
    pub default: MethodWeights,
}

impl Default for WeightTable {
    fn default() -> Self {
        let fallback = MethodWeights::new(0.30, 0.35, 0.05, 0.05, 0.25);
        Self {
            saas: MethodWeights::new(0.20, 0.10, 0.35, 0.30, 0.05),
            software: MethodWeights::new(0.30, 0.25, 0.25, 0.05, 0.15),
            ecommerce: MethodWeights::new(0.40, 0.30, 0.0, 0.10, 0.20),
            biotech: fallback,
            default: fallback,
        }
    }
}

impl WeightTable {
    /// Weights for a company type.
    #[must_use]
    pub const fn get(&self, company: CompanyType) -> &MethodWeights {
        match company {
            CompanyType::Saas => &self.saas,
            CompanyType::Software => &self.software,
            CompanyType::Ecommerce => &self.ecommerce,
            CompanyType::Biotech => &self.biotech,
            CompanyType::Default => &self.default,
        }
    }

    /// Base weight of `method` for `company`.
    #[must_use]
    pub const fn weight(&self, company: CompanyType, method: MethodKind) -> f64 {
        self.get(company).get(method)
    }

    /// First company type with a negative or non-finite weight.
    #[must_use]
    pub fn first_invalid(&self) -> Option<CompanyType> {
        CompanyType::ALL.into_iter().find(|&t| !self.get(t).is_valid())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(CompanyType::Saas, 10.0, 30.0)]
    #[case(CompanyType::Software, 8.0, 25.0)]
    #[case(CompanyType::Ecommerce, 2.5, 12.0)]
    #[case(CompanyType::Biotech, 5.0, 15.0)]
    #[case(CompanyType::Default, 2.5, 12.0)]
    fn default_profiles(#[case] t: CompanyType, #[case] revenue: f64, #[case] ebitda: f64) {
        let table = IndustryTable::default();
        assert_eq!(table.get(t).revenue_multiple, revenue);
        assert_eq!(table.get(t).ebitda_multiple, ebitda);
        assert!(table.get(t).is_valid());
    }

    #[rstest]
    #[case(0.45, 1.3)]
    #[case(0.15, 1.1)]
    #[case(-0.1, 0.7)]
    fn growth_adjustment(#[case] growth: f64, #[case] expected: f64) {
        assert_eq!(IndustryTable::default().saas.growth_adjustment(growth), expected);
    }

    #[test]
    fn default_weights_sum_to_one() {
        let table = WeightTable::default();
        for t in CompanyType::ALL {
            let sum: f64 = MethodKind::ZERO_FCF.iter().map(|&m| table.weight(t, m)).sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
        }
        assert!(table.first_invalid().is_none());
    }

    #[test]
    fn ecommerce_excludes_rule_of_40() {
        let table = WeightTable::default();
        assert_eq!(table.weight(CompanyType::Ecommerce, MethodKind::RuleOf40), 0.0);
        assert_eq!(table.weight(CompanyType::Saas, MethodKind::Dcf), 0.0);
    }

    #[test]
    fn invalid_entries_detected() {
        let mut weights = WeightTable::default();
        weights.biotech.rule_of_40 = -0.1;
        assert_eq!(weights.first_invalid(), Some(CompanyType::Biotech));

        let mut industries = IndustryTable::default();
        industries.software.revenue_multiple = f64::NAN;
        assert_eq!(industries.first_invalid(), Some(CompanyType::Software));
    }

    #[test]
    fn partial_override_from_json() {
        let json = r#"{"saas": {"revenue_multiple": 12.0, "ebitda_multiple": 35.0}}"#;
        let table: IndustryTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.saas.revenue_multiple, 12.0);
        assert_eq!(table.saas.growth_adjustment(0.6), 1.5);
        assert_eq!(table.biotech.revenue_multiple, 5.0);
    }
}
