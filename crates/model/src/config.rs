//! Engine configuration.

use intrinsic_primitives::{CapitalMarket, DataQuality};
use intrinsic_methods::{
    ClassifierConfig, EbitdaConfig, IndustryTable, RevenueTerminalConfig, RuleOf40Config,
    UnitEconomicsConfig, WeightTable,
};
use serde::{Deserialize, Serialize};

use crate::ValuationError;

/// Weight multiplier applied to a method result by its data quality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityWeights {
    /// Multiplier for high-quality results.
    pub high: f64,
    /// Multiplier for medium-quality results.
    pub medium: f64,
    /// Multiplier for low-quality results.
    pub low: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self { high: 1.0, medium: 0.7, low: 0.4 }
    }
}

impl QualityWeights {
    /// Multiplier for a quality level.
    #[must_use]
    pub const fn get(&self, quality: DataQuality) -> f64 {
        match quality {
            DataQuality::High => self.high,
            DataQuality::Medium => self.medium,
            DataQuality::Low => self.low,
        }
    }
}

/// Multipliers producing the scenario set from a composite fair value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioMultipliers {
    /// Bear case.
    pub bear: f64,
    /// Base case.
    pub base: f64,
    /// Bull case.
    pub bull: f64,
    /// Optimistic case.
    pub optimistic: f64,
}

impl Default for ScenarioMultipliers {
    fn default() -> Self {
        Self { bear: 0.7, base: 1.0, bull: 1.3, optimistic: 1.5 }
    }
}

impl ScenarioMultipliers {
    /// Multipliers in `[bear, base, bull, optimistic]` order.
    #[must_use]
    pub const fn as_array(&self) -> [f64; 4] {
        [self.bear, self.base, self.bull, self.optimistic]
    }
}

/// Monte Carlo limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Smallest accepted trial count.
    pub min_trials: usize,
    /// Largest accepted trial count.
    pub max_trials: usize,
    /// Draw budget as a multiple of the requested trials.
    pub attempt_factor: usize,
    /// Discard rate above which a warning is logged.
    pub discard_warn_ratio: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { min_trials: 100, max_trials: 10_000, attempt_factor: 10, discard_warn_ratio: 0.10 }
    }
}

/// Configuration for [`ValuationEngine`](crate::ValuationEngine).
///
/// Every field has a default, so a JSON override only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Market-wide rates.
    pub market: CapitalMarket,
    /// Revenue and EBITDA multiples per company type.
    pub industries: IndustryTable,
    /// Base method weights per company type.
    pub weights: WeightTable,
    /// Weight multiplier by data quality.
    pub quality_weights: QualityWeights,
    /// Classification thresholds.
    pub classifier: ClassifierConfig,
    /// EBITDA multiple margin bands.
    pub ebitda: EbitdaConfig,
    /// Rule of 40 bands.
    pub rule_of_40: RuleOf40Config,
    /// Unit economics bands.
    pub unit_economics: UnitEconomicsConfig,
    /// Revenue terminal value projection.
    pub revenue_terminal: RevenueTerminalConfig,
    /// Scenario multipliers.
    pub scenarios: ScenarioMultipliers,
    /// Monte Carlo limits.
    pub simulation: SimulationConfig,
}

fn positive(name: &str, value: f64) -> Result<(), ValuationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValuationError::InvalidConfig(format!("{name} must be finite and positive, got {value}")))
    }
}

impl EngineConfig {
    /// Check the configuration for values the engine cannot use.
    ///
    /// # Errors
    /// Returns `ValuationError::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<(), ValuationError> {
        let CapitalMarket { risk_free_rate, market_risk_premium, terminal_growth } = self.market;
        if ![risk_free_rate, market_risk_premium, terminal_growth].iter().all(|v| v.is_finite()) {
            return Err(ValuationError::InvalidConfig("market rates must be finite".to_string()));
        }

        if let Some(t) = self.industries.first_invalid() {
            return Err(ValuationError::InvalidConfig(format!("industry profile for {t} is invalid")));
        }
        if let Some(t) = self.weights.first_invalid() {
            return Err(ValuationError::InvalidConfig(format!("method weights for {t} are invalid")));
        }

        let q = self.quality_weights;
        positive("quality_weights.high", q.high)?;
        positive("quality_weights.medium", q.medium)?;
        positive("quality_weights.low", q.low)?;

        positive("rule_of_40.base_multiple", self.rule_of_40.base_multiple)?;
        positive("unit_economics.base_multiple", self.unit_economics.base_multiple)?;
        let bands = [
            ("ebitda.margin_bands", &self.ebitda.margin_bands),
            ("rule_of_40.bands", &self.rule_of_40.bands),
            ("unit_economics.ltv_cac_bands", &self.unit_economics.ltv_cac_bands),
            ("unit_economics.churn_by_growth", &self.unit_economics.churn_by_growth),
        ];
        if let Some((name, _)) =
            bands.iter().find(|(_, b)| !b.is_well_formed() || !b.has_positive_factors())
        {
            return Err(ValuationError::InvalidConfig(format!("{name} are malformed")));
        }
        if !self.rule_of_40.ratings.is_well_formed() {
            return Err(ValuationError::InvalidConfig("rule_of_40.ratings are malformed".to_string()));
        }
        if !self.revenue_terminal.is_valid() {
            return Err(ValuationError::InvalidConfig("revenue_terminal is invalid".to_string()));
        }

        let s = self.scenarios.as_array();
        if !s.iter().all(|m| m.is_finite() && *m >= 0.0) || !s.windows(2).all(|w| w[0] <= w[1]) {
            return Err(ValuationError::InvalidConfig(
                "scenario multipliers must be non-negative and non-decreasing".to_string(),
            ));
        }

        let sim = self.simulation;
        if sim.min_trials == 0 || sim.min_trials > sim.max_trials || sim.attempt_factor == 0 {
            return Err(ValuationError::InvalidConfig(format!(
                "simulation bounds are invalid: min {} max {} attempt factor {}",
                sim.min_trials, sim.max_trials, sim.attempt_factor
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn quality_weights_lookup() {
        let q = QualityWeights::default();
        assert_eq!(q.get(DataQuality::High), 1.0);
        assert_eq!(q.get(DataQuality::Medium), 0.7);
        assert_eq!(q.get(DataQuality::Low), 0.4);
    }

    #[rstest]
    #[case::unordered_scenarios(|c: &mut EngineConfig| c.scenarios.bull = 0.5)]
    #[case::zero_quality_weight(|c: &mut EngineConfig| c.quality_weights.low = 0.0)]
    #[case::negative_weight(|c: &mut EngineConfig| c.weights.saas.rule_of_40 = -1.0)]
    #[case::nan_multiple(|c: &mut EngineConfig| c.industries.biotech.ebitda_multiple = f64::NAN)]
    #[case::inverted_trials(|c: &mut EngineConfig| c.simulation.min_trials = 20_000)]
    #[case::zero_horizon(|c: &mut EngineConfig| c.revenue_terminal.projection_years = 0)]
    #[case::infinite_rate(|c: &mut EngineConfig| c.market.risk_free_rate = f64::INFINITY)]
    fn rejects_invalid(#[case] mutate: fn(&mut EngineConfig)) {
        let mut config = EngineConfig::default();
        mutate(&mut config);
        assert!(matches!(config.validate(), Err(ValuationError::InvalidConfig(_))));
    }

    #[test]
    fn partial_json_override() {
        let json = r#"{
            "market": {"risk_free_rate": 0.05},
            "scenarios": {"bear": 0.5},
            "simulation": {"max_trials": 50000}
        }"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.market.risk_free_rate, 0.05);
        assert_eq!(config.market.market_risk_premium, 0.08);
        assert_eq!(config.scenarios.bear, 0.5);
        assert_eq!(config.scenarios.optimistic, 1.5);
        assert_eq!(config.simulation.max_trials, 50_000);
        assert!(config.validate().is_ok());
    }
}
