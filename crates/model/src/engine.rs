//! The valuation orchestrator.

use std::collections::BTreeMap;

use intrinsic_math::wacc;
use intrinsic_methods::{
    EbitdaMultiple, KeywordClassifier, RevenueMultiple, RevenueTerminalValue, RuleOf40,
    UnitEconomics,
};
use intrinsic_primitives::{
    AssumptionStdDevs, CapitalMarket, CompanyType, CompositeValuation, Confidence, DataQuality,
    FinancialSnapshot, MethodKind, MethodResult, Methodology, MonteCarloResult, Scenarios,
    SensitivityGrid, ValuationAssumptions, upside_pct,
};
use intrinsic_traits::{CompanyClassifier, MethodContext, ValuationMethod};
use tracing::{debug, info, info_span};

use crate::{
    BalanceSheet, DcfModel, EngineConfig, MonteCarloSimulator, SensitivityAnalyzer, Sweep,
    ValuationError,
};

fn check_snapshot(snapshot: &FinancialSnapshot) -> Result<(), ValuationError> {
    match snapshot.first_non_finite() {
        Some(field) => Err(ValuationError::InvalidInput(format!("{field} must be finite"))),
        None => Ok(()),
    }
}

fn check_assumptions(assumptions: &ValuationAssumptions) -> Result<(), ValuationError> {
    if let Some(violation) = assumptions.out_of_range() {
        return Err(ValuationError::InvalidInput(violation.to_string()));
    }
    if !assumptions.has_valid_spread() {
        return Err(ValuationError::InvalidAssumption {
            discount_rate: assumptions.discount_rate,
            terminal_growth: assumptions.terminal_growth,
        });
    }
    Ok(())
}

fn positive_fcf(snapshot: &FinancialSnapshot) -> Result<f64, ValuationError> {
    snapshot
        .positive_free_cash_flow()
        .ok_or(ValuationError::DcfNotApplicable { free_cash_flow: snapshot.free_cash_flow })
}

/// Confidence from the number of contributing methods and how many of them
/// had complete inputs.
fn confidence(results: &[MethodResult]) -> Confidence {
    let high = results.iter().filter(|r| r.data_quality == DataQuality::High).count();
    match results.len() {
        n if n >= 3 && high >= 2 => Confidence::High,
        n if n >= 2 && high >= 1 => Confidence::Medium,
        _ => Confidence::Low,
    }
}

/// Normalise raw method weights to sum to one, falling back to an equal
/// average when they sum to zero.
fn normalized_weights(raw: &[f64]) -> Vec<f64> {
    let total: f64 = raw.iter().sum();
    if total > 0.0 {
        raw.iter().map(|w| w / total).collect()
    } else {
        vec![1.0 / raw.len() as f64; raw.len()]
    }
}

/// Index of the largest weight. Ties go to the earliest method.
fn primary_index(weights: &[f64]) -> usize {
    let mut primary = 0;
    for (i, w) in weights.iter().enumerate() {
        if *w > weights[primary] {
            primary = i;
        }
    }
    primary
}

/// Values companies by DCF when free cash flow is positive, and by a
/// weighted blend of revenue- and margin-based methods otherwise.
///
/// # Example
///
/// ```ignore
/// let engine = ValuationEngine::new(EngineConfig::default())?;
/// let valuation = engine.evaluate(&snapshot, &ValuationAssumptions::default())?;
/// println!("{} {:.2}", valuation.primary_method, valuation.fair_value);
/// ```
#[derive(Debug)]
pub struct ValuationEngine {
    config: EngineConfig,
    dcf: DcfModel,
    classifier: KeywordClassifier,
    methods: Vec<Box<dyn ValuationMethod>>,
    simulator: MonteCarloSimulator,
    sensitivity: SensitivityAnalyzer,
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self::build(EngineConfig::default())
    }
}

impl ValuationEngine {
    /// Create an engine from a configuration.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the configuration fails validation.
    pub fn new(config: EngineConfig) -> Result<Self, ValuationError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        let methods: Vec<Box<dyn ValuationMethod>> = vec![
            Box::new(RevenueMultiple::with_config(config.industries.clone())),
            Box::new(EbitdaMultiple::with_config(config.industries.clone(), config.ebitda.clone())),
            Box::new(RuleOf40::with_config(config.rule_of_40.clone())),
            Box::new(UnitEconomics::with_config(config.unit_economics.clone())),
            Box::new(RevenueTerminalValue::with_config(config.revenue_terminal.clone())),
        ];
        Self {
            dcf: DcfModel::new(),
            classifier: KeywordClassifier::with_config(config.classifier.clone()),
            methods,
            simulator: MonteCarloSimulator::with_config(config.simulation),
            sensitivity: SensitivityAnalyzer::new(),
            config,
        }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Zero-FCF methods in evaluation order.
    pub fn methods(&self) -> impl Iterator<Item = MethodKind> + '_ {
        self.methods.iter().map(|m| m.kind())
    }

    /// Classify a snapshot with the configured thresholds.
    #[must_use]
    pub fn classify(&self, snapshot: &FinancialSnapshot) -> CompanyType {
        self.classifier.classify(snapshot)
    }

    /// DCF assumptions derived from market data.
    ///
    /// The discount rate is the CAPM cost of equity using the snapshot's beta
    /// (1.0 when absent), terminal growth is the configured long-run rate, and
    /// growth is the reported revenue growth clamped to its allowed range.
    #[must_use]
    pub fn capm_assumptions(&self, snapshot: &FinancialSnapshot) -> ValuationAssumptions {
        let CapitalMarket { risk_free_rate, market_risk_premium, terminal_growth } =
            self.config.market;
        let defaults = ValuationAssumptions::default();
        let (g_lo, g_hi) = ValuationAssumptions::GROWTH_RANGE;
        let beta = snapshot.beta.unwrap_or(CapitalMarket::DEFAULT_BETA);

        ValuationAssumptions::new(
            snapshot.revenue_growth.map_or(defaults.growth_rate, |g| g.clamp(g_lo, g_hi)),
            wacc(risk_free_rate, beta, market_risk_premium),
            terminal_growth,
            defaults.projection_years,
        )
    }

    /// Value a company.
    ///
    /// Positive free cash flow routes to the DCF model alone. Otherwise every
    /// zero-FCF method applicable to the company type runs and the results
    /// are blended by company-type weight times data-quality weight.
    ///
    /// `assumptions` only drive the DCF path. They are range-checked on both
    /// paths but the zero-FCF methods ignore them, taking discount and
    /// terminal growth rates from the configured [`CapitalMarket`].
    ///
    /// # Errors
    /// * `InvalidInput` for non-finite snapshot fields, out-of-range
    ///   assumptions, or non-positive shares outstanding
    /// * `InvalidAssumption` if terminal growth is not below the discount rate
    /// * `InsufficientData` if shares are absent or no method produced a value
    pub fn evaluate(
        &self,
        snapshot: &FinancialSnapshot,
        assumptions: &ValuationAssumptions,
    ) -> Result<CompositeValuation, ValuationError> {
        let _span = info_span!("evaluate", ticker = %snapshot.ticker).entered();

        check_snapshot(snapshot)?;
        check_assumptions(assumptions)?;
        let balance_sheet = BalanceSheet::from_snapshot(snapshot)?;
        let company = self.classify(snapshot);

        let valuation = match snapshot.positive_free_cash_flow() {
            Some(fcf) => self.value_dcf(snapshot, company, fcf, assumptions, &balance_sheet)?,
            None => self.value_zero_fcf(snapshot, company)?,
        };

        info!(
            fair_value = valuation.fair_value,
            confidence = %valuation.confidence,
            primary = %valuation.primary_method,
            methods = valuation.method_count(),
            "valuation complete"
        );
        Ok(valuation)
    }

    fn value_dcf(
        &self,
        snapshot: &FinancialSnapshot,
        company: CompanyType,
        fcf: f64,
        assumptions: &ValuationAssumptions,
        balance_sheet: &BalanceSheet,
    ) -> Result<CompositeValuation, ValuationError> {
        let quality = DataQuality::from_estimated(snapshot.missing_balance_sheet_fields());
        let result = self.dcf.value(fcf, assumptions, balance_sheet)?.into_method_result(quality);
        let fair_value = result.fair_value;
        let confidence = match quality {
            DataQuality::High => Confidence::High,
            DataQuality::Medium => Confidence::Medium,
            DataQuality::Low => Confidence::Low,
        };

        Ok(CompositeValuation {
            ticker: snapshot.ticker.clone(),
            company_type: company,
            methodology: Methodology::Dcf,
            fair_value,
            current_price: snapshot.current_price,
            upside_pct: upside_pct(fair_value, snapshot.current_price),
            confidence,
            primary_method: MethodKind::Dcf,
            methods: BTreeMap::from([(MethodKind::Dcf, result)]),
            weights: BTreeMap::from([(MethodKind::Dcf, 1.0)]),
            declined_methods: Vec::new(),
            scenarios: Scenarios::scaled(fair_value, self.config.scenarios.as_array()),
        })
    }

    /// Blend the applicable zero-FCF methods. Caller assumptions play no
    /// part here; every rate comes from the configured market.
    fn value_zero_fcf(
        &self,
        snapshot: &FinancialSnapshot,
        company: CompanyType,
    ) -> Result<CompositeValuation, ValuationError> {
        let ctx = MethodContext::new(snapshot, company, &self.config.market);
        let mut results = Vec::new();
        let mut declined = Vec::new();
        let mut reasons = Vec::new();

        for method in self.methods.iter().filter(|m| m.applies_to(company)) {
            match method.evaluate(&ctx) {
                Ok(result) => results.push(result),
                Err(d) => {
                    debug!(method = %d.method, reason = %d.reason, "method declined");
                    reasons.push(d.to_string());
                    declined.push(d.method);
                }
            }
        }

        if results.is_empty() {
            if reasons.is_empty() {
                reasons.push(format!("no methods apply to {company}"));
            }
            return Err(ValuationError::InsufficientData { ticker: snapshot.ticker.clone(), reasons });
        }

        let raw: Vec<f64> = results
            .iter()
            .map(|r| {
                self.config.weights.weight(company, r.method)
                    * self.config.quality_weights.get(r.data_quality)
            })
            .collect();
        let weights = normalized_weights(&raw);
        let fair_value: f64 = results.iter().zip(&weights).map(|(r, w)| r.fair_value * w).sum();
        let primary_method = results[primary_index(&weights)].method;
        let confidence = confidence(&results);

        Ok(CompositeValuation {
            ticker: snapshot.ticker.clone(),
            company_type: company,
            methodology: Methodology::ZeroFcfMultiMethod,
            fair_value,
            current_price: snapshot.current_price,
            upside_pct: upside_pct(fair_value, snapshot.current_price),
            confidence,
            primary_method,
            weights: results.iter().map(|r| r.method).zip(weights).collect(),
            methods: results.into_iter().map(|r| (r.method, r)).collect(),
            declined_methods: declined,
            scenarios: Scenarios::scaled(fair_value, self.config.scenarios.as_array()),
        })
    }

    /// Simulate the DCF fair value distribution.
    ///
    /// # Errors
    /// * `DcfNotApplicable` without positive free cash flow
    /// * `InvalidInput` for bad inputs, out-of-range means, or a trial count
    ///   outside the configured bounds
    /// * `InvalidAssumption` if the mean terminal growth is not below the
    ///   mean discount rate
    /// * `SimulationExhausted` if every draw was invalid
    pub fn run_monte_carlo(
        &self,
        snapshot: &FinancialSnapshot,
        mean_assumptions: &ValuationAssumptions,
        std_devs: &AssumptionStdDevs,
        trials: usize,
        seed: u64,
    ) -> Result<MonteCarloResult, ValuationError> {
        let _span = info_span!("monte_carlo", ticker = %snapshot.ticker, trials, seed).entered();

        check_snapshot(snapshot)?;
        check_assumptions(mean_assumptions)?;
        let fcf = positive_fcf(snapshot)?;
        let balance_sheet = BalanceSheet::from_snapshot(snapshot)?;

        let result =
            self.simulator.run(fcf, &balance_sheet, mean_assumptions, std_devs, trials, seed)?;
        info!(
            mean = result.mean,
            median = result.median,
            enterprise_value_mean = result.enterprise_value_mean,
            valid = result.valid_trials,
            discarded = result.discarded_trials,
            "simulation complete"
        );
        Ok(result)
    }

    /// Sweep one or two assumptions around `base`.
    ///
    /// # Errors
    /// * `DcfNotApplicable` without positive free cash flow
    /// * `InvalidInput` for bad inputs, an out-of-range base, or a malformed sweep
    /// * `InvalidAssumption` if the base itself violates the terminal growth
    ///   invariant
    pub fn run_sensitivity(
        &self,
        snapshot: &FinancialSnapshot,
        base: &ValuationAssumptions,
        sweep: Sweep,
    ) -> Result<SensitivityGrid, ValuationError> {
        let _span = info_span!("sensitivity", ticker = %snapshot.ticker).entered();

        check_snapshot(snapshot)?;
        check_assumptions(base)?;
        let fcf = positive_fcf(snapshot)?;
        let balance_sheet = BalanceSheet::from_snapshot(snapshot)?;

        let grid = self.sensitivity.run(fcf, &balance_sheet, base, sweep)?;
        debug!(points = grid.len(), undefined = grid.undefined_count(), "sweep complete");
        Ok(grid)
    }
}
