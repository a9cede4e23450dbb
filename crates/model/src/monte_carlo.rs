//! Monte Carlo simulation over DCF assumptions.

use intrinsic_math::{mean, median, percentiles, population_std};
use intrinsic_primitives::{
    AssumptionStdDevs, MonteCarloResult, Percentiles, ValuationAssumptions,
};
use ndarray::Array1;
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{BalanceSheet, DcfModel, SimulationConfig, ValuationError};

fn normal(name: &str, mean: f64, std_dev: f64) -> Result<Normal<f64>, ValuationError> {
    Normal::new(mean, std_dev)
        .map_err(|e| ValuationError::InvalidInput(format!("{name} distribution: {e}")))
}

/// Independent normal samplers for the three simulated assumptions.
#[derive(Debug, Clone, Copy)]
struct AssumptionSampler {
    base: ValuationAssumptions,
    growth: Normal<f64>,
    discount: Normal<f64>,
    terminal: Normal<f64>,
}

impl AssumptionSampler {
    fn new(
        mean: &ValuationAssumptions,
        std_devs: &AssumptionStdDevs,
    ) -> Result<Self, ValuationError> {
        Ok(Self {
            base: *mean,
            growth: normal("growth_rate", mean.growth_rate, std_devs.growth_rate)?,
            discount: normal("discount_rate", mean.discount_rate, std_devs.discount_rate)?,
            terminal: normal("terminal_growth", mean.terminal_growth, std_devs.terminal_growth)?,
        })
    }

    fn sample(&self, rng: &mut StdRng) -> ValuationAssumptions {
        ValuationAssumptions {
            growth_rate: self.growth.sample(rng),
            discount_rate: self.discount.sample(rng),
            terminal_growth: self.terminal.sample(rng),
            projection_years: self.base.projection_years,
        }
    }
}

/// Re-runs the DCF under sampled assumptions.
///
/// Samples are drawn sequentially from one seeded generator and evaluated in
/// parallel, so a given seed always yields the same result.
#[derive(Debug, Clone, Default)]
pub struct MonteCarloSimulator {
    config: SimulationConfig,
    dcf: DcfModel,
}

impl MonteCarloSimulator {
    /// Create a simulator with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::default())
    }

    /// Create a simulator with custom limits.
    #[must_use]
    pub const fn with_config(config: SimulationConfig) -> Self {
        Self { config, dcf: DcfModel::new() }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulate `trials` valid DCF fair values, with enterprise values
    /// summarised alongside.
    ///
    /// Draws whose terminal growth is not below the discount rate are
    /// discarded and counted. Drawing stops after `trials * attempt_factor`
    /// draws even if fewer valid trials were obtained.
    ///
    /// # Errors
    /// * `InvalidInput` for a trial count outside the configured bounds or a
    ///   bad standard deviation
    /// * `SimulationExhausted` if no draw was valid
    /// * any non-recoverable DCF error
    pub fn run(
        &self,
        base_cash_flow: f64,
        balance_sheet: &BalanceSheet,
        mean_assumptions: &ValuationAssumptions,
        std_devs: &AssumptionStdDevs,
        trials: usize,
        seed: u64,
    ) -> Result<MonteCarloResult, ValuationError> {
        let SimulationConfig { min_trials, max_trials, attempt_factor, discard_warn_ratio } =
            self.config;
        if !(min_trials..=max_trials).contains(&trials) {
            return Err(ValuationError::InvalidInput(format!(
                "trial count {trials} is outside [{min_trials}, {max_trials}]"
            )));
        }
        if let Some(field) = std_devs.first_invalid() {
            return Err(ValuationError::InvalidInput(format!(
                "standard deviation of {field} must be finite and non-negative"
            )));
        }

        let sampler = AssumptionSampler::new(mean_assumptions, std_devs)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let max_attempts = trials.saturating_mul(attempt_factor);

        let mut values = Vec::with_capacity(trials);
        let mut enterprise_values = Vec::with_capacity(trials);
        let mut attempts = 0;
        let mut discarded = 0;

        while values.len() < trials && attempts < max_attempts {
            let batch = (trials - values.len()).min(max_attempts - attempts);
            let samples: Vec<ValuationAssumptions> =
                (0..batch).map(|_| sampler.sample(&mut rng)).collect();
            attempts += batch;

            let outcomes: Vec<Result<(f64, f64), ValuationError>> = samples
                .par_iter()
                .map(|a| {
                    self.dcf
                        .value(base_cash_flow, a, balance_sheet)
                        .map(|v| (v.fair_value, v.enterprise_value))
                })
                .collect();

            for outcome in outcomes {
                match outcome {
                    Ok((fair_value, enterprise_value)) => {
                        values.push(fair_value);
                        enterprise_values.push(enterprise_value);
                    }
                    Err(e) if e.is_recoverable() => discarded += 1,
                    Err(e) => return Err(e),
                }
            }
            debug!(attempts, valid = values.len(), discarded, "monte carlo batch complete");
        }

        if values.is_empty() {
            return Err(ValuationError::SimulationExhausted { attempts, valid: 0 });
        }
        if values.len() < trials {
            warn!(
                requested = trials,
                valid = values.len(),
                attempts,
                "draw budget exhausted before reaching requested trials"
            );
        }

        let valid = values.len();
        let samples = Array1::from_vec(values);
        let enterprise_values = Array1::from_vec(enterprise_values);
        let levels = percentiles(&samples, &Percentiles::LEVELS)?;
        let [p5, p10, p25, p50, p75, p90, p95] = levels[..] else {
            return Err(ValuationError::InvalidInput(format!(
                "expected {} percentiles, got {}",
                Percentiles::LEVELS.len(),
                levels.len()
            )));
        };
        let pcts = Percentiles::from_levels([p5, p10, p25, p50, p75, p90, p95]);

        let result = MonteCarloResult {
            requested_trials: trials,
            valid_trials: valid,
            discarded_trials: discarded,
            seed,
            mean: mean(&samples)?,
            median: median(&samples)?,
            std_dev: population_std(&samples)?,
            min: samples.iter().copied().fold(f64::INFINITY, f64::min),
            max: samples.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            enterprise_value_mean: mean(&enterprise_values)?,
            enterprise_value_median: median(&enterprise_values)?,
            intervals: pcts.intervals(),
            percentiles: pcts,
        };

        if result.discard_rate() > discard_warn_ratio {
            warn!(
                discard_rate = result.discard_rate(),
                discarded,
                "high discard rate; terminal growth and discount rate distributions overlap"
            );
        }

        Ok(result)
    }
}
