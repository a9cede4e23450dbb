//! One- and two-way sensitivity sweeps over DCF assumptions.

use intrinsic_primitives::{Axis, SensitivityGrid, ValuationAssumptions};
use ndarray::{Array1, Array2};
use rayon::prelude::*;

use crate::{BalanceSheet, DcfModel, ValuationError};

/// Parameters to sweep.
#[derive(Debug, Clone, PartialEq)]
pub enum Sweep {
    /// Sweep one parameter.
    OneWay(Axis),
    /// Sweep two parameters over their cartesian product.
    TwoWay {
        /// Row axis.
        rows: Axis,
        /// Column axis.
        columns: Axis,
    },
}

impl Sweep {
    /// One-way sweep.
    #[must_use]
    pub const fn one_way(axis: Axis) -> Self {
        Self::OneWay(axis)
    }

    /// Two-way sweep, rows first.
    #[must_use]
    pub const fn two_way(rows: Axis, columns: Axis) -> Self {
        Self::TwoWay { rows, columns }
    }

    fn validate(&self) -> Result<(), ValuationError> {
        let axes: Vec<&Axis> = match self {
            Self::OneWay(axis) => vec![axis],
            Self::TwoWay { rows, columns } => {
                if rows.parameter == columns.parameter {
                    return Err(ValuationError::InvalidInput(format!(
                        "cannot sweep {} on both axes",
                        rows.parameter
                    )));
                }
                vec![rows, columns]
            }
        };
        for axis in axes {
            if axis.is_empty() {
                return Err(ValuationError::InvalidInput(format!(
                    "no values to sweep for {}",
                    axis.parameter
                )));
            }
            if axis.values.iter().any(|v| !v.is_finite()) {
                return Err(ValuationError::InvalidInput(format!(
                    "sweep values for {} must be finite",
                    axis.parameter
                )));
            }
            if axis.values.iter().enumerate().any(|(i, v)| axis.values[..i].contains(v)) {
                return Err(ValuationError::InvalidInput(format!(
                    "sweep values for {} must be distinct",
                    axis.parameter
                )));
            }
        }
        Ok(())
    }
}

/// Re-evaluates the DCF at every point of a sweep.
///
/// Points are independent and evaluated in parallel. A point where terminal
/// growth is not below the discount rate is reported as `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SensitivityAnalyzer {
    dcf: DcfModel,
}

impl SensitivityAnalyzer {
    /// Create a new analyzer.
    #[must_use]
    pub const fn new() -> Self {
        Self { dcf: DcfModel::new() }
    }

    fn point(
        &self,
        base_cash_flow: f64,
        assumptions: &ValuationAssumptions,
        balance_sheet: &BalanceSheet,
    ) -> Result<Option<f64>, ValuationError> {
        match self.dcf.value(base_cash_flow, assumptions, balance_sheet) {
            Ok(v) => Ok(Some(v.fair_value)),
            Err(e) if e.is_recoverable() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Run a sweep around `base`.
    ///
    /// # Errors
    /// * `InvalidInput` for an empty axis, a non-finite or repeated axis
    ///   value, or the same parameter on both axes
    /// * any non-recoverable DCF error
    pub fn run(
        &self,
        base_cash_flow: f64,
        balance_sheet: &BalanceSheet,
        base: &ValuationAssumptions,
        sweep: Sweep,
    ) -> Result<SensitivityGrid, ValuationError> {
        sweep.validate()?;

        match sweep {
            Sweep::OneWay(axis) => {
                let values = axis
                    .values
                    .par_iter()
                    .map(|&v| {
                        self.point(base_cash_flow, &base.with_parameter(axis.parameter, v), balance_sheet)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(SensitivityGrid::OneWay { axis, fair_values: Array1::from_vec(values) })
            }
            Sweep::TwoWay { rows, columns } => {
                let points: Vec<(f64, f64)> = rows
                    .values
                    .iter()
                    .flat_map(|&r| columns.values.iter().map(move |&c| (r, c)))
                    .collect();
                let values = points
                    .par_iter()
                    .map(|&(r, c)| {
                        let a = base
                            .with_parameter(rows.parameter, r)
                            .with_parameter(columns.parameter, c);
                        self.point(base_cash_flow, &a, balance_sheet)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let fair_values = Array2::from_shape_vec((rows.len(), columns.len()), values)
                    .map_err(|e| ValuationError::InvalidInput(e.to_string()))?;
                Ok(SensitivityGrid::TwoWay { rows, columns, fair_values })
            }
        }
    }
}
