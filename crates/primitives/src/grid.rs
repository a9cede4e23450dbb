//! Sensitivity response surfaces.

use ndarray::{Array1, Array2};

use crate::SweepParameter;

/// One swept parameter and the values it takes.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    /// Parameter being swept.
    pub parameter: SweepParameter,
    /// Values in sweep order.
    pub values: Vec<f64>,
}

impl Axis {
    /// Create a new axis.
    #[must_use]
    pub const fn new(parameter: SweepParameter, values: Vec<f64>) -> Self {
        Self { parameter, values }
    }

    /// Number of points on the axis.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the axis has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Fair value per share over a one- or two-parameter sweep.
///
/// `None` marks a point where the DCF is undefined (terminal growth at or
/// above the discount rate).
#[derive(Debug, Clone, PartialEq)]
pub enum SensitivityGrid {
    /// One parameter swept.
    OneWay {
        /// Swept axis.
        axis: Axis,
        /// Fair value at each axis value.
        fair_values: Array1<Option<f64>>,
    },
    /// Two parameters swept; rows index the first axis, columns the second.
    TwoWay {
        /// Row axis.
        rows: Axis,
        /// Column axis.
        columns: Axis,
        /// Fair value at each `(row, column)` pair.
        fair_values: Array2<Option<f64>>,
    },
}

impl SensitivityGrid {
    /// Fair value at an index of a one-way grid.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<f64> {
        match self {
            Self::OneWay { fair_values, .. } => fair_values.get(i).copied().flatten(),
            Self::TwoWay { .. } => None,
        }
    }

    /// Fair value at a `(row, column)` index of a two-way grid.
    #[must_use]
    pub fn get2(&self, row: usize, column: usize) -> Option<f64> {
        match self {
            Self::TwoWay { fair_values, .. } => fair_values.get((row, column)).copied().flatten(),
            Self::OneWay { .. } => None,
        }
    }

    /// Axes in row-then-column order.
    #[must_use]
    pub fn axes(&self) -> Vec<&Axis> {
        match self {
            Self::OneWay { axis, .. } => vec![axis],
            Self::TwoWay { rows, columns, .. } => vec![rows, columns],
        }
    }

    /// Total number of grid points.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::OneWay { fair_values, .. } => fair_values.len(),
            Self::TwoWay { fair_values, .. } => fair_values.len(),
        }
    }

    /// Whether the grid has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of undefined points.
    #[must_use]
    pub fn undefined_count(&self) -> usize {
        match self {
            Self::OneWay { fair_values, .. } => fair_values.iter().filter(|v| v.is_none()).count(),
            Self::TwoWay { fair_values, .. } => fair_values.iter().filter(|v| v.is_none()).count(),
        }
    }
}
