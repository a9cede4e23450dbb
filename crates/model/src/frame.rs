//! Tabular export of sensitivity grids.

use intrinsic_primitives::SensitivityGrid;
use polars::prelude::*;

use crate::ValuationError;

/// Convert a sensitivity grid to a `DataFrame`.
///
/// A one-way grid yields two columns, the swept parameter and `fair_value`.
/// A two-way grid yields one row per row-axis value: the first column holds
/// the row values and each further column is named `<parameter>=<value>`
/// after a column-axis value, written at full precision so distinct values
/// never share a name. Undefined points are null.
///
/// # Errors
/// Returns a polars error if the frame cannot be assembled.
pub fn sensitivity_frame(grid: &SensitivityGrid) -> Result<DataFrame, ValuationError> {
    let df = match grid {
        SensitivityGrid::OneWay { axis, fair_values } => DataFrame::new(vec![
            Column::new(axis.parameter.to_string().into(), axis.values.clone()),
            Column::new("fair_value".into(), fair_values.to_vec()),
        ])?,
        SensitivityGrid::TwoWay { rows, columns, fair_values } => {
            let mut cols = Vec::with_capacity(columns.len() + 1);
            cols.push(Column::new(rows.parameter.to_string().into(), rows.values.clone()));
            for (j, value) in columns.values.iter().enumerate() {
                let name = format!("{}={value}", columns.parameter);
                cols.push(Column::new(name.into(), fair_values.column(j).to_vec()));
            }
            DataFrame::new(cols)?
        }
    };
    Ok(df)
}
