//! Descriptive statistics over simulated samples.

use ndarray::Array1;

use crate::MathError;

fn check(data: &Array1<f64>) -> Result<(), MathError> {
    if data.is_empty() {
        return Err(MathError::EmptyData);
    }
    if data.iter().any(|x| !x.is_finite()) {
        return Err(MathError::NonFinite("sample"));
    }
    Ok(())
}

fn sorted(data: &Array1<f64>) -> Vec<f64> {
    let mut values = data.to_vec();
    values.sort_by(f64::total_cmp);
    values
}

/// Linear interpolation between order statistics of sorted values.
///
/// Matches the default ("linear") method of common numerical libraries:
/// rank `h = (n - 1) * q / 100`, interpolating between `floor(h)` and `ceil(h)`.
fn interpolate(sorted: &[f64], q: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * q / 100.0;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

/// Arithmetic mean.
///
/// # Errors
/// Returns `MathError::EmptyData` for an empty sample and
/// `MathError::NonFinite` if any value is NaN or infinite.
pub fn mean(data: &Array1<f64>) -> Result<f64, MathError> {
    check(data)?;
    Ok(data.sum() / data.len() as f64)
}

/// Population standard deviation (divides by `n`).
///
/// # Errors
/// See [`mean`].
pub fn population_std(data: &Array1<f64>) -> Result<f64, MathError> {
    check(data)?;
    Ok(data.std(0.0))
}

/// Median, interpolated for even-length samples.
///
/// # Errors
/// See [`mean`].
pub fn median(data: &Array1<f64>) -> Result<f64, MathError> {
    check(data)?;
    Ok(interpolate(&sorted(data), 50.0))
}

/// Percentiles at each level in `levels` (each in `[0, 100]`), sorting once.
///
/// # Errors
/// Returns `MathError::InvalidPercentile` for a level outside `[0, 100]`, and
/// the errors of [`mean`] for a bad sample.
pub fn percentiles(data: &Array1<f64>, levels: &[f64]) -> Result<Vec<f64>, MathError> {
    check(data)?;
    if let Some(&bad) = levels.iter().find(|q| !(0.0..=100.0).contains(*q)) {
        return Err(MathError::InvalidPercentile(bad));
    }
    let values = sorted(data);
    Ok(levels.iter().map(|&q| interpolate(&values, q)).collect())
}
