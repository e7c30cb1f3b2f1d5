//! Numerical stability utilities for softmax-type likelihoods.
//!
//! Provides max-shifted evaluations of `log Σ exp(x)` and the softmax so
//! that linear predictors of any magnitude stay in a well-conditioned
//! `f64` regime.
//!
//! # Provided items
//! - [`EIGEN_EPS`]: eigenvalue floor below which an information matrix is
//!   treated as singular.
//! - [`GENERAL_TOL`]: generic small positive threshold.
//! - [`log_sum_exp`]: `ln Σ exp(x_i)` with the maximum factored out.
//! - [`softmax_in_place`]: overwrite `x` with its softmax and return the
//!   log-normalizer.
use ndarray::{ArrayView1, ArrayViewMut1};

/// Relative eigenvalue floor for singularity checks.
///
/// An information matrix whose smallest eigenvalue is at most
/// `EIGEN_EPS · max(1, largest eigenvalue)` is treated as singular.
pub const EIGEN_EPS: f64 = 1e-10;

/// Generic small positive threshold for denominators and comparisons.
pub const GENERAL_TOL: f64 = 1e-12;

/// `ln Σ exp(x_i)` evaluated as `m + ln Σ exp(x_i − m)` with `m = max x_i`.
///
/// Returns `-∞` for an empty input and propagates `NaN`. An input holding
/// `+∞` returns `+∞`.
pub fn log_sum_exp(values: ArrayView1<f64>) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if values.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    if !max.is_finite() {
        return max;
    }
    let sum: f64 = values.iter().map(|&v| (v - max).exp()).sum();
    max + sum.ln()
}

/// Replace `values` by `softmax(values)` and return `ln Σ exp(values)`.
///
/// The maximum is subtracted before exponentiating; the largest entry maps
/// to `exp(0) = 1` before normalization, so the sum is at least 1 and the
/// division is always safe for finite inputs.
pub fn softmax_in_place(mut values: ArrayViewMut1<f64>) -> f64 {
    let log_norm = log_sum_exp(values.view());
    if !log_norm.is_finite() {
        return log_norm;
    }
    values.mapv_inplace(|v| (v - log_norm).exp());
    log_norm
}
