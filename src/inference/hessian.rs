//! inference::hessian — covariance and standard errors from observed information.
//!
//! Purpose
//! -------
//! Turn the observed information `I(β̂)` (negative Hessian of the summed
//! log-likelihood at the estimate) into the covariance `I⁻¹` and the
//! standard errors `√diag(I⁻¹)`.
//!
//! Key behaviors
//! -------------
//! - The information matrix is checked with the shared conditioning rule
//!   (`λ_min ≤ EIGEN_EPS · max(1, λ_max)`) and factorized by Cholesky.
//! - A singular, indefinite or non-finite information matrix yields no
//!   covariance and an all-NaN standard-error vector; nothing here returns
//!   an error.
//!
//! Conventions
//! -----------
//! - Information is on the **summed** log-likelihood scale, so the
//!   resulting variances are those of the estimates themselves.
//! - Negative diagonal entries of a computed inverse cannot occur for an
//!   SPD matrix; they would be reported as NaN all the same.
use crate::optimization::numerical_stability::linalg::invert_spd;
use ndarray::{Array1, Array2};

/// Covariance `I⁻¹` of the estimates, or `None` if `info` is singular.
pub fn covariance(info: &Array2<f64>) -> Option<Array2<f64>> {
    invert_spd(info)
}

/// Standard errors `√diag(I⁻¹)`.
///
/// Returns a vector of `NaN` (length `info.nrows()`) when the information
/// matrix is singular or ill-conditioned.
pub fn standard_errors(info: &Array2<f64>) -> Array1<f64> {
    match covariance(info) {
        Some(cov) => cov.diag().mapv(|v| if v >= 0.0 { v.sqrt() } else { f64::NAN }),
        None => Array1::from_elem(info.nrows(), f64::NAN),
    }
}
