//! Validation helpers for log-likelihood optimization.
//!
//! - **Tolerances**: [`verify_tol_grad`], [`verify_tol_cost`].
//! - **Inputs**: [`validate_theta0`] for starting points.
//! - **Derivatives**: [`validate_grad`], [`validate_hessian`].
//! - **Outputs**: [`validate_theta_hat`], [`validate_value`].
//!
//! Each helper reports the first offending element through a dedicated
//! [`OptError`] variant.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{Grad, Theta, types::Hessian},
};

/// `None`, or a finite and strictly positive gradient tolerance.
///
/// # Errors
/// [`OptError::InvalidTolGrad`].
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// `None`, or a finite and strictly positive cost-change tolerance.
///
/// # Errors
/// [`OptError::InvalidTolCost`].
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Starting point of length `dim` with finite entries.
///
/// # Errors
/// [`OptError::ThetaLengthMismatch`], [`OptError::InvalidThetaInput`].
pub fn validate_theta0(theta: &Theta, dim: usize) -> OptResult<()> {
    if theta.len() != dim {
        return Err(OptError::ThetaLengthMismatch { expected: dim, actual: theta.len() });
    }
    if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(OptError::InvalidThetaInput { index, value });
    }
    Ok(())
}

/// Gradient of length `dim` with finite entries.
///
/// # Errors
/// [`OptError::GradientDimMismatch`], [`OptError::InvalidGradient`].
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Unwrap an estimate that must be present and finite.
///
/// # Errors
/// [`OptError::MissingThetaHat`], [`OptError::InvalidThetaHat`].
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    match theta_hat {
        Some(t) => {
            for (index, &value) in t.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::InvalidThetaHat {
                        index,
                        value,
                        reason: "Parameter estimates must be finite.",
                    });
                }
            }
            Ok(t)
        }
        None => Err(OptError::MissingThetaHat),
    }
}

/// A finite log-likelihood value (negative values are fine).
///
/// # Errors
/// [`OptError::NonFiniteCost`].
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

/// A `dim × dim` matrix with finite entries.
///
/// # Errors
/// [`OptError::HessianDimMismatch`], [`OptError::InvalidHessian`] with the
/// offending row and column.
pub fn validate_hessian(hessian: &Hessian, dim: usize) -> OptResult<()> {
    if hessian.nrows() != dim || hessian.ncols() != dim {
        return Err(OptError::HessianDimMismatch {
            expected: dim,
            found: (hessian.nrows(), hessian.ncols()),
        });
    }
    for ((i, j), &value) in hessian.indexed_iter() {
        if !value.is_finite() {
            return Err(OptError::InvalidHessian { row: i, col: j, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - First-offender reporting of each helper.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Shape and finiteness checks name the offending element.
    //
    // Given
    // -----
    // - Short/NaN starting points, gradients, and Hessians.
    //
    // Expect
    // ------
    // - The matching variant with index / position.
    fn first_offender_is_reported() {
        assert_eq!(
            validate_theta0(&array![1.0], 2),
            Err(OptError::ThetaLengthMismatch { expected: 2, actual: 1 })
        );
        assert!(matches!(
            validate_theta0(&array![0.0, f64::INFINITY], 2),
            Err(OptError::InvalidThetaInput { index: 1, .. })
        ));
        assert_eq!(
            validate_grad(&array![1.0, 2.0, 3.0], 2),
            Err(OptError::GradientDimMismatch { expected: 2, found: 3 })
        );
        assert!(matches!(
            validate_grad(&array![f64::NAN, 0.0], 2),
            Err(OptError::InvalidGradient { index: 0, .. })
        ));

        let mut h = Array2::eye(2);
        assert!(validate_hessian(&h, 2).is_ok());
        assert!(matches!(validate_hessian(&h, 3), Err(OptError::HessianDimMismatch { .. })));
        h[[1, 0]] = f64::NAN;
        assert!(matches!(
            validate_hessian(&h, 2),
            Err(OptError::InvalidHessian { row: 1, col: 0, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Tolerance checks accept `None` and reject non-positive values.
    //
    // Given
    // -----
    // - `None`, 0, +∞.
    //
    // Expect
    // ------
    // - `Ok`, then errors.
    fn tolerance_checks() {
        assert!(verify_tol_grad(None).is_ok());
        assert!(verify_tol_grad(Some(0.0)).is_err());
        assert!(verify_tol_cost(Some(f64::INFINITY)).is_err());
        assert!(validate_value(-12.5).is_ok());
    }
}
