//! loglik_optimizer::newton — damped Newton-Raphson for concave log-likelihoods.
//!
//! Purpose
//! -------
//! Maximize `ℓ(θ)` with full Newton steps `Δ = I(θ)⁻¹ ∇ℓ(θ)`, where `I` is
//! the observed information (negative Hessian) supplied by
//! [`LogLikelihood::evaluate`]. This is the default solver of the crate.
//!
//! Key behaviors
//! -------------
//! - Each iteration solves `I · Δ = ∇ℓ` by Cholesky after an eigenvalue
//!   conditioning check. A singular or ill-conditioned `I` stops the run
//!   immediately: the outcome carries the last accepted `θ`,
//!   `converged = false` and a status naming the iteration.
//! - A step that lowers `ℓ` or makes it non-finite is halved up to
//!   `opts.max_step_halvings` times. If no halved step improves `ℓ`, the
//!   run stops with `converged = false` at the last accepted `θ`.
//! - Convergence: `|Δℓ| < tol_cost` from the second iteration onward, or
//!   `‖∇ℓ‖ < tol_grad`. Exhausting `max_iter` stops with
//!   `converged = false`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Values, gradients and information matrices are validated after every
//!   evaluation; invalid shapes or entries are errors at the starting point
//!   and rejected steps afterwards.
//! - Iterations are strictly sequential; any parallelism lives inside the
//!   model's `evaluate`.
//!
//! Conventions
//! -----------
//! - `fn_evals` uses argmin's counter names (`cost_count`,
//!   `gradient_count`, `hessian_count`); one fused evaluation increments
//!   all three.
//! - `tracing::debug!` per iteration, `tracing::warn!` on singular
//!   information or budget exhaustion.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        FnEvalMap, Theta,
        traits::{DEFAULT_MAX_ITER, Evaluation, LogLikelihood, MLEOptions, OptimOutcome},
        validation::{validate_grad, validate_hessian, validate_value},
    },
    numerical_stability::linalg::solve_spd,
};
use argmin_math::ArgminL2Norm;
use tracing::{debug, warn};

/// Run Newton-Raphson from `theta0`.
///
/// # Errors
/// - [`OptError::HessianNotImplemented`] / [`OptError::GradientNotImplemented`]
///   if the model lacks analytic derivatives.
/// - Validation errors of the evaluation at `theta0`.
/// - Model errors other than non-finite results during step halving.
pub fn run_newton<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    let dim = theta0.len();
    let max_iter = opts.tols.max_iter.unwrap_or(DEFAULT_MAX_ITER);
    let mut n_evals: u64 = 1;
    let mut theta = theta0;
    let mut current = evaluate_checked(f, &theta, data, dim)?;

    let mut iterations = 0usize;
    let mut converged = false;
    let status: String;

    loop {
        if let Some(tol_grad) = opts.tols.tol_grad {
            if current.grad.l2_norm() < tol_grad {
                converged = true;
                status = "Gradient norm below tolerance".to_string();
                break;
            }
        }
        if iterations >= max_iter {
            warn!(max_iter, loglik = current.value, "Newton-Raphson iteration budget exhausted");
            status = "Maximum iterations reached".to_string();
            break;
        }

        let step = match solve_spd(&current.information, &current.grad) {
            Some(step) => step,
            None => {
                warn!(
                    iteration = iterations + 1,
                    loglik = current.value,
                    "singular or ill-conditioned Hessian, stopping Newton-Raphson"
                );
                status = format!("Singular Hessian at iteration {}", iterations + 1);
                break;
            }
        };
        iterations += 1;

        let mut scale = 1.0;
        let mut halvings = 0usize;
        let accepted = loop {
            let candidate_theta = &theta + &(&step * scale);
            n_evals += 1;
            let candidate = match evaluate_checked(f, &candidate_theta, data, dim) {
                Ok(eval) => Some(eval),
                Err(err) if is_non_finite(&err) => None,
                Err(err) => return Err(err),
            };
            if let Some(c) = candidate.filter(|c| c.value >= current.value) {
                break Some((candidate_theta, c));
            }
            if halvings >= opts.max_step_halvings {
                break None;
            }
            scale *= 0.5;
            halvings += 1;
        };

        let Some((next_theta, next)) = accepted else {
            warn!(iteration = iterations, halvings, "no improving Newton step after halving");
            status = format!("Step halving failed at iteration {iterations}");
            break;
        };
        let delta = next.value - current.value;
        debug!(
            iteration = iterations,
            loglik = next.value,
            delta = delta.abs(),
            halvings,
            "Newton-Raphson iteration"
        );
        theta = next_theta;
        current = next;

        if let Some(tol_cost) = opts.tols.tol_cost {
            if iterations >= 2 && delta.abs() < tol_cost {
                converged = true;
                status = "Log-likelihood change below tolerance".to_string();
                break;
            }
        }
    }

    let mut fn_evals = FnEvalMap::new();
    for key in ["cost_count", "gradient_count", "hessian_count"] {
        fn_evals.insert(key.to_string(), n_evals);
    }
    OptimOutcome::from_parts(
        Some(theta),
        current.value,
        converged,
        status,
        iterations,
        fn_evals,
        Some(current.grad),
    )
}

fn evaluate_checked<F: LogLikelihood>(
    f: &F, theta: &Theta, data: &F::Data, dim: usize,
) -> OptResult<Evaluation> {
    let eval = f.evaluate(theta, data)?;
    validate_value(eval.value)?;
    validate_grad(&eval.grad, dim)?;
    validate_hessian(&eval.information, dim)?;
    Ok(eval)
}

fn is_non_finite(err: &OptError) -> bool {
    matches!(
        err,
        OptError::NonFiniteCost { .. }
            | OptError::InvalidGradient { .. }
            | OptError::InvalidHessian { .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::{
        Cost, Grad,
        traits::{Solver, Tolerances},
        types::Hessian,
    };
    use approx::assert_abs_diff_eq;
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Convergence on a concave quadratic.
    // - Step halving on a likelihood where full Newton steps overshoot.
    // - Rejection of every halved step when curvature is understated.
    // - Early stop on singular information.
    // - Missing analytic Hessian and iteration-budget exhaustion.
    // -------------------------------------------------------------------------

    // ℓ(θ) = -½ (θ - c)ᵀ A (θ - c).
    struct Quadratic {
        a: Hessian,
    }

    impl LogLikelihood for Quadratic {
        type Data = Theta;

        fn value(&self, theta: &Theta, c: &Theta) -> OptResult<Cost> {
            let d = theta - c;
            Ok(-0.5 * d.dot(&self.a.dot(&d)))
        }

        fn check(&self, _theta: &Theta, _c: &Theta) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, theta: &Theta, c: &Theta) -> OptResult<Grad> {
            Ok(-self.a.dot(&(theta - c)))
        }

        fn hessian(&self, _theta: &Theta, _c: &Theta) -> OptResult<Hessian> {
            Ok(self.a.clone())
        }
    }

    // ℓ(θ) = -√(1 + θ²): concave, Newton overshoots for |θ| > 1.
    struct Hyperbolic;

    impl LogLikelihood for Hyperbolic {
        type Data = ();

        fn value(&self, theta: &Theta, _: &()) -> OptResult<Cost> {
            Ok(-(1.0 + theta[0] * theta[0]).sqrt())
        }

        fn check(&self, _theta: &Theta, _: &()) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, theta: &Theta, _: &()) -> OptResult<Grad> {
            let s = (1.0 + theta[0] * theta[0]).sqrt();
            Ok(array![-theta[0] / s])
        }

        fn hessian(&self, theta: &Theta, _: &()) -> OptResult<Hessian> {
            let s = (1.0 + theta[0] * theta[0]).sqrt();
            Ok(array![[1.0 / (s * s * s)]])
        }
    }

    // ℓ(θ) = -θ² with exact gradient but information 1e-6, so every
    // Newton step overshoots by orders of magnitude.
    struct Understated;

    impl LogLikelihood for Understated {
        type Data = ();

        fn value(&self, theta: &Theta, _: &()) -> OptResult<Cost> {
            Ok(-theta[0] * theta[0])
        }

        fn check(&self, _theta: &Theta, _: &()) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, theta: &Theta, _: &()) -> OptResult<Grad> {
            Ok(array![-2.0 * theta[0]])
        }

        fn hessian(&self, _theta: &Theta, _: &()) -> OptResult<Hessian> {
            Ok(array![[1e-6]])
        }
    }

    struct ValueOnly;

    impl LogLikelihood for ValueOnly {
        type Data = ();

        fn value(&self, theta: &Theta, _: &()) -> OptResult<Cost> {
            Ok(-theta.dot(theta))
        }

        fn check(&self, _theta: &Theta, _: &()) -> OptResult<()> {
            Ok(())
        }
    }

    #[test]
    // Purpose
    // -------
    // A quadratic is maximized in one Newton step and convergence is
    // declared on the second iteration.
    //
    // Given
    // -----
    // - A = [[2, 0.5], [0.5, 1]], c = (1, -2), θ₀ = 0.
    //
    // Expect
    // ------
    // - θ̂ = c, ℓ(θ̂) = 0, converged, 2 iterations, counters populated.
    fn quadratic_converges() {
        let model = Quadratic { a: array![[2.0, 0.5], [0.5, 1.0]] };
        let c = array![1.0, -2.0];
        let out = run_newton(&model, Theta::zeros(2), &c, &MLEOptions::default()).unwrap();

        assert!(out.converged, "status: {}", out.status);
        assert_eq!(out.iterations, 2);
        assert_abs_diff_eq!(out.theta_hat[0], 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(out.theta_hat[1], -2.0, epsilon = 1e-10);
        assert_abs_diff_eq!(out.value, 0.0, epsilon = 1e-12);
        assert!(out.fn_evals.get("hessian_count").is_some_and(|&n| n >= 3));
    }

    #[test]
    // Purpose
    // -------
    // Step halving rescues a Newton step that would lower ℓ.
    //
    // Given
    // -----
    // - ℓ(θ) = -√(1 + θ²) from θ₀ = 2 (the full step lands at θ = -8).
    //
    // Expect
    // ------
    // - Converges to θ̂ ≈ 0 with ℓ(θ̂) ≈ -1.
    fn step_halving_prevents_divergence() {
        let out = run_newton(&Hyperbolic, array![2.0], &(), &MLEOptions::default()).unwrap();
        assert!(out.converged, "status: {}", out.status);
        assert_abs_diff_eq!(out.theta_hat[0], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(out.value, -1.0, epsilon = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // When no halved step raises ℓ, the run keeps the last accepted θ
    // instead of taking a worsening step.
    //
    // Given
    // -----
    // - ℓ(θ) = -θ² with information 1e-6, θ₀ = 1, default 10 halvings
    //   (the smallest trial step still lands near θ = -1952).
    //
    // Expect
    // ------
    // - `converged = false`, θ̂ = 1, ℓ(θ̂) = -1, status naming iteration 1.
    fn exhausted_halving_keeps_previous_theta() {
        let out = run_newton(&Understated, array![1.0], &(), &MLEOptions::default()).unwrap();

        assert!(!out.converged);
        assert_eq!(out.theta_hat, array![1.0]);
        assert_eq!(out.value, -1.0);
        assert_eq!(out.iterations, 1);
        assert_eq!(out.status, "Step halving failed at iteration 1");
    }

    #[test]
    // Purpose
    // -------
    // Singular information halts the run gracefully.
    //
    // Given
    // -----
    // - A rank-one A.
    //
    // Expect
    // ------
    // - `Ok` outcome at θ₀, `converged = false`, status mentions the
    //   singular Hessian at iteration 1.
    fn singular_information_stops() {
        let model = Quadratic { a: Array2::from_elem((2, 2), 1.0) };
        let c = array![1.0, 1.0];
        let out = run_newton(&model, Theta::zeros(2), &c, &MLEOptions::default()).unwrap();

        assert!(!out.converged);
        assert_eq!(out.iterations, 0);
        assert_eq!(out.theta_hat, Theta::zeros(2));
        assert_eq!(out.status, "Singular Hessian at iteration 1");
    }

    #[test]
    // Purpose
    // -------
    // Missing derivatives and a tiny budget.
    //
    // Given
    // -----
    // - A value-only model; the hyperbolic model with `max_iter = 1`.
    //
    // Expect
    // ------
    // - `GradientNotImplemented` (the default `evaluate` asks for the
    //   gradient first); a non-converged outcome after one iteration.
    fn missing_derivatives_and_budget() {
        let err = run_newton(&ValueOnly, array![1.0], &(), &MLEOptions::default()).unwrap_err();
        assert_eq!(err, OptError::GradientNotImplemented);

        let tols = Tolerances::new(None, Some(1e-9), Some(1)).unwrap();
        let opts = MLEOptions::new(tols, Solver::NewtonRaphson).unwrap();
        let out = run_newton(&Hyperbolic, array![2.0], &(), &opts).unwrap();
        assert!(!out.converged);
        assert_eq!(out.iterations, 1);
        assert_eq!(out.status, "Maximum iterations reached");
    }
}
