//! High-level entry point for maximizing a user-provided `LogLikelihood`.
//!
//! Dispatches on [`Solver`]: Newton-Raphson runs the crate's own damped
//! Newton loop; L-BFGS wraps the model in an `ArgMinAdapter` (which
//! *minimizes* `-ℓ(θ)`), builds the solver for the chosen line search and
//! delegates to `run_lbfgs`.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        newton::run_newton,
        run::run_lbfgs,
        traits::{LineSearcher, LogLikelihood, MLEOptions, Solver},
    },
};

/// Maximize a log-likelihood `ℓ(θ)`.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - `Solver::NewtonRaphson`: requires `f.evaluate` (gradient and negative
///   Hessian); stops gracefully on singular information.
/// - `Solver::Lbfgs`: L-BFGS with **Hager–Zhang** or **More–Thuente** line
///   search; requires `f.grad`.
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Missing analytic derivatives for Newton-Raphson.
/// - Builder and runtime errors of the L-BFGS path.
///
/// # Example
/// ```
/// use ndarray::{array, Array1, Array2};
/// use rust_relational_events::optimization::errors::OptResult;
/// use rust_relational_events::optimization::loglik_optimizer::{
///     maximize, LogLikelihood, MLEOptions,
/// };
///
/// // ℓ(θ) = -θ·θ
/// struct Bowl;
/// impl LogLikelihood for Bowl {
///     type Data = ();
///     fn value(&self, theta: &Array1<f64>, _: &()) -> OptResult<f64> {
///         Ok(-theta.dot(theta))
///     }
///     fn check(&self, _: &Array1<f64>, _: &()) -> OptResult<()> {
///         Ok(())
///     }
///     fn grad(&self, theta: &Array1<f64>, _: &()) -> OptResult<Array1<f64>> {
///         Ok(theta * -2.0)
///     }
///     fn hessian(&self, theta: &Array1<f64>, _: &()) -> OptResult<Array2<f64>> {
///         Ok(Array2::eye(theta.len()) * 2.0)
///     }
/// }
///
/// let out = maximize(&Bowl, array![0.1, -0.2, 0.3], &(), &MLEOptions::default())?;
/// assert!(out.converged);
/// # Ok::<(), rust_relational_events::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    match opts.method {
        Solver::NewtonRaphson => run_newton(f, theta0, data, opts),
        Solver::Lbfgs { line_searcher, .. } => {
            let problem = ArgMinAdapter::new(f, data);
            match line_searcher {
                LineSearcher::MoreThuente => {
                    let solver = build_optimizer_more_thuente(opts)?;
                    run_lbfgs(theta0, opts, problem, solver)
                }
                LineSearcher::HagerZhang => {
                    let solver = build_optimizer_hager_zhang(opts)?;
                    run_lbfgs(theta0, opts, problem, solver)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::OptError,
        loglik_optimizer::{Cost, Grad, traits::Tolerances},
    };
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Both solver paths on a concave toy likelihood.
    // - Rejection by the `check` hook before any iteration.
    // -------------------------------------------------------------------------

    // ℓ(θ) = -(θ₀ - 3)² - 2(θ₁ + 1)²; gradient only (no Hessian).
    struct Toy {
        reject: bool,
    }

    impl LogLikelihood for Toy {
        type Data = ();

        fn value(&self, theta: &Theta, _: &()) -> OptResult<Cost> {
            Ok(-(theta[0] - 3.0).powi(2) - 2.0 * (theta[1] + 1.0).powi(2))
        }

        fn check(&self, theta: &Theta, _: &()) -> OptResult<()> {
            if self.reject {
                return Err(OptError::ThetaLengthMismatch { expected: 3, actual: theta.len() });
            }
            Ok(())
        }

        fn grad(&self, theta: &Theta, _: &()) -> OptResult<Grad> {
            Ok(array![-2.0 * (theta[0] - 3.0), -4.0 * (theta[1] + 1.0)])
        }
    }

    #[test]
    // Purpose
    // -------
    // L-BFGS reaches the maximum with either line search.
    //
    // Given
    // -----
    // - The toy likelihood from θ₀ = 0.
    //
    // Expect
    // ------
    // - θ̂ ≈ (3, -1), ℓ(θ̂) ≈ 0.
    fn lbfgs_path_maximizes() {
        let tols = Tolerances::new(Some(1e-8), None, Some(200)).unwrap();
        for ls in [LineSearcher::MoreThuente, LineSearcher::HagerZhang] {
            let opts = MLEOptions::new(tols, Solver::lbfgs(ls, None).unwrap()).unwrap();
            let out = maximize(&Toy { reject: false }, Theta::zeros(2), &(), &opts).unwrap();
            assert_abs_diff_eq!(out.theta_hat[0], 3.0, epsilon = 1e-4);
            assert_abs_diff_eq!(out.theta_hat[1], -1.0, epsilon = 1e-4);
            assert_abs_diff_eq!(out.value, 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    // Purpose
    // -------
    // Newton-Raphson requires a Hessian; `check` runs first.
    //
    // Given
    // -----
    // - The gradient-only toy with the default (Newton) options, and a
    //   rejecting toy.
    //
    // Expect
    // ------
    // - `HessianNotImplemented`, then the `check` error.
    fn newton_requires_hessian_and_check_runs_first() {
        let err = maximize(&Toy { reject: false }, Theta::zeros(2), &(), &MLEOptions::default())
            .unwrap_err();
        assert_eq!(err, OptError::HessianNotImplemented);

        let err = maximize(&Toy { reject: true }, Theta::zeros(2), &(), &MLEOptions::default())
            .unwrap_err();
        assert!(matches!(err, OptError::ThetaLengthMismatch { .. }));
    }
}
