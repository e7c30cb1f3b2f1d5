//! Public API surface for log-likelihood maximization.
//!
//! - [`LogLikelihood`]: trait users implement for their model.
//! - [`MLEOptions`] and [`Tolerances`]: configuration for the optimizer.
//! - [`Solver`]: Newton-Raphson or L-BFGS.
//! - [`LineSearcher`]: choice of line search used by L-BFGS.
//! - [`OptimOutcome`]: normalized result returned by the high-level `maximize` API.
//!
//! Convention: we *maximize* a user log-likelihood `ℓ(θ)` by minimizing the cost
//! `c(θ) = -ℓ(θ)`. If an analytic gradient is provided, it should be the gradient
//! of the log-likelihood (`∇ℓ(θ)`); the adapter flips the sign as needed. The
//! analytic Hessian is the *negative* Hessian of `ℓ` (observed information),
//! which is positive semi-definite for a concave log-likelihood.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, FnEvalMap, Grad, Theta,
        types::Hessian,
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// Default cost-change tolerance used by [`MLEOptions::default`].
pub const DEFAULT_TOL_COST: f64 = 1e-9;

/// Default iteration budget used by [`MLEOptions::default`].
pub const DEFAULT_MAX_ITER: usize = 100;

/// Default number of step halvings per Newton-Raphson iteration.
pub const DEFAULT_MAX_STEP_HALVINGS: usize = 10;

/// User-implemented log-likelihood interface.
///
/// You maximize `ℓ(θ)`; internally we minimize the cost `c(θ) = -ℓ(θ)`.
/// If you provide an analytic gradient, return the gradient of the
/// log-likelihood `∇ℓ(θ)` (the adapter flips the sign to match the cost).
///
/// - `type Data`: per-model data carried into `value`/`grad`/`check`.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `ℓ(θ)`.
///   - Errors: return a descriptive `OptError` for invalid inputs or model failures.
/// - `check(&Theta, &Data) -> OptResult<()>`: validation hook to reject
///   obviously invalid `θ`/`data` pairs. Called once before optimization.
///
/// Optional:
/// - `grad(&Theta, &Data) -> OptResult<Grad>`: analytic gradient `∇ℓ(θ)`.
///   Required by both solvers; the default returns
///   `OptError::GradientNotImplemented`.
/// - `hessian(&Theta, &Data) -> OptResult<Hessian>`: negative Hessian
///   `-∇²ℓ(θ)`. Required by [`Solver::NewtonRaphson`].
/// - `evaluate(&Theta, &Data) -> OptResult<Evaluation>`: value, gradient and
///   negative Hessian in one pass. The default calls the three methods
///   separately; models that share work between them should override it.
pub trait LogLikelihood {
    type Data: 'static;

    // Required methods
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }

    fn hessian(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Hessian> {
        Err(OptError::HessianNotImplemented)
    }

    fn evaluate(&self, theta: &Theta, data: &Self::Data) -> OptResult<Evaluation> {
        Ok(Evaluation {
            value: self.value(theta, data)?,
            grad: self.grad(theta, data)?,
            information: self.hessian(theta, data)?,
        })
    }
}

/// Log-likelihood, gradient and observed information at one `θ`.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub value: Cost,
    pub grad: Grad,
    /// Negative Hessian `-∇²ℓ(θ)`.
    pub information: Hessian,
}

/// Choice of line search used inside the L-BFGS solver.
///
/// Variants:
/// - `MoreThuente`: More–Thuente line search.
/// - `HagerZhang`: Hager–Zhang line search.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"MoreThuente"`, `"HagerZhang"`). Unknown names return
/// `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Optimization method.
///
/// - `NewtonRaphson`: full Newton steps from the analytic negative Hessian,
///   with step halving. Stops early on a singular Hessian.
/// - `Lbfgs`: argmin L-BFGS with the given line search and history size
///   (`None` uses [`DEFAULT_LBFGS_MEM`](crate::optimization::loglik_optimizer::DEFAULT_LBFGS_MEM)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Solver {
    #[default]
    NewtonRaphson,
    Lbfgs { line_searcher: LineSearcher, lbfgs_mem: Option<usize> },
}

impl Solver {
    /// L-BFGS with a validated history size.
    ///
    /// # Errors
    /// [`OptError::InvalidLBFGSMem`] if `lbfgs_mem == Some(0)`.
    pub fn lbfgs(line_searcher: LineSearcher, lbfgs_mem: Option<usize>) -> OptResult<Self> {
        let solver = Solver::Lbfgs { line_searcher, lbfgs_mem };
        solver.validate()?;
        Ok(solver)
    }

    fn validate(&self) -> OptResult<()> {
        if let Solver::Lbfgs { lbfgs_mem: Some(0), .. } = self {
            return Err(OptError::InvalidLBFGSMem {
                mem: 0,
                reason: "L-BFGS memory must be greater than zero.",
            });
        }
        Ok(())
    }
}

impl FromStr for Solver {
    type Err = OptError;

    /// Accepts `"newton"`, `"newton-raphson"`, `"newtonraphson"` and
    /// `"lbfgs"`, `"l-bfgs"` (case-insensitive). L-BFGS parses with the
    /// More–Thuente line search and the default memory.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newton" | "newton-raphson" | "newtonraphson" => Ok(Solver::NewtonRaphson),
            "lbfgs" | "l-bfgs" => {
                Ok(Solver::Lbfgs { line_searcher: LineSearcher::MoreThuente, lbfgs_mem: None })
            }
            _ => Err(OptError::InvalidSolver {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'Newton-Raphson' or 'LBFGS'.",
            }),
        }
    }
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `tols: Tolerances` — numerical tolerances and iteration limits.
/// - `method: Solver` — Newton-Raphson or L-BFGS.
/// - `max_step_halvings: usize` — Newton-Raphson only: how often a step that
///   lowers `ℓ` is halved before it is accepted anyway.
/// - `parallel: bool` — hint for likelihoods that can evaluate in parallel.
///
/// Default:
/// - `tols`: `tol_grad = None`, `tol_cost = 1e-9`, `max_iter = 100`
/// - `method`: `NewtonRaphson`
/// - `max_step_halvings`: `10`
/// - `parallel`: `false`
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub method: Solver,
    pub max_step_halvings: usize,
    pub parallel: bool,
}

impl MLEOptions {
    /// Create a new set of optimizer options.
    ///
    /// Numeric tolerances are validated by [`Tolerances::new`]; this checks
    /// the solver configuration.
    pub fn new(tols: Tolerances, method: Solver) -> OptResult<Self> {
        method.validate()?;
        Ok(Self { tols, method, max_step_halvings: DEFAULT_MAX_STEP_HALVINGS, parallel: false })
    }

    pub fn with_max_step_halvings(mut self, max_step_halvings: usize) -> Self {
        self.max_step_halvings = max_step_halvings;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances {
                tol_grad: None,
                tol_cost: Some(DEFAULT_TOL_COST),
                max_iter: Some(DEFAULT_MAX_ITER),
            },
            method: Solver::NewtonRaphson,
            max_step_halvings: DEFAULT_MAX_STEP_HALVINGS,
            parallel: false,
        }
    }
}

/// Numerical tolerances and iteration limits used by the optimizer.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Any field can be `None` but **at least one** of the three must be provided
/// (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - At least one of `tol_grad`, `tol_cost`, or `max_iter` must be `Some`.
    /// - If provided, tolerances must be **finite and strictly positive**.
    /// - If provided, `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for non-finite or non-positive tolerances.
    /// - `OptError::InvalidMaxIter` if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Canonical result returned by `maximize`.
///
/// - `theta_hat`: best parameter vector found.
/// - `value`: best **log-likelihood** value `ℓ(θ)` (not the cost).
/// - `converged`: `true` if a stopping tolerance was met; `false` when the
///   iteration budget ran out or Newton-Raphson met a singular Hessian.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters. Keys follow argmin's
///   counters, e.g. `cost_count`, `gradient_count`, `hessian_count`.
/// - `grad_norm`: norm of the last available gradient, if present.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// Build a validated [`OptimOutcome`] from argmin solver state.
    ///
    /// Performs:
    /// - `theta_hat` check via `validate_theta_hat` (present and all finite).
    /// - `value` check via `validate_value` (finite).
    /// - Maps `TerminationStatus` into `(converged, status)`; running out of
    ///   iterations does not count as converged.
    /// - Computes `grad_norm` if a gradient was provided.
    ///
    /// # Errors
    /// - Propagates any validation errors for `theta_hat` or `value`.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let (converged, status) = match termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(TerminationReason::MaxItersReached) => {
                (false, format!("{termination:?}"))
            }
            _ => (true, format!("{termination:?}")),
        };
        Self::from_parts(theta_hat_opt, value, converged, status, iterations as usize, fn_evals, grad)
    }

    /// Build a validated [`OptimOutcome`] from an explicit convergence flag.
    ///
    /// Used by solvers that do not run through argmin's executor.
    pub fn from_parts(
        theta_hat_opt: Option<Theta>, value: f64, converged: bool, status: String,
        iterations: usize, fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self { theta_hat, value, converged, status, iterations, fn_evals, grad_norm })
    }
}
