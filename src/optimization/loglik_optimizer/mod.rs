//! loglik_optimizer — Newton-Raphson and argmin L-BFGS log-likelihood maximizer.
//!
//! Purpose
//! -------
//! Maximize log-likelihoods `ℓ(θ)` behind one trait and one entry point.
//! Callers implement [`LogLikelihood`] and call [`maximize`] with a
//! starting point, a data payload and [`MLEOptions`].
//!
//! Key behaviors
//! -------------
//! - [`Solver::NewtonRaphson`] (default) uses the model's analytic gradient
//!   and negative Hessian with step halving ([`newton`]); singular
//!   information stops the run with `converged = false`.
//! - [`Solver::Lbfgs`] converts `ℓ` into an argmin cost `c(θ) = -ℓ(θ)` via
//!   [`adapter::ArgMinAdapter`], builds the solver in [`builders`] and runs
//!   it with [`run::run_lbfgs`]; the model must supply an analytic gradient.
//! - Configuration ([`Tolerances`], [`MLEOptions`]) is validated on
//!   construction ([`validation`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - User code implements `ℓ`, `∇ℓ` and `-∇²ℓ`, never the cost.
//! - Invalid inputs are reported as [`OptError`](crate::optimization::errors::OptError),
//!   never as panics.
//! - Every [`OptimOutcome`] has a finite `theta_hat` and `value`.
//!
//! Conventions
//! -----------
//! - [`OptimOutcome::value`] is always `ℓ(θ̂)`, not the cost.
//! - Newton-Raphson and L-BFGS report the same counter names in
//!   `fn_evals`.
//!
//! Testing notes
//! -------------
//! - Unit tests in each submodule: sign conventions ([`adapter`]), solver
//!   wiring ([`builders`]), Newton convergence/halving/singularity
//!   ([`newton`]), option and outcome invariants ([`traits`]), and both
//!   dispatch paths ([`api`]).
//! - The stratified conditional-logit model exercises the full stack in
//!   `model` and in the integration tests.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod newton;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{
    DEFAULT_MAX_ITER, DEFAULT_MAX_STEP_HALVINGS, DEFAULT_TOL_COST, Evaluation, LineSearcher,
    LogLikelihood, MLEOptions, OptimOutcome, Solver, Tolerances,
};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Hessian, Theta};

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{
        Evaluation, LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Solver, Tolerances,
    };
    pub use super::types::{Cost, Grad, Hessian, Theta};
}
