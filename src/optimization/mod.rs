//! optimization — MLE stack, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! Provide the generic maximum-likelihood layer the stratified estimator is
//! built on: a log-likelihood trait with a damped Newton-Raphson solver and
//! an argmin-backed L-BFGS alternative, the stable softmax and SPD
//! linear-algebra primitives both rely on, and a single error/result
//! surface.
//!
//! Key behaviors
//! -------------
//! - Maximize log-likelihoods `ℓ(θ)` (`loglik_optimizer`), including solver
//!   choice, tolerances and step halving.
//! - Share numerical primitives (`numerical_stability`): max-shifted
//!   `log Σ exp`, softmax, eigenvalue conditioning checks and Cholesky
//!   solves/inverses.
//! - Normalize configuration issues, invalid derivatives and backend
//!   solver errors into `errors::OptError` / `OptResult<T>`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Optimizers operate in an unconstrained parameter space `θ`.
//! - A singular information matrix is a result state (`converged = false`),
//!   not an error.
//!
//! Conventions
//! -----------
//! - All solvers maximize `ℓ(θ)`; argmin internally minimizes `-ℓ(θ)`.
//! - Parameters, gradients, and information matrices use the `ndarray`
//!   aliases `Theta`, `Grad`, `Hessian`.
//! - Progress is reported through `tracing` events; no subscriber is
//!   installed here.
//!
//! Downstream usage
//! ----------------
//! - `model::ConditionalLogit` implements `LogLikelihood`; `RemEstimator`
//!   calls `maximize`.
//! - `inference` reuses `numerical_stability` for covariance estimates.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_relational_events::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
