//! numerical_stability — stable softmax arithmetic and SPD linear algebra.
//!
//! Purpose
//! -------
//! Collect the numerical primitives the stratified likelihood and the
//! Newton-Raphson runner share: max-shifted `log Σ exp` and softmax,
//! and Cholesky-based solves/inverses guarded by an eigenvalue
//! conditioning check.
//!
//! Key behaviors
//! -------------
//! - [`log_sum_exp`] / [`softmax_in_place`] never overflow for finite
//!   predictors.
//! - [`is_ill_conditioned`] applies the singularity rule
//!   `λ_min ≤ EIGEN_EPS · max(1, λ_max)`.
//! - [`solve_spd`] / [`invert_spd`] return `None` for singular or
//!   indefinite matrices instead of producing garbage.
//!
//! Conventions
//! -----------
//! - Inputs are `ndarray` types; `nalgebra` is used internally for the
//!   factorizations and never leaks into signatures except
//!   [`fill_dmatrix`].
//! - Pure helpers: no logging, no global state.
//!
//! Downstream usage
//! ----------------
//! - `loglik_optimizer::newton` solves for Newton steps with [`solve_spd`].
//! - `inference::hessian` builds covariances with [`invert_spd`].
//! - `model::conditional_logit` evaluates strata with [`softmax_in_place`].

pub mod linalg;
pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::linalg::{eigen_range, fill_dmatrix, invert_spd, is_ill_conditioned, solve_spd};
pub use self::transformations::{EIGEN_EPS, GENERAL_TOL, log_sum_exp, softmax_in_place};

pub mod prelude {
    pub use super::linalg::{invert_spd, is_ill_conditioned, solve_spd};
    pub use super::transformations::{EIGEN_EPS, log_sum_exp, softmax_in_place};
}
