//! loglik_optimizer::types — shared numeric aliases and solver wiring.
//!
//! Canonical `ndarray` aliases for parameters, gradients, information
//! matrices and scalar objective values, the counter map reported in
//! `OptimOutcome::fn_evals`, and the argmin L-BFGS aliases for both line
//! searches. `Hessian` is used for the *negative* Hessian of `ℓ`
//! (observed information) by the Newton-Raphson path.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Parameter vector `θ`.
pub type Theta = Array1<f64>;

/// Gradient vector `∇ℓ(θ)` or `∇c(θ)`, same length as `Theta`.
pub type Grad = Array1<f64>;

/// Dense `n × n` second-order matrix, `n = Theta.len()`.
pub type Hessian = Array2<f64>;

/// Scalar objective value: `ℓ(θ)` at the model boundary, `c(θ) = -ℓ(θ)`
/// inside argmin.
pub type Cost = f64;

/// Function-evaluation counters keyed by name (e.g. `"cost_count"`).
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Hager–Zhang line search specialized to this crate’s numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente line search specialized to this crate’s numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
