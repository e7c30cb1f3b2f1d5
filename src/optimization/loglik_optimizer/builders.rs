//! loglik_optimizer::builders — L-BFGS solver construction helpers.
//!
//! Purpose
//! -------
//! Hide argmin's generic wiring behind two builders, one per line search,
//! that apply the crate-level tolerances and history size from
//! [`MLEOptions`].
//!
//! Conventions
//! -----------
//! - Builders never set `theta0` or `max_iters`; [`run_lbfgs`] applies those.
//! - The history size is read from `Solver::Lbfgs { lbfgs_mem, .. }` and
//!   falls back to [`DEFAULT_LBFGS_MEM`] (also when the options name
//!   Newton-Raphson).
//! - Argmin's tolerance errors surface as [`OptError`](crate::optimization::errors::OptError)
//!   through `From<argmin::core::Error>`.
//!
//! [`run_lbfgs`]: crate::optimization::loglik_optimizer::run::run_lbfgs
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::{MLEOptions, Solver},
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};

/// L-BFGS with Hager–Zhang line search.
///
/// # Errors
/// Argmin rejecting a tolerance.
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let lbfgs = LbfgsHagerZhang::new(HagerZhangLS::new(), lbfgs_memory(opts));
    configure_lbfgs(lbfgs, opts)
}

/// L-BFGS with More–Thuente line search.
///
/// # Errors
/// Argmin rejecting a tolerance.
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let lbfgs = LbfgsMoreThuente::new(MoreThuenteLS::new(), lbfgs_memory(opts));
    configure_lbfgs(lbfgs, opts)
}

/// Apply the optional gradient and cost-change tolerances.
///
/// A `None` tolerance leaves argmin's default in place.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

fn lbfgs_memory(opts: &MLEOptions) -> usize {
    match opts.method {
        Solver::Lbfgs { lbfgs_mem: Some(mem), .. } => mem,
        _ => DEFAULT_LBFGS_MEM,
    }
}
