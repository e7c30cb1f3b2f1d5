//! Execution helper that runs an `argmin` solver on a log-likelihood problem and
//! returns a crate-friendly [`OptimOutcome`].
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, LogLikelihood, MLEOptions, OptimOutcome, Theta, adapter::ArgMinAdapter,
    },
};
use argmin::core::{Executor, State};
use tracing::debug;

/// Run an `argmin` optimization for a log-likelihood problem.
///
/// Shared by both line-search variants: sets `theta0` on the executor state,
/// applies `opts.tols.max_iter`, runs, and converts the final state into an
/// [`OptimOutcome`] (best parameter, `ℓ(θ̂) = -best cost`, termination,
/// counters, last gradient norm).
///
/// # Type Parameters
/// - `F`: the model implementing [`LogLikelihood`].
/// - `S`: any argmin solver over `ArgMinAdapter<'a, F>` with
///   `IterState<Theta, Grad, (), (), (), f64>`.
///
/// # Errors
/// - Argmin runtime errors (line-search failures, model errors raised through
///   the adapter) via `From<argmin::core::Error>`.
/// - Validation errors from [`OptimOutcome::new`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: argmin::core::Solver<
            ArgMinAdapter<'a, F>,
            argmin::core::IterState<Theta, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    debug!(n_params = theta0.len(), max_iter = ?opts.tols.max_iter, "starting L-BFGS");
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(theta0));
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    let outcome = OptimOutcome::new(
        result.take_best_param(),
        -result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )?;
    debug!(
        iterations = outcome.iterations,
        loglik = outcome.value,
        status = %outcome.status,
        "L-BFGS finished"
    );
    Ok(outcome)
}
