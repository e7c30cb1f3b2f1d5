//! model::fit — relational-event model estimation and its result.
//!
//! Purpose
//! -------
//! Fit the stratified conditional-logit model to a case-control design and
//! report coefficients with their uncertainty.
//!
//! Key behaviors
//! -------------
//! - [`RemEstimator::fit`] maximizes the partial likelihood with
//!   `optimization::maximize` (Newton-Raphson by default), evaluates the
//!   observed information at the estimate, and derives standard errors,
//!   z-scores and two-sided p-values.
//! - Non-convergence is a flagged result, not an error: `converged`,
//!   `iterations` and `status` come straight from the optimizer, and a
//!   singular final information matrix yields NaN standard errors.
//! - [`RemEstimator::fit_sample`] fits a sampler output directly, using its
//!   statistic names as coefficient names.
//!
//! Conventions
//! -----------
//! - `n_events` counts the strata that entered the likelihood (one per case
//!   event); `n_observations` counts their rows.
//! - `null_log_likelihood` is `ℓ(0)`, the partial likelihood with every
//!   coefficient at zero.
use crate::inference::{standard_errors, two_sided_p_values, z_scores};
use crate::model::{
    conditional_logit::ConditionalLogit,
    design::StratifiedDesign,
    errors::{ModelError, ModelResult},
};
use crate::optimization::loglik_optimizer::{LogLikelihood, MLEOptions, Theta, maximize};
use crate::sampling::observation::SampledData;
use ndarray::Array1;
use tracing::debug;

/// FitResult — estimates and diagnostics of one fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    pub coefficients: Array1<f64>,
    pub standard_errors: Array1<f64>,
    pub z_scores: Array1<f64>,
    pub p_values: Array1<f64>,
    pub names: Vec<String>,
    pub n_events: usize,
    pub n_observations: usize,
    pub n_skipped_strata: usize,
    pub log_likelihood: f64,
    pub null_log_likelihood: f64,
    pub converged: bool,
    pub iterations: usize,
    pub status: String,
}

impl FitResult {
    /// Akaike information criterion `2k − 2ℓ(β̂)`.
    pub fn aic(&self) -> f64 {
        2.0 * self.coefficients.len() as f64 - 2.0 * self.log_likelihood
    }

    /// Likelihood-ratio statistic against the null model, `2(ℓ(β̂) − ℓ(0))`.
    pub fn likelihood_ratio(&self) -> f64 {
        2.0 * (self.log_likelihood - self.null_log_likelihood)
    }

    /// Coefficient by statistic name.
    pub fn coefficient(&self, name: &str) -> Option<f64> {
        self.names.iter().position(|n| n == name).map(|i| self.coefficients[i])
    }

    /// Standard error by statistic name.
    pub fn standard_error(&self, name: &str) -> Option<f64> {
        self.names.iter().position(|n| n == name).map(|i| self.standard_errors[i])
    }
}

/// RemEstimator — stratified maximum-likelihood estimator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RemEstimator {
    options: MLEOptions,
    initial: Option<Theta>,
}

impl RemEstimator {
    pub fn new(options: MLEOptions) -> Self {
        RemEstimator { options, initial: None }
    }

    /// Start the optimizer from `beta0` instead of zero.
    pub fn with_initial(mut self, beta0: Theta) -> Self {
        self.initial = Some(beta0);
        self
    }

    pub fn options(&self) -> &MLEOptions {
        &self.options
    }

    /// Fit a validated design.
    ///
    /// # Errors
    /// - [`ModelError::NameCountMismatch`] if `names` does not match the
    ///   design width.
    /// - [`ModelError::EmptyDesign`] if there are no columns or no strata.
    /// - [`ModelError::Opt`] for invalid starting points, options, or
    ///   derivative failures.
    pub fn fit(&self, design: &StratifiedDesign, names: &[String]) -> ModelResult<FitResult> {
        let p = design.n_features();
        if names.len() != p {
            return Err(ModelError::NameCountMismatch { expected: p, found: names.len() });
        }
        if p == 0 {
            return Err(ModelError::EmptyDesign { reason: "no statistics" });
        }
        if design.n_strata() == 0 {
            return Err(ModelError::EmptyDesign { reason: "no stratum has a case row" });
        }

        let model = ConditionalLogit::new(self.options.parallel);
        let beta0 = self.initial.clone().unwrap_or_else(|| Theta::zeros(p));
        let null_log_likelihood = model.value(&Theta::zeros(p), design)?;
        let outcome = maximize(&model, beta0, design, &self.options)?;

        let information = model.hessian(&outcome.theta_hat, design)?;
        let standard_errors = standard_errors(&information);
        let z_scores = z_scores(&outcome.theta_hat, &standard_errors);
        let p_values = two_sided_p_values(&z_scores);
        debug!(
            strata = design.n_strata(),
            skipped = design.n_skipped(),
            loglik = outcome.value,
            converged = outcome.converged,
            iterations = outcome.iterations,
            "conditional logit fitted"
        );

        Ok(FitResult {
            coefficients: outcome.theta_hat,
            standard_errors,
            z_scores,
            p_values,
            names: names.to_vec(),
            n_events: design.n_strata(),
            n_observations: design.n_observations(),
            n_skipped_strata: design.n_skipped(),
            log_likelihood: outcome.value,
            null_log_likelihood,
            converged: outcome.converged,
            iterations: outcome.iterations,
            status: outcome.status,
        })
    }

    /// Fit a sampler output.
    pub fn fit_sample(&self, data: &SampledData) -> ModelResult<FitResult> {
        let design = StratifiedDesign::from_sample(data)?;
        self.fit(&design, &data.statistic_names)
    }
}
