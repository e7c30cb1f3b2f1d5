//! model — stratified conditional-logit estimation of relational events.
//!
//! Purpose
//! -------
//! Turn a case-control sample into coefficient estimates: validate and
//! group the design by stratum, evaluate the partial likelihood with its
//! closed-form derivatives, maximize it, and attach standard errors,
//! z-scores and p-values.
//!
//! Key behaviors
//! -------------
//! - [`StratifiedDesign`] groups rows by stratum; caseless strata are
//!   skipped and counted, strata with several cases are rejected.
//! - [`ConditionalLogit`] implements the optimizer's `LogLikelihood` with
//!   an optional rayon map-reduce over strata.
//! - [`RemEstimator`] returns a [`FitResult`]; numerical degeneracy shows
//!   up as `converged = false` and NaN standard errors.
//!
//! Downstream usage
//! ----------------
//! - `RemEstimator::default().fit_sample(&sampled)` is the usual call after
//!   `CaseControlSampler::sample`.

pub mod conditional_logit;
pub mod design;
pub mod errors;
pub mod fit;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::conditional_logit::ConditionalLogit;
pub use self::design::{StratifiedDesign, Stratum};
pub use self::errors::{ModelError, ModelResult};
pub use self::fit::{FitResult, RemEstimator};

pub mod prelude {
    pub use super::design::StratifiedDesign;
    pub use super::errors::{ModelError, ModelResult};
    pub use super::fit::{FitResult, RemEstimator};
}
