//! inference — standard errors, z-scores and p-values for fitted models.
//!
//! Purpose
//! -------
//! Post-estimation uncertainty for maximum-likelihood fits: invert the
//! observed information into a covariance, take standard errors, and form
//! Wald z-statistics with two-sided standard-normal p-values.
//!
//! Key behaviors
//! -------------
//! - [`standard_errors`] returns NaN for every coefficient when the
//!   information matrix is singular or ill-conditioned.
//! - [`z_scores`] and [`two_sided_p_values`] propagate NaN instead of
//!   failing.
//!
//! Conventions
//! -----------
//! - Information matrices are on the summed log-likelihood scale.
//! - All functions are infallible and pure.
//!
//! Downstream usage
//! ----------------
//! - `model::RemEstimator` calls these after `maximize` to fill `FitResult`.

pub mod hessian;
pub mod normal;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::hessian::{covariance, standard_errors};
pub use self::normal::{two_sided_p_values, z_scores};

pub mod prelude {
    pub use super::hessian::standard_errors;
    pub use super::normal::{two_sided_p_values, z_scores};
}
