//! model::errors — failures of the stratified estimator.
//!
//! Data problems in the design (shape mismatches, non-finite features,
//! more than one case in a stratum, nothing left to fit) are reported
//! before optimization starts. Optimizer failures are wrapped from
//! [`OptError`]. Non-convergence and a singular Hessian are not errors:
//! they are flagged on the `FitResult`.
use crate::optimization::errors::OptError;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    // ---- Design ----
    /// Rows of `x`, labels and stratum ids must have equal length.
    ShapeMismatch { rows: usize, labels: usize, strata: usize },
    /// Feature values need to be finite.
    NonFiniteFeature { row: usize, col: usize, value: f64 },
    /// A stratum holds more than one case row.
    MultipleCases { stratum: usize, count: usize },
    /// The design has no columns or no stratum with a case.
    EmptyDesign { reason: &'static str },
    /// One name per column is required.
    NameCountMismatch { expected: usize, found: usize },

    // ---- Propagated ----
    Opt(OptError),
}

impl std::error::Error for ModelError {}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Design ----
            ModelError::ShapeMismatch { rows, labels, strata } => write!(
                f,
                "Design shape mismatch: {rows} rows, {labels} labels, {strata} stratum ids"
            ),
            ModelError::NonFiniteFeature { row, col, value } => {
                write!(f, "Non-finite feature at ({row}, {col}): {value}")
            }
            ModelError::MultipleCases { stratum, count } => {
                write!(f, "Stratum {stratum} has {count} case rows, expected exactly one")
            }
            ModelError::EmptyDesign { reason } => write!(f, "Empty design: {reason}"),
            ModelError::NameCountMismatch { expected, found } => {
                write!(f, "Expected {expected} coefficient names, found {found}")
            }

            // ---- Propagated ----
            ModelError::Opt(err) => write!(f, "{err}"),
        }
    }
}

impl From<OptError> for ModelError {
    fn from(err: OptError) -> Self {
        ModelError::Opt(err)
    }
}
