//! statistics::errors — configuration and evaluation errors for statistics.
//!
//! Purpose
//! -------
//! Provide [`StatError`] and [`StatResult`] for the statistic catalog.
//! Nearly every variant is a configuration error raised by a constructor or
//! a `FromStr` parser, before any state is read. The one run-time variant
//! wraps a [`StateError`] produced while normalizing elapsed time.
//!
//! Conventions
//! -----------
//! - Messages name the offending field and value so that a misconfigured
//!   statistic can be identified from the error text alone.
use crate::network::errors::StateError;

pub type StatResult<T> = Result<T, StatError>;

/// StatError — failures while configuring or computing a statistic.
///
/// Variants
/// --------
/// - `InvalidMode { field, value }`
///   An enumerated selector (direction, closure type, transform, ...) was
///   given a name outside its closed set.
/// - `InvalidParameter { name, value, reason }`
///   A numeric tuning parameter is out of range (e.g. `alpha <= 0`).
/// - `NonNumericAttribute { table, actor }`
///   A numeric attribute statistic was built on a table holding a
///   categorical value (`actor == None` for the default value).
/// - `State(StateError)`
///   The network state could not normalize elapsed time.
#[derive(Debug, Clone, PartialEq)]
pub enum StatError {
    // ---- Configuration ----
    InvalidMode { field: &'static str, value: String },
    InvalidParameter { name: &'static str, value: f64, reason: &'static str },
    NonNumericAttribute { table: String, actor: Option<u64> },

    // ---- Evaluation ----
    State(StateError),
}

impl std::error::Error for StatError {}

impl std::fmt::Display for StatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            StatError::InvalidMode { field, value } => {
                write!(f, "Unknown {field} '{value}'")
            }
            StatError::InvalidParameter { name, value, reason } => {
                write!(f, "Invalid parameter {name} = {value}: {reason}")
            }
            StatError::NonNumericAttribute { table, actor: Some(actor) } => {
                write!(f, "Attribute '{table}' holds a categorical value for actor {actor}")
            }
            StatError::NonNumericAttribute { table, actor: None } => {
                write!(f, "Attribute '{table}' has a categorical default value")
            }

            // ---- Evaluation ----
            StatError::State(err) => write!(f, "Network state error: {err}"),
        }
    }
}

impl From<StateError> for StatError {
    fn from(err: StateError) -> Self {
        StatError::State(err)
    }
}
