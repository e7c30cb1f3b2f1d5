//! Errors for the network state engine.
//!
//! [`StateError`] groups the fatal conditions of replaying an event log:
//! time moving backward, invalid event weights, timestamps that do not normalize to seconds, and
//! invalid decay configuration.
use crate::events::errors::EventError;

/// Result alias for network-state operations.
pub type StateResult<T> = Result<T, StateError>;

#[derive(Debug, Clone, PartialEq)]
pub enum StateError {
    // ---- Replay ----
    /// `advance`/`record` was called with a time earlier than the current
    /// time of the state. Payloads are rendered with `Debug`.
    TimeRegression { current: String, requested: String },

    /// Elapsed time could not be normalized to seconds.
    Time(EventError),

    /// A recorded event carries a negative or non-finite weight.
    InvalidWeight { value: f64 },

    // ---- Configuration ----
    /// Decay rate must be finite and `>= 0` (or `> 0` where a half-life is
    /// derived from it).
    InvalidDecayRate { value: f64, reason: &'static str },

    /// Half-life must be finite and `> 0`.
    InvalidHalfLife { value: f64 },
}

impl std::error::Error for StateError {}

impl std::fmt::Display for StateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Replay ----
            StateError::TimeRegression { current, requested } => {
                write!(f, "Time moved backward: state is at {current}, requested {requested}")
            }
            StateError::Time(err) => write!(f, "Invalid event time: {err}"),
            StateError::InvalidWeight { value } => {
                write!(f, "Invalid event weight {value}: must be finite and >= 0")
            }

            // ---- Configuration ----
            StateError::InvalidDecayRate { value, reason } => {
                write!(f, "Invalid decay rate {value}: {reason}")
            }
            StateError::InvalidHalfLife { value } => {
                write!(f, "Invalid half-life {value}: must be finite and > 0")
            }
        }
    }
}

impl From<EventError> for StateError {
    fn from(err: EventError) -> Self {
        StateError::Time(err)
    }
}
