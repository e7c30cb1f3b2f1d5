//! sampling::errors — failures of case-control sampling.
//!
//! Configuration problems are reported before any event is processed.
//! Replay and statistic failures are wrapped from the lower layers. Running
//! out of control candidates is not an error: it is recorded per stratum in
//! [`StratumSummary`](crate::sampling::observation::StratumSummary).
use crate::network::errors::StateError;
use crate::statistics::errors::StatError;

pub type SamplingResult<T> = Result<T, SamplingError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SamplingError {
    // ---- Configuration ----
    /// The number of controls per case must be `> 0`.
    InvalidControlCount { value: usize },
    /// `start` must not exceed `end`.
    InvalidRange { start: usize, end: usize },
    /// Decay rate must be finite and `>= 0`.
    InvalidDecayRate { value: f64 },
    /// Rejection budget multiplier must be `> 0`.
    InvalidAttemptFactor { value: usize },
    /// At least one statistic is required.
    EmptyStatistics,
    /// The actor universe is empty.
    EmptyRiskSet,

    // ---- Propagated ----
    State(StateError),
    Stat(StatError),
}

impl std::error::Error for SamplingError {}

impl std::fmt::Display for SamplingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            SamplingError::InvalidControlCount { value } => {
                write!(f, "Invalid control count {value}: must be > 0")
            }
            SamplingError::InvalidRange { start, end } => {
                write!(f, "Invalid event range [{start}, {end}): start must not exceed end")
            }
            SamplingError::InvalidDecayRate { value } => {
                write!(f, "Invalid decay rate {value}: must be finite and >= 0")
            }
            SamplingError::InvalidAttemptFactor { value } => {
                write!(f, "Invalid attempt factor {value}: must be > 0")
            }
            SamplingError::EmptyStatistics => write!(f, "At least one statistic is required"),
            SamplingError::EmptyRiskSet => write!(f, "The actor universe is empty"),

            // ---- Propagated ----
            SamplingError::State(err) => write!(f, "{err}"),
            SamplingError::Stat(err) => write!(f, "{err}"),
        }
    }
}

impl From<StateError> for SamplingError {
    fn from(err: StateError) -> Self {
        SamplingError::State(err)
    }
}

impl From<StatError> for SamplingError {
    fn from(err: StatError) -> Self {
        SamplingError::Stat(err)
    }
}
