//! Errors raised at the event-ingestion boundary.
//!
//! [`EventError`] covers the checks an [`EventLog`](super::log::EventLog)
//! performs when events enter the core (weights, ordering) and the
//! time-normalization failures reported by
//! [`EventTime::seconds_since`](super::time::EventTime::seconds_since).

/// Result alias for event ingestion and time normalization.
pub type EventResult<T> = Result<T, EventError>;

/// Validation failures for events and event times.
#[derive(Debug, Clone, PartialEq)]
pub enum EventError {
    // ---- Event payload ----
    /// Event weight must be finite and non-negative.
    InvalidWeight { index: usize, value: f64, reason: &'static str },

    // ---- Ordering ----
    /// Appending would break the time order of the log.
    OutOfOrder { index: usize },

    /// Two event times cannot be compared (e.g. a NaN float timestamp).
    IncomparableTime { index: usize },

    // ---- Time normalization ----
    /// The elapsed time between two events does not map to a finite
    /// number of seconds.
    NonFiniteTimeDelta { seconds: f64 },
}

impl std::error::Error for EventError {}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Event payload ----
            EventError::InvalidWeight { index, value, reason } => {
                write!(f, "Invalid weight {value} for event at index {index}: {reason}")
            }

            // ---- Ordering ----
            EventError::OutOfOrder { index } => {
                write!(f, "Event at index {index} is earlier than the last event in the log")
            }
            EventError::IncomparableTime { index } => {
                write!(f, "Event time at index {index} cannot be ordered")
            }

            // ---- Time normalization ----
            EventError::NonFiniteTimeDelta { seconds } => {
                write!(f, "Time difference does not convert to finite seconds: {seconds}")
            }
        }
    }
}
