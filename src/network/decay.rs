//! Exponential decay helpers.
//!
//! A decay rate `λ` multiplies every aggregate by `exp(-λ·Δt)` when time
//! advances by `Δt` seconds. The half-life `h` is the `Δt` after which a
//! contribution is halved, so `λ = ln 2 / h`.
use crate::network::errors::{StateError, StateResult};
use std::f64::consts::LN_2;

/// Convert a half-life (seconds) into a decay rate.
///
/// # Errors
/// [`StateError::InvalidHalfLife`] if `half_life` is not finite and `> 0`.
pub fn halflife_to_decay(half_life: f64) -> StateResult<f64> {
    if !half_life.is_finite() || half_life <= 0.0 {
        return Err(StateError::InvalidHalfLife { value: half_life });
    }
    Ok(LN_2 / half_life)
}

/// Convert a decay rate into a half-life (seconds).
///
/// # Errors
/// [`StateError::InvalidDecayRate`] if `decay_rate` is not finite and `> 0`.
pub fn decay_to_halflife(decay_rate: f64) -> StateResult<f64> {
    if !decay_rate.is_finite() || decay_rate <= 0.0 {
        return Err(StateError::InvalidDecayRate {
            value: decay_rate,
            reason: "A half-life requires a finite, strictly positive decay rate.",
        });
    }
    Ok(LN_2 / decay_rate)
}

/// Multiplicative decay factor `exp(-λ·Δt)`.
#[inline]
pub fn decay_factor(decay_rate: f64, elapsed_seconds: f64) -> f64 {
    (-decay_rate * elapsed_seconds).exp()
}

/// Validate a decay rate for use by the network state.
pub(crate) fn validate_decay_rate(decay_rate: f64) -> StateResult<f64> {
    if !decay_rate.is_finite() {
        return Err(StateError::InvalidDecayRate {
            value: decay_rate,
            reason: "Decay rate must be finite.",
        });
    }
    if decay_rate < 0.0 {
        return Err(StateError::InvalidDecayRate {
            value: decay_rate,
            reason: "Decay rate must be non-negative.",
        });
    }
    Ok(decay_rate)
}
