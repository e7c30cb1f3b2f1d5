//! statistics::transforms — scalar transforms shared by several families.
//!
//! Purpose
//! -------
//! Collect the monotone maps applied on top of raw network quantities:
//! the geometrically-weighted saturation used by closure statistics, the
//! `log1p` damping used by degree statistics, and the recency transforms of
//! elapsed time.
//!
//! Invariants & assumptions
//! ------------------------
//! - `geometric_weight(n, α)` is `0` at `n = 0`, strictly increasing in `n`,
//!   and bounded above by `exp(α)` for every `α > 0`.
//! - Recency transforms map `Δ > 0` into `(0, 1]`-ish decreasing values and
//!   return `0` for `Δ <= 0` or a missing previous event.
use crate::statistics::errors::{StatError, StatResult};
use std::str::FromStr;

/// Geometrically-weighted transform `exp(α)·(1 − (1 − exp(−α))^n)`.
///
/// `n` may be fractional (weighted counts); negative inputs are clamped to 0.
#[inline]
pub fn geometric_weight(n: f64, alpha: f64) -> f64 {
    let n = n.max(0.0);
    alpha.exp() * (1.0 - (1.0 - (-alpha).exp()).powf(n))
}

/// `ln(1 + x)` for non-negative `x`; negative inputs are clamped to 0.
#[inline]
pub fn log1p(x: f64) -> f64 {
    x.max(0.0).ln_1p()
}

/// Validate a geometric decay parameter `α`.
pub(crate) fn validate_alpha(alpha: f64) -> StatResult<f64> {
    if !alpha.is_finite() || alpha <= 0.0 {
        return Err(StatError::InvalidParameter {
            name: "alpha",
            value: alpha,
            reason: "Geometric weighting requires a finite alpha > 0.",
        });
    }
    Ok(alpha)
}

/// RecencyTransform — map from elapsed seconds to a recency score.
///
/// Variants
/// --------
/// - `Inverse`: `1 / Δ`.
/// - `LogInverse`: `1 / (1 + ln(1 + Δ))`.
/// - `Exponential { rate }`: `exp(−rate·Δ)`, `rate > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecencyTransform {
    Inverse,
    LogInverse,
    Exponential { rate: f64 },
}

impl RecencyTransform {
    /// Exponential transform with a validated rate.
    pub fn exponential(rate: f64) -> StatResult<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(StatError::InvalidParameter {
                name: "rate",
                value: rate,
                reason: "Exponential recency requires a finite rate > 0.",
            });
        }
        Ok(RecencyTransform::Exponential { rate })
    }

    /// Apply the transform; `0` for non-positive elapsed time.
    pub fn apply(&self, elapsed: f64) -> f64 {
        if elapsed.is_nan() || elapsed <= 0.0 {
            return 0.0;
        }
        match self {
            RecencyTransform::Inverse => 1.0 / elapsed,
            RecencyTransform::LogInverse => 1.0 / (1.0 + elapsed.ln_1p()),
            RecencyTransform::Exponential { rate } => (-rate * elapsed).exp(),
        }
    }

    pub(crate) fn label(&self) -> String {
        match self {
            RecencyTransform::Inverse => "inverse".to_string(),
            RecencyTransform::LogInverse => "log_inverse".to_string(),
            RecencyTransform::Exponential { rate } => format!("exp{rate}"),
        }
    }
}

impl Default for RecencyTransform {
    fn default() -> Self {
        RecencyTransform::Inverse
    }
}

/// Parses `"inverse"` and `"log_inverse"`; the exponential transform carries
/// a rate and is built with [`RecencyTransform::exponential`].
impl FromStr for RecencyTransform {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inverse" => Ok(RecencyTransform::Inverse),
            "log_inverse" | "loginverse" | "log" => Ok(RecencyTransform::LogInverse),
            _ => Err(StatError::InvalidMode { field: "recency transform", value: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Values and shape of the geometric weight.
    // - Recency transforms, including the zero cases.
    // - Parsing and validation of selectors and parameters.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Spot-check the geometric weight against hand values.
    //
    // Given
    // -----
    // - α = ln 2, so exp(α) = 2 and 1 − exp(−α) = 1/2.
    //
    // Expect
    // ------
    // - n = 0 → 0, n = 1 → 1, n = 2 → 1.5.
    fn geometric_weight_hand_values() {
        let alpha = std::f64::consts::LN_2;
        assert_relative_eq!(geometric_weight(0.0, alpha), 0.0, epsilon = 1e-12);
        assert_relative_eq!(geometric_weight(1.0, alpha), 1.0, epsilon = 1e-12);
        assert_relative_eq!(geometric_weight(2.0, alpha), 1.5, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Recency transforms follow their formulas and vanish for Δ <= 0.
    //
    // Given
    // -----
    // - Δ = 4 and Δ = 0 for each transform.
    //
    // Expect
    // ------
    // - 1/4, 1/(1 + ln 5), exp(−2) at Δ = 4 (rate 0.5); 0 at Δ = 0.
    fn recency_transforms_match_formulas() {
        let exp = RecencyTransform::exponential(0.5).unwrap();

        assert_relative_eq!(RecencyTransform::Inverse.apply(4.0), 0.25);
        assert_relative_eq!(RecencyTransform::LogInverse.apply(4.0), 1.0 / (1.0 + 5f64.ln()));
        assert_relative_eq!(exp.apply(4.0), (-2.0f64).exp());
        for t in [RecencyTransform::Inverse, RecencyTransform::LogInverse, exp] {
            assert_eq!(t.apply(0.0), 0.0);
            assert_eq!(t.apply(-3.0), 0.0);
        }
    }

    #[test]
    // Purpose
    // -------
    // Selectors and parameters are validated up front.
    //
    // Given
    // -----
    // - Parser input "Log_Inverse" and "quadratic"; rate 0; alpha -1.
    //
    // Expect
    // ------
    // - The first parses, the rest fail with descriptive errors.
    fn selectors_and_parameters_are_validated() {
        assert_eq!("Log_Inverse".parse::<RecencyTransform>(), Ok(RecencyTransform::LogInverse));
        assert!(matches!(
            "quadratic".parse::<RecencyTransform>(),
            Err(StatError::InvalidMode { .. })
        ));
        assert!(RecencyTransform::exponential(0.0).is_err());
        assert!(validate_alpha(-1.0).is_err());
        assert_eq!(validate_alpha(0.5), Ok(0.5));
    }

    proptest! {
        // Purpose
        // -------
        // For α > 0 the geometric weight is strictly increasing in n and
        // stays below exp(α).
        #[test]
        fn geometric_weight_is_increasing_and_bounded(alpha in 0.05f64..3.0, n in 0u32..40) {
            let lo = geometric_weight(n as f64, alpha);
            let hi = geometric_weight(n as f64 + 1.0, alpha);
            prop_assert!(hi > lo);
            prop_assert!(hi <= alpha.exp());
        }
    }
}
