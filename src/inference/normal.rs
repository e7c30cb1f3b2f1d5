//! inference::normal — Wald z-scores and two-sided normal p-values.
use ndarray::Array1;
use statrs::distribution::{ContinuousCDF, Normal};

/// `z_i = β_i / SE_i`; `NaN` where the standard error is NaN, zero or
/// negative.
pub fn z_scores(coefficients: &Array1<f64>, standard_errors: &Array1<f64>) -> Array1<f64> {
    Array1::from_iter(coefficients.iter().zip(standard_errors.iter()).map(|(&b, &se)| {
        if se.is_nan() || se <= 0.0 { f64::NAN } else { b / se }
    }))
}

/// `p_i = 2 · P(Z > |z_i|)` for a standard normal `Z`; `NaN` stays `NaN`.
pub fn two_sided_p_values(z: &Array1<f64>) -> Array1<f64> {
    let Ok(normal) = Normal::new(0.0, 1.0) else {
        return Array1::from_elem(z.len(), f64::NAN);
    };
    z.mapv(|z| if z.is_nan() { f64::NAN } else { (2.0 * normal.sf(z.abs())).min(1.0) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Known quantiles of the standard normal.
    // - NaN propagation from undefined standard errors.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Textbook values.
    //
    // Given
    // -----
    // - z = 0, ±1.959964, 3.
    //
    // Expect
    // ------
    // - p = 1, 0.05, 0.05, 0.0026998.
    fn known_quantiles() {
        let p = two_sided_p_values(&array![0.0, 1.959964, -1.959964, 3.0]);
        assert_abs_diff_eq!(p[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p[1], 0.05, epsilon = 1e-6);
        assert_abs_diff_eq!(p[2], 0.05, epsilon = 1e-6);
        assert_abs_diff_eq!(p[3], 0.002699796, epsilon = 1e-8);
    }

    #[test]
    // Purpose
    // -------
    // Undefined standard errors propagate.
    //
    // Given
    // -----
    // - β = (1, 2, 3), SE = (0.5, NaN, 0).
    //
    // Expect
    // ------
    // - z = (2, NaN, NaN) and NaN p-values where z is NaN.
    fn nan_propagation() {
        let z = z_scores(&array![1.0, 2.0, 3.0], &array![0.5, f64::NAN, 0.0]);
        assert_abs_diff_eq!(z[0], 2.0, epsilon = 1e-12);
        assert!(z[1].is_nan() && z[2].is_nan());
        let p = two_sided_p_values(&z);
        assert!(p[0] > 0.0 && p[0] < 0.05);
        assert!(p[1].is_nan());
    }
}
