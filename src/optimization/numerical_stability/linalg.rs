//! Symmetric positive-definite linear algebra for Newton steps and
//! covariance estimates.
//!
//! Conversions between `ndarray` and `nalgebra`, a conditioning check based
//! on the symmetric eigendecomposition, and Cholesky-based solves and
//! inverses that return `None` instead of failing when the matrix is
//! singular or ill-conditioned.
use crate::optimization::numerical_stability::transformations::EIGEN_EPS;
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2};

/// Copy a square `ndarray` matrix into a (resized) `nalgebra` matrix.
pub fn fill_dmatrix(source: &Array2<f64>, target: &mut DMatrix<f64>) {
    let (rows, cols) = source.dim();
    if target.nrows() != rows || target.ncols() != cols {
        *target = DMatrix::zeros(rows, cols);
    }
    for ((i, j), &value) in source.indexed_iter() {
        target[(i, j)] = value;
    }
}

/// `(smallest, largest)` eigenvalue of the symmetric part of `matrix`.
///
/// Returns `None` for an empty matrix or non-finite entries.
pub fn eigen_range(matrix: &Array2<f64>) -> Option<(f64, f64)> {
    if matrix.is_empty() || matrix.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let mut dm = DMatrix::zeros(0, 0);
    fill_dmatrix(matrix, &mut dm);
    let sym = (&dm + dm.transpose()) * 0.5;
    let eigenvalues = sym.symmetric_eigen().eigenvalues;
    let min = eigenvalues.iter().copied().fold(f64::INFINITY, f64::min);
    let max = eigenvalues.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((min, max))
}

/// Whether an information matrix is too close to singular to invert.
///
/// True when the smallest eigenvalue is at most
/// `EIGEN_EPS · max(1, largest)`, when entries are non-finite, or when the
/// matrix is empty.
pub fn is_ill_conditioned(info: &Array2<f64>) -> bool {
    match eigen_range(info) {
        Some((min, max)) => min <= EIGEN_EPS * max.max(1.0),
        None => true,
    }
}

/// Solve `info · x = rhs` for a symmetric positive-definite `info`.
///
/// Returns `None` when `info` is ill-conditioned, the Cholesky
/// factorization fails, the shapes disagree, or the solution is not finite.
pub fn solve_spd(info: &Array2<f64>, rhs: &Array1<f64>) -> Option<Array1<f64>> {
    if info.nrows() != rhs.len() || is_ill_conditioned(info) {
        return None;
    }
    let mut dm = DMatrix::zeros(0, 0);
    fill_dmatrix(info, &mut dm);
    let chol = dm.cholesky()?;
    let b = DVector::from_iterator(rhs.len(), rhs.iter().copied());
    let x = chol.solve(&b);
    if x.iter().any(|v| !v.is_finite()) {
        return None;
    }
    Some(Array1::from_iter(x.iter().copied()))
}

/// Inverse of a symmetric positive-definite `info`, or `None` under the
/// same conditions as [`solve_spd`].
pub fn invert_spd(info: &Array2<f64>) -> Option<Array2<f64>> {
    if info.nrows() != info.ncols() || is_ill_conditioned(info) {
        return None;
    }
    let n = info.nrows();
    let mut dm = DMatrix::zeros(0, 0);
    fill_dmatrix(info, &mut dm);
    let inverse = dm.cholesky()?.inverse();
    if inverse.iter().any(|v| !v.is_finite()) {
        return None;
    }
    Some(Array2::from_shape_fn((n, n), |(i, j)| inverse[(i, j)]))
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
    // - Eigenvalue range and the conditioning rule.
    // - SPD solve and inverse on a small well-conditioned matrix.
    // - `None` for singular and non-finite matrices.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Diagonal matrices expose their eigenvalues directly.
    //
    // Given
    // -----
    // - diag(2, 5), a rank-one matrix, a matrix with NaN.
    //
    // Expect
    // ------
    // - Range (2, 5), well-conditioned; the others ill-conditioned.
    fn conditioning_rule() {
        let (min, max) = eigen_range(&array![[2.0, 0.0], [0.0, 5.0]]).unwrap();
        assert_abs_diff_eq!(min, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(max, 5.0, epsilon = 1e-12);
        assert!(!is_ill_conditioned(&array![[2.0, 0.0], [0.0, 5.0]]));
        assert!(is_ill_conditioned(&array![[1.0, 1.0], [1.0, 1.0]]));
        assert!(is_ill_conditioned(&array![[f64::NAN, 0.0], [0.0, 1.0]]));
    }

    #[test]
    // Purpose
    // -------
    // Solve and inverse agree with hand-computed values.
    //
    // Given
    // -----
    // - A = [[4, 1], [1, 3]], b = (1, 2).
    //
    // Expect
    // ------
    // - x = (1/11, 7/11); A⁻¹ = [[3, -1], [-1, 4]] / 11.
    fn spd_solve_and_inverse() {
        let a = array![[4.0, 1.0], [1.0, 3.0]];
        let x = solve_spd(&a, &array![1.0, 2.0]).unwrap();
        assert_abs_diff_eq!(x[0], 1.0 / 11.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 7.0 / 11.0, epsilon = 1e-12);

        let inv = invert_spd(&a).unwrap();
        assert_abs_diff_eq!(inv[[0, 0]], 3.0 / 11.0, epsilon = 1e-12);
        assert_abs_diff_eq!(inv[[0, 1]], -1.0 / 11.0, epsilon = 1e-12);
        assert_abs_diff_eq!(inv[[1, 1]], 4.0 / 11.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Singular or indefinite systems are refused.
    //
    // Given
    // -----
    // - A rank-one matrix and a negative definite matrix.
    //
    // Expect
    // ------
    // - `None` from both helpers.
    fn singular_is_none() {
        let singular = array![[1.0, 1.0], [1.0, 1.0]];
        assert!(solve_spd(&singular, &array![1.0, 1.0]).is_none());
        assert!(invert_spd(&singular).is_none());
        let negative = array![[-1.0, 0.0], [0.0, -2.0]];
        assert!(invert_spd(&negative).is_none());
    }
}
