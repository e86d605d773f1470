#![cfg(feature = "dev")]
//! Tests for the dense linear algebra backend.
//!
//! These tests verify the column-major matrix product, the symmetric
//! eigendecomposition ordering, the inverse matrix square root, and the OLS
//! solve with standard errors.

use approx::assert_relative_eq;

use ppcko::internals::math::linalg::{transpose, FloatLinalg};

// ============================================================================
// Product and Transpose Tests
// ============================================================================

/// Test a known 2x2 product in column-major storage.
#[test]
fn test_matmul_basic() {
    // A = [[1, 3], [2, 4]] stored by columns.
    let a = vec![1.0, 2.0, 3.0, 4.0];
    // B = [[5, 7], [6, 8]].
    let b = vec![5.0, 6.0, 7.0, 8.0];

    let c = f64::matmul(&a, 2, 2, &b, 2);
    // A * B = [[23, 31], [34, 46]].
    assert_relative_eq!(c[0], 23.0);
    assert_relative_eq!(c[1], 34.0);
    assert_relative_eq!(c[2], 31.0);
    assert_relative_eq!(c[3], 46.0);
}

/// Test transposition of a rectangular matrix.
#[test]
fn test_transpose() {
    // 2x3 matrix [[1, 3, 5], [2, 4, 6]] stored by columns.
    let a = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let t = transpose(&a, 2, 3);
    // 3x2 result stored by columns: first column is the first row of A.
    assert_eq!(t, vec![1.0, 3.0, 5.0, 2.0, 4.0, 6.0]);
}

// ============================================================================
// Eigendecomposition Tests
// ============================================================================

/// Test that eigenvalues come back in descending order.
#[test]
fn test_sym_eigen_desc_order() {
    // diag(1, 3, 2).
    let a = vec![1.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 2.0];
    let (vals, _) = f64::sym_eigen_desc(&a, 3);

    assert_relative_eq!(vals[0], 3.0, epsilon = 1e-10);
    assert_relative_eq!(vals[1], 2.0, epsilon = 1e-10);
    assert_relative_eq!(vals[2], 1.0, epsilon = 1e-10);
}

/// Test that eigenvector columns stay aligned with the sorted eigenvalues.
#[test]
fn test_sym_eigen_desc_alignment() {
    // Symmetric matrix with eigenpairs (3, [1,1]/sqrt2) and (1, [1,-1]/sqrt2).
    let a = vec![2.0, 1.0, 1.0, 2.0];
    let (vals, vecs) = f64::sym_eigen_desc(&a, 2);

    for c in 0..2 {
        let v = [vecs[c * 2], vecs[c * 2 + 1]];
        // Check A v = lambda v componentwise.
        let av = [2.0 * v[0] + v[1], v[0] + 2.0 * v[1]];
        assert_relative_eq!(av[0], vals[c] * v[0], epsilon = 1e-10);
        assert_relative_eq!(av[1], vals[c] * v[1], epsilon = 1e-10);
    }
}

// ============================================================================
// Inverse Square Root Tests
// ============================================================================

/// Test the inverse square root of a diagonal SPD matrix.
#[test]
fn test_inverse_sqrt_spd_diagonal() {
    let a = vec![4.0, 0.0, 0.0, 9.0];
    let root = f64::inverse_sqrt_spd(&a, 2).unwrap();

    assert_relative_eq!(root[0], 0.5, epsilon = 1e-10);
    assert_relative_eq!(root[1], 0.0, epsilon = 1e-10);
    assert_relative_eq!(root[2], 0.0, epsilon = 1e-10);
    assert_relative_eq!(root[3], 1.0 / 3.0, epsilon = 1e-10);
}

/// Test that the inverse square root squares back to the inverse.
#[test]
fn test_inverse_sqrt_spd_roundtrip() {
    let a = vec![2.0, 1.0, 1.0, 2.0];
    let root = f64::inverse_sqrt_spd(&a, 2).unwrap();

    // root * a * root should be the identity.
    let ra = f64::matmul(&root, 2, 2, &a, 2);
    let rar = f64::matmul(&ra, 2, 2, &root, 2);
    assert_relative_eq!(rar[0], 1.0, epsilon = 1e-10);
    assert_relative_eq!(rar[1], 0.0, epsilon = 1e-10);
    assert_relative_eq!(rar[2], 0.0, epsilon = 1e-10);
    assert_relative_eq!(rar[3], 1.0, epsilon = 1e-10);
}

/// Test that indefinite matrices are refused.
#[test]
fn test_inverse_sqrt_spd_indefinite() {
    let a = vec![1.0, 0.0, 0.0, -1.0];
    assert!(f64::inverse_sqrt_spd(&a, 2).is_none());
}

// ============================================================================
// OLS Tests
// ============================================================================

/// Test an exact linear fit recovers the coefficients with zero error.
#[test]
fn test_ols_exact_fit() {
    // y = 1 + 2x on x = 0..4, design [1 | x] stored by columns.
    let x = [0.0, 1.0, 2.0, 3.0, 4.0];
    let mut design = vec![1.0; 5];
    design.extend_from_slice(&x);
    let y: Vec<f64> = x.iter().map(|&v| 1.0 + 2.0 * v).collect();

    let (coeff, stderr) = f64::ols_with_stderr(&design, 5, 2, &y).unwrap();
    assert_relative_eq!(coeff[0], 1.0, epsilon = 1e-8);
    assert_relative_eq!(coeff[1], 2.0, epsilon = 1e-8);
    // A perfect fit has no residual variance.
    assert!(stderr[1].abs() < 1e-6);
}

/// Test that noisy data yields positive standard errors.
#[test]
fn test_ols_stderr_positive() {
    let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    let noise = [0.1, -0.2, 0.15, -0.1, 0.05, -0.05];
    let mut design = vec![1.0; 6];
    design.extend_from_slice(&x);
    let y: Vec<f64> = x
        .iter()
        .zip(&noise)
        .map(|(&v, &e)| 1.0 + 2.0 * v + e)
        .collect();

    let (coeff, stderr) = f64::ols_with_stderr(&design, 6, 2, &y).unwrap();
    assert_relative_eq!(coeff[1], 2.0, epsilon = 0.1);
    assert!(stderr[0] > 0.0);
    assert!(stderr[1] > 0.0);
}

/// Test that a system without residual degrees of freedom is refused.
#[test]
fn test_ols_underdetermined() {
    let design = vec![1.0, 1.0, 0.0, 1.0];
    let y = vec![1.0, 2.0];
    assert!(f64::ols_with_stderr(&design, 2, 2, &y).is_none());
}
