//! Linear algebra backend abstraction for PPCKO.
//!
//! ## Purpose
//!
//! This module provides a trait-based abstraction over the dense linear
//! algebra the Kargin-Onatski estimator needs: matrix products, symmetric
//! eigendecomposition, the SPD inverse square root, and ordinary least
//! squares with coefficient standard errors.
//!
//! ## Design notes
//!
//! * All matrices are flat column-major slices with explicit dimensions.
//! * Eigendecomposition returns eigenvalues in descending order with the
//!   eigenvector columns permuted to match.
//! * OLS uses SVD for the solve and falls back to a pseudo-inverse of the
//!   normal matrix when the design is rank-deficient.
//! * Generic over `FloatLinalg` types (f32 and f64) which delegate to nalgebra.

// External dependencies
use core::fmt::Debug;
use num_traits::Float;

// ============================================================================
// FloatLinalg Trait
// ============================================================================

/// Helper trait to bridge generic `Float` types to the nalgebra backend.
pub trait FloatLinalg: Float + Debug + Send + Sync + 'static {
    /// Multiply the `m x k` matrix `a` by the `k x n` matrix `b`.
    fn matmul(a: &[Self], m: usize, k: usize, b: &[Self], n: usize) -> Vec<Self>;

    /// Eigendecomposition of a symmetric `n x n` matrix.
    ///
    /// Returns `(eigenvalues, eigenvectors)` with eigenvalues sorted in
    /// descending order and eigenvector columns aligned to that order.
    fn sym_eigen_desc(a: &[Self], n: usize) -> (Vec<Self>, Vec<Self>);

    /// Inverse square root of a symmetric positive-definite `n x n` matrix.
    ///
    /// Returns `None` if any eigenvalue is non-positive.
    fn inverse_sqrt_spd(a: &[Self], n: usize) -> Option<Vec<Self>>;

    /// Ordinary least squares on a `rows x cols` design matrix.
    ///
    /// The design must already carry its intercept column. Returns the
    /// coefficient vector and the standard errors of its entries, or `None`
    /// when there are no residual degrees of freedom or the solve fails.
    fn ols_with_stderr(
        design: &[Self],
        rows: usize,
        cols: usize,
        y: &[Self],
    ) -> Option<(Vec<Self>, Vec<Self>)>;
}

impl FloatLinalg for f64 {
    #[inline]
    fn matmul(a: &[Self], m: usize, k: usize, b: &[Self], n: usize) -> Vec<Self> {
        nalgebra_backend::matmul(a, m, k, b, n)
    }
    #[inline]
    fn sym_eigen_desc(a: &[Self], n: usize) -> (Vec<Self>, Vec<Self>) {
        nalgebra_backend::sym_eigen_desc(a, n)
    }
    #[inline]
    fn inverse_sqrt_spd(a: &[Self], n: usize) -> Option<Vec<Self>> {
        nalgebra_backend::inverse_sqrt_spd(a, n)
    }
    #[inline]
    fn ols_with_stderr(
        design: &[Self],
        rows: usize,
        cols: usize,
        y: &[Self],
    ) -> Option<(Vec<Self>, Vec<Self>)> {
        nalgebra_backend::ols_with_stderr(design, rows, cols, y, f64::EPSILON)
    }
}

impl FloatLinalg for f32 {
    #[inline]
    fn matmul(a: &[Self], m: usize, k: usize, b: &[Self], n: usize) -> Vec<Self> {
        nalgebra_backend::matmul(a, m, k, b, n)
    }
    #[inline]
    fn sym_eigen_desc(a: &[Self], n: usize) -> (Vec<Self>, Vec<Self>) {
        nalgebra_backend::sym_eigen_desc(a, n)
    }
    #[inline]
    fn inverse_sqrt_spd(a: &[Self], n: usize) -> Option<Vec<Self>> {
        nalgebra_backend::inverse_sqrt_spd(a, n)
    }
    #[inline]
    fn ols_with_stderr(
        design: &[Self],
        rows: usize,
        cols: usize,
        y: &[Self],
    ) -> Option<(Vec<Self>, Vec<Self>)> {
        nalgebra_backend::ols_with_stderr(design, rows, cols, y, f32::EPSILON)
    }
}

// ============================================================================
// Pure Helpers
// ============================================================================

/// Transpose a column-major `rows x cols` matrix.
pub fn transpose<T: Float>(a: &[T], rows: usize, cols: usize) -> Vec<T> {
    let mut out = vec![T::zero(); rows * cols];
    for j in 0..cols {
        for i in 0..rows {
            out[i * cols + j] = a[j * rows + i];
        }
    }
    out
}

// ============================================================================
// Nalgebra Backend Implementation
// ============================================================================

/// Nalgebra-based linear algebra operations.
pub mod nalgebra_backend {
    use nalgebra::{DMatrix, DVector, RealField};

    /// Multiply an `m x k` matrix by a `k x n` matrix (column-major slices).
    pub fn matmul<T: RealField + Copy>(
        a: &[T],
        m: usize,
        k: usize,
        b: &[T],
        n: usize,
    ) -> Vec<T> {
        let am = DMatrix::from_column_slice(m, k, a);
        let bm = DMatrix::from_column_slice(k, n, b);
        (am * bm).as_slice().to_vec()
    }

    /// Symmetric eigendecomposition with eigenvalues in descending order.
    pub fn sym_eigen_desc<T: RealField + Copy>(a: &[T], n: usize) -> (Vec<T>, Vec<T>) {
        let m = DMatrix::from_column_slice(n, n, a);
        let eig = m.symmetric_eigen();

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&i, &j| {
            eig.eigenvalues[j]
                .partial_cmp(&eig.eigenvalues[i])
                .unwrap_or(core::cmp::Ordering::Equal)
        });

        let mut vals = Vec::with_capacity(n);
        let mut vecs = Vec::with_capacity(n * n);
        for &i in &order {
            vals.push(eig.eigenvalues[i]);
            vecs.extend(eig.eigenvectors.column(i).iter().copied());
        }
        (vals, vecs)
    }

    /// Inverse square root of an SPD matrix via the spectral theorem.
    pub fn inverse_sqrt_spd<T: RealField + Copy>(a: &[T], n: usize) -> Option<Vec<T>> {
        let m = DMatrix::from_column_slice(n, n, a);
        let eig = m.symmetric_eigen();

        let mut d = DMatrix::zeros(n, n);
        for i in 0..n {
            let lam = eig.eigenvalues[i];
            if lam <= T::zero() {
                return None;
            }
            d[(i, i)] = T::one() / lam.sqrt();
        }

        let v = &eig.eigenvectors;
        let root = v * d * v.transpose();
        Some(root.as_slice().to_vec())
    }

    /// OLS coefficients and their standard errors.
    ///
    /// The residual variance estimate is `SSE / (rows - cols)`; standard
    /// errors come from the diagonal of `sigma^2 (X'X)^-1`, using a
    /// pseudo-inverse when the normal matrix is singular.
    pub fn ols_with_stderr<T: RealField + Copy>(
        design: &[T],
        rows: usize,
        cols: usize,
        y: &[T],
        eps: T,
    ) -> Option<(Vec<T>, Vec<T>)> {
        if rows <= cols {
            return None;
        }

        let x = DMatrix::from_column_slice(rows, cols, design);
        let yv = DVector::from_column_slice(y);

        let svd = x.clone().svd(true, true);
        let beta = svd.solve(&yv, eps).ok()?;

        let residuals = &yv - &x * &beta;
        let sse = residuals.dot(&residuals);
        let df: T = nalgebra::convert((rows - cols) as f64);
        let sigma2 = sse / df;

        let xtx = x.transpose() * &x;
        let inv = xtx
            .clone()
            .try_inverse()
            .or_else(|| xtx.pseudo_inverse(eps).ok())?;

        let mut se = Vec::with_capacity(cols);
        for j in 0..cols {
            let v = sigma2 * inv[(j, j)];
            se.push(if v > T::zero() { v.sqrt() } else { T::zero() });
        }

        Some((beta.as_slice().to_vec(), se))
    }
}
