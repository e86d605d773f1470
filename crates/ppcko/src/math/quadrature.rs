//! Interpolation and trapezoidal quadrature.
//!
//! ## Purpose
//!
//! This module evaluates L2 inner products of discretely observed functions:
//! the integrand is known only on an evaluation grid, so it is linearly
//! interpolated and integrated with the composite trapezoidal rule over an
//! integration mesh.
//!
//! ## Design notes
//!
//! * **Interpolation**: Piecewise linear with constant extrapolation outside
//!   the evaluation grid.
//! * **Quadrature**: Composite trapezoid over the integration mesh elements;
//!   exact for piecewise-linear integrands when the integration mesh refines
//!   the evaluation grid.
//!
//! ## Invariants
//!
//! * Evaluation grid nodes are strictly increasing.
//! * `values.len() == grid.len()`.
//!
//! ## Non-goals
//!
//! * This module does not build meshes (see `math::mesh`).
//! * No adaptive or higher-order quadrature rules.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::mesh::Mesh1d;

// ============================================================================
// Interpolation
// ============================================================================

/// Linearly interpolate `values` sampled on `grid` at the point `x`.
///
/// Outside the grid the nearest sample is returned (constant extrapolation).
pub fn interp1d<T: Float>(grid: &[T], values: &[T], x: T) -> T {
    let n = grid.len();
    debug_assert_eq!(n, values.len());

    if n == 0 {
        return T::zero();
    }
    if n == 1 || x <= grid[0] {
        return values[0];
    }
    if x >= grid[n - 1] {
        return values[n - 1];
    }

    // Binary search for the bracketing interval.
    let mut left = 0;
    let mut right = n - 1;
    while right - left > 1 {
        let mid = (left + right) / 2;
        if grid[mid] <= x {
            left = mid;
        } else {
            right = mid;
        }
    }

    let denom = grid[right] - grid[left];
    if denom <= T::zero() {
        return (values[left] + values[right]) / T::from(2.0).unwrap();
    }
    let t = (x - grid[left]) / denom;
    values[left] + t * (values[right] - values[left])
}

// ============================================================================
// Quadrature
// ============================================================================

/// Integrate the interpolant of `(grid, values)` over `mesh` with the
/// composite trapezoidal rule.
pub fn integrate_interpolated<T: Float>(mesh: &Mesh1d<T>, grid: &[T], values: &[T]) -> T {
    let two = T::from(2.0).unwrap();
    let mut total = T::zero();
    for w in mesh.nodes().windows(2) {
        let (a, b) = (w[0], w[1]);
        let fa = interp1d(grid, values, a);
        let fb = interp1d(grid, values, b);
        total = total + (fa + fb) / two * (b - a);
    }
    total
}

/// L2 inner product of two functions sampled on the same evaluation grid.
///
/// The pointwise product is interpolated and integrated over `mesh`.
pub fn l2_inner_product<T: Float>(mesh: &Mesh1d<T>, grid: &[T], f: &[T], g: &[T]) -> T {
    debug_assert_eq!(f.len(), g.len());
    let product: Vec<T> = f.iter().zip(g).map(|(&fi, &gi)| fi * gi).collect();
    integrate_interpolated(mesh, grid, &product)
}
