//! 1D domains and uniform meshes.
//!
//! ## Purpose
//!
//! This module provides the geometric support for functional data: a 1D
//! interval [`Domain1d`] and a uniform [`Mesh1d`] over it. Meshes carry the
//! evaluation grid of the discretized curves and the integration grid used
//! for L2 inner products.
//!
//! ## Key concepts
//!
//! * **Domain**: A finite interval `[left, right]`, default `[0, 1]`.
//! * **Uniform mesh**: `n` elements give `n + 1` equispaced nodes with the
//!   last node pinned exactly to the right endpoint.
//!
//! ## Invariants
//!
//! * `left < right` and both endpoints are finite.
//! * Mesh nodes are strictly increasing; `nodes.len() >= 2`.
//!
//! ## Non-goals
//!
//! * This module does not support 2D domains.
//! * This module does not perform quadrature (see `math::quadrature`).

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::PpckoError;

// ============================================================================
// Domain
// ============================================================================

/// A finite 1D interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain1d<T> {
    left: T,
    right: T,
}

impl<T: Float> Domain1d<T> {
    /// Create a domain, checking `left < right` and finiteness.
    pub fn new(left: T, right: T) -> Result<Self, PpckoError> {
        if !left.is_finite() || !right.is_finite() || left >= right {
            return Err(PpckoError::InvalidDomain {
                left: left.to_f64().unwrap_or(f64::NAN),
                right: right.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self { left, right })
    }

    /// Left endpoint.
    pub fn left(&self) -> T {
        self.left
    }

    /// Right endpoint.
    pub fn right(&self) -> T {
        self.right
    }

    /// Interval length.
    pub fn length(&self) -> T {
        self.right - self.left
    }
}

impl<T: Float> Default for Domain1d<T> {
    /// The unit interval `[0, 1]`.
    fn default() -> Self {
        Self {
            left: T::zero(),
            right: T::one(),
        }
    }
}

// ============================================================================
// Mesh
// ============================================================================

/// Uniform 1D mesh over a domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh1d<T> {
    domain: Domain1d<T>,
    nodes: Vec<T>,
}

impl<T: Float> Mesh1d<T> {
    /// Build a uniform mesh with `elements` elements (`elements + 1` nodes).
    pub fn uniform(domain: Domain1d<T>, elements: usize) -> Result<Self, PpckoError> {
        if elements == 0 {
            return Err(PpckoError::InvalidMesh { elements });
        }

        let h = domain.length() / T::from(elements).unwrap();
        let mut nodes = Vec::with_capacity(elements + 1);
        for i in 0..elements {
            nodes.push(domain.left() + h * T::from(i).unwrap());
        }
        // Pin the last node to avoid accumulated rounding past the endpoint.
        nodes.push(domain.right());

        Ok(Self { domain, nodes })
    }

    /// The mesh domain.
    pub fn domain(&self) -> Domain1d<T> {
        self.domain
    }

    /// Mesh nodes in ascending order.
    pub fn nodes(&self) -> &[T] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Largest element length.
    pub fn hmax(&self) -> T {
        self.nodes
            .windows(2)
            .map(|w| w[1] - w[0])
            .fold(T::neg_infinity(), T::max)
    }

    /// Smallest element length.
    pub fn hmin(&self) -> T {
        self.nodes
            .windows(2)
            .map(|w| w[1] - w[0])
            .fold(T::infinity(), T::min)
    }
}
