//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical building blocks used throughout
//! PPCKO:
//! - Dense linear algebra (eigendecomposition, SPD inverse square root, OLS)
//! - 1D domains and uniform meshes
//! - Interpolation and trapezoidal quadrature
//! - Error metrics
//!
//! These are reusable mathematical tools with no estimator-specific logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Linear algebra bridge to nalgebra.
pub mod linalg;

/// 1D domains and uniform meshes.
pub mod mesh;

/// Interpolation and trapezoidal quadrature.
pub mod quadrature;

/// Error metrics.
pub mod metrics;
