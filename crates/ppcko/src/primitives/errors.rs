//! Error types for PPCKO operations.
//!
//! ## Purpose
//!
//! This module defines error conditions that can occur while estimating the
//! Kargin-Onatski predictor, including input validation, parameter
//! constraints, and numerical failures.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (e.g., actual vs. expected lengths).
//! * **Deferred**: Builder misuse is caught during configuration and reported at `build()`.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error`.
//!
//! ## Key concepts
//!
//! 1. **Input validation**: Empty matrices, ragged rows, too few time instants.
//! 2. **Parameter validation**: Invalid alpha, retention threshold, component counts.
//! 3. **Search constraints**: Empty candidate grids, invalid train windows.
//! 4. **Numerical failures**: Degenerate covariance, failed decompositions.
//!
//! ## Invariants
//!
//! * All variants provide sufficient context for diagnosis.
//! * Error messages are consistent in tone and formatting.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or fallback strategies.

// External dependencies
use core::fmt::{Display, Formatter, Result};
use std::error::Error;

// ============================================================================
// Error Type
// ============================================================================

/// Error type for PPCKO operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PpckoError {
    /// Input matrix is empty; estimation requires at least one row and two columns.
    EmptyInput,

    /// All rows of a matrix must have the same number of time instants.
    RaggedInput {
        /// Index of the offending row.
        row: usize,
        /// Number of elements in the offending row.
        len: usize,
        /// Expected number of elements (taken from the first row).
        expected: usize,
    },

    /// Number of time instants is below the minimum requirement.
    TooFewTimePoints {
        /// Number of time instants provided.
        got: usize,
        /// Minimum required time instants.
        min: usize,
    },

    /// Every row of the input is entirely missing (NaN).
    AllMissing,

    /// Regularization parameter alpha must be a positive finite number.
    InvalidAlpha(f64),

    /// Candidate grid for alpha must contain at least one value.
    EmptyAlphaGrid,

    /// Retention threshold must be strictly between 0 and 1.
    InvalidRetainThreshold(f64),

    /// Number of retained components must be in `[1, m]` where `m` is the
    /// number of evaluation points.
    InvalidComponentCount {
        /// The component count provided.
        got: usize,
        /// Maximum admissible count (number of evaluation points).
        max: usize,
    },

    /// Candidate grid for the component count must contain at least one value.
    EmptyComponentGrid,

    /// Early-stopping tolerance must be positive and finite.
    InvalidTolerance(f64),

    /// Function domain must satisfy `left < right` with finite endpoints.
    InvalidDomain {
        /// Left endpoint.
        left: f64,
        /// Right endpoint.
        right: f64,
    },

    /// A mesh needs at least one element.
    InvalidMesh {
        /// Number of elements requested.
        elements: usize,
    },

    /// Train window bounds must satisfy `2 <= min_train < max_train <= n`.
    InvalidWindow {
        /// Smallest training length.
        min_train: usize,
        /// One past the largest training length.
        max_train: usize,
        /// Number of time instants available.
        n: usize,
    },

    /// A matrix decomposition or regression failed on the given data.
    NumericalFailure(String),

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },

    /// Two mutually exclusive parameters were both configured.
    ConflictingParameters {
        /// Name of the first parameter.
        first: &'static str,
        /// Name of the second parameter.
        second: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for PpckoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input matrix is empty"),
            Self::RaggedInput { row, len, expected } => {
                write!(
                    f,
                    "Ragged input: row {row} has {len} time instants, expected {expected}"
                )
            }
            Self::TooFewTimePoints { got, min } => {
                write!(f, "Too few time instants: got {got}, need at least {min}")
            }
            Self::AllMissing => write!(f, "Input data are all NaNs"),
            Self::InvalidAlpha(alpha) => {
                write!(f, "Invalid alpha: {alpha} (must be positive and finite)")
            }
            Self::EmptyAlphaGrid => write!(f, "Alpha candidate grid is empty"),
            Self::InvalidRetainThreshold(tau) => {
                write!(
                    f,
                    "Invalid retention threshold: {tau} (must be > 0 and < 1)"
                )
            }
            Self::InvalidComponentCount { got, max } => {
                write!(
                    f,
                    "Invalid component count: {got} (must be between 1 and {max})"
                )
            }
            Self::EmptyComponentGrid => write!(f, "Component candidate grid is empty"),
            Self::InvalidTolerance(tol) => {
                write!(f, "Invalid tolerance: {tol} (must be > 0 and finite)")
            }
            Self::InvalidDomain { left, right } => {
                write!(f, "Invalid domain: [{left}, {right}] (must satisfy left < right)")
            }
            Self::InvalidMesh { elements } => {
                write!(f, "Invalid mesh: {elements} elements (need at least 1)")
            }
            Self::InvalidWindow {
                min_train,
                max_train,
                n,
            } => {
                write!(
                    f,
                    "Invalid train window: [{min_train}, {max_train}) with {n} time instants \
                     (must satisfy 2 <= min_train < max_train <= n)"
                )
            }
            Self::NumericalFailure(msg) => write!(f, "Numerical failure: {msg}"),
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
            Self::ConflictingParameters { first, second } => {
                write!(
                    f,
                    "Parameters '{first}' and '{second}' are mutually exclusive"
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

impl Error for PpckoError {}
