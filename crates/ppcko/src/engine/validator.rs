//! Input validation for PPC-KO configuration and data.
//!
//! ## Purpose
//!
//! This module provides validation functions for the predictor configuration
//! and input data. It checks parameter bounds, grid contents, and window
//! consistency before any numerics run.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Two phases**: Parameter checks run at build time; data-dependent
//!   checks (component counts against the number of rows, windows against
//!   the number of instants) run at fit time.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective mathematical constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not sort, transform, or filter input data.
//! * This module does not provide automatic correction of invalid inputs.
//! * This module does not perform the estimation itself.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::PpckoError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for PPC-KO configuration and input data.
///
/// Provides static methods for validating parameters and data. All methods
/// return `Result<(), PpckoError>` and fail fast upon identifying the first
/// violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate a fixed regularization parameter.
    pub fn validate_alpha<T: Float>(alpha: T) -> Result<(), PpckoError> {
        if !alpha.is_finite() || alpha <= T::zero() {
            return Err(PpckoError::InvalidAlpha(
                alpha.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate a regularization search grid: non-empty, every entry finite
    /// and strictly positive.
    pub fn validate_alpha_grid<T: Float>(grid: &[T]) -> Result<(), PpckoError> {
        if grid.is_empty() {
            return Err(PpckoError::EmptyAlphaGrid);
        }
        for &alpha in grid {
            Self::validate_alpha(alpha)?;
        }
        Ok(())
    }

    /// Validate the explanatory-power retention threshold.
    pub fn validate_retain_threshold<T: Float>(threshold: T) -> Result<(), PpckoError> {
        if !threshold.is_finite() || threshold <= T::zero() || threshold >= T::one() {
            return Err(PpckoError::InvalidRetainThreshold(
                threshold.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate a fixed component count against the number of rows.
    pub fn validate_components(components: usize, max: usize) -> Result<(), PpckoError> {
        if components == 0 || components > max {
            return Err(PpckoError::InvalidComponentCount {
                got: components,
                max,
            });
        }
        Ok(())
    }

    /// Validate a component search grid against the number of rows.
    pub fn validate_component_grid(grid: &[usize], max: usize) -> Result<(), PpckoError> {
        if grid.is_empty() {
            return Err(PpckoError::EmptyComponentGrid);
        }
        for &k in grid {
            Self::validate_components(k, max)?;
        }
        Ok(())
    }

    /// Validate the component-search stopping tolerance.
    pub fn validate_tolerance<T: Float>(tolerance: T) -> Result<(), PpckoError> {
        if !tolerance.is_finite() || tolerance <= T::zero() {
            return Err(PpckoError::InvalidTolerance(
                tolerance.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the number of integration elements.
    pub fn validate_integration_points(elements: usize) -> Result<(), PpckoError> {
        if elements == 0 {
            return Err(PpckoError::InvalidMesh { elements });
        }
        Ok(())
    }

    // ========================================================================
    // Data Validation
    // ========================================================================

    /// Validate the cleaned series frame ahead of estimation.
    pub fn validate_frame_shape(rows: usize, cols: usize) -> Result<(), PpckoError> {
        if rows == 0 || cols == 0 {
            return Err(PpckoError::EmptyInput);
        }
        if cols < 2 {
            return Err(PpckoError::TooFewTimePoints { got: cols, min: 2 });
        }
        Ok(())
    }
}
