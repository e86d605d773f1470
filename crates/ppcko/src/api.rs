//! High-level API for PPC-KO forecasting.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point for the
//! predictor. It implements a fluent builder for configuring the
//! regularization and component-retention rules, validates the configuration,
//! and produces a ready-to-fit model.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Deferred errors**: Setter misuse (duplicate or conflicting calls) is
//!   recorded and reported from `.build()`, keeping the chain infallible.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`PpckoBuilder`] via `Ppcko::new()`.
//! 2. Chain configuration methods (`.alpha()`, `.retain_threshold()`, etc.).
//! 3. Call `.build()` to validate and obtain a [`PpckoModel`].
//! 4. Call `.fit(&data)` with one row per evaluation point.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::stationarity;
use crate::engine::executor::{AlphaRule, ComponentSpec, PpckoConfig, PpckoExecutor};
use crate::engine::validator::Validator;
use crate::math::linalg::FloatLinalg;
use crate::math::mesh::Domain1d;
use crate::primitives::frame::SeriesFrame;

// Publicly re-exported types
pub use crate::algorithms::imputation::MissingPolicy;
pub use crate::engine::output::{PpcForecast, ValidationErrors};
pub use crate::primitives::errors::PpckoError;

// ============================================================================
// Defaults
// ============================================================================

/// Default regularization parameter when neither a value nor a search is
/// requested.
pub const DEFAULT_ALPHA: f64 = 0.75;

/// Default explanatory-power retention threshold.
pub const DEFAULT_RETAIN_THRESHOLD: f64 = 0.95;

/// Default relative stopping tolerance of the component search.
pub const DEFAULT_TOLERANCE: f64 = 1.0e-4;

/// Default number of trapezoid elements for score integration.
pub const DEFAULT_INTEGRATION_POINTS: usize = 250;

/// Default regularization search grid: powers of ten from `1e-10` to `1e10`.
pub fn default_alpha_grid<T: Float>() -> Vec<T> {
    (-10..=10)
        .map(|e| T::from(10.0f64.powi(e)).unwrap())
        .collect()
}

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring the PPC-KO predictor.
#[derive(Debug, Clone)]
pub struct PpckoBuilder<T> {
    /// Fixed regularization parameter.
    pub alpha: Option<T>,

    /// Candidate regularization parameters for cross-validation.
    pub alpha_grid: Option<Vec<T>>,

    /// Fixed number of retained components.
    pub components: Option<usize>,

    /// Explanatory-power retention threshold.
    pub retain_threshold: Option<T>,

    /// Candidate component counts for cross-validation; inner `None` means
    /// the full grid `1..=m`.
    pub component_grid: Option<Option<Vec<usize>>>,

    /// Missing-value replacement policy.
    pub missing_policy: Option<MissingPolicy>,

    /// Smallest cross-validation training size.
    pub min_train: Option<usize>,

    /// Largest cross-validation training size (exclusive).
    pub max_train: Option<usize>,

    /// Stopping tolerance of the component search.
    pub tolerance: Option<T>,

    /// Function domain of the snapshots.
    pub domain: Option<(T, T)>,

    /// Number of trapezoid elements for score integration.
    pub integration_points: Option<usize>,

    /// Keep cross-validation error tracks in the output.
    pub return_validation_errors: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,

    /// Tracks mutually exclusive parameters set together (for validation).
    #[doc(hidden)]
    pub conflicting_params: Option<(&'static str, &'static str)>,
}

impl<T: FloatLinalg> Default for PpckoBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatLinalg> PpckoBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            alpha: None,
            alpha_grid: None,
            components: None,
            retain_threshold: None,
            component_grid: None,
            missing_policy: None,
            min_train: None,
            max_train: None,
            tolerance: None,
            domain: None,
            integration_points: None,
            return_validation_errors: None,
            duplicate_param: None,
            conflicting_params: None,
        }
    }

    fn conflict(&mut self, first: &'static str, second: &'static str) {
        if self.conflicting_params.is_none() {
            self.conflicting_params = Some((first, second));
        }
    }

    /// Set a fixed regularization parameter (no cross-validation over alpha).
    pub fn alpha(mut self, alpha: T) -> Self {
        if self.alpha.is_some() {
            self.duplicate_param = Some("alpha");
        }
        if self.alpha_grid.is_some() {
            self.conflict("alpha_grid", "alpha");
        }
        self.alpha = Some(alpha);
        self
    }

    /// Cross-validate the regularization parameter over the default grid of
    /// powers of ten.
    pub fn search_alpha(mut self) -> Self {
        if self.alpha_grid.is_some() {
            self.duplicate_param = Some("alpha_grid");
        }
        if self.alpha.is_some() {
            self.conflict("alpha", "search_alpha");
        }
        self.alpha_grid = Some(default_alpha_grid());
        self
    }

    /// Cross-validate the regularization parameter over an explicit grid.
    pub fn alpha_grid(mut self, grid: Vec<T>) -> Self {
        if self.alpha_grid.is_some() {
            self.duplicate_param = Some("alpha_grid");
        }
        if self.alpha.is_some() {
            self.conflict("alpha", "alpha_grid");
        }
        self.alpha_grid = Some(grid);
        self
    }

    /// Retain a fixed number of principal predictive components.
    pub fn components(mut self, components: usize) -> Self {
        if self.components.is_some() {
            self.duplicate_param = Some("components");
        }
        if self.retain_threshold.is_some() {
            self.conflict("retain_threshold", "components");
        }
        if self.component_grid.is_some() {
            self.conflict("component_grid", "components");
        }
        self.components = Some(components);
        self
    }

    /// Retain enough components to reach this cumulative explanatory-power
    /// threshold (strictly between 0 and 1).
    pub fn retain_threshold(mut self, threshold: T) -> Self {
        if self.retain_threshold.is_some() {
            self.duplicate_param = Some("retain_threshold");
        }
        if self.components.is_some() {
            self.conflict("components", "retain_threshold");
        }
        if self.component_grid.is_some() {
            self.conflict("component_grid", "retain_threshold");
        }
        self.retain_threshold = Some(threshold);
        self
    }

    /// Cross-validate the number of components over the full grid `1..=m`.
    pub fn search_components(mut self) -> Self {
        if self.component_grid.is_some() {
            self.duplicate_param = Some("component_grid");
        }
        if self.components.is_some() {
            self.conflict("components", "search_components");
        }
        if self.retain_threshold.is_some() {
            self.conflict("retain_threshold", "search_components");
        }
        self.component_grid = Some(None);
        self
    }

    /// Cross-validate the number of components over an explicit grid.
    pub fn component_grid(mut self, grid: Vec<usize>) -> Self {
        if self.component_grid.is_some() {
            self.duplicate_param = Some("component_grid");
        }
        if self.components.is_some() {
            self.conflict("components", "component_grid");
        }
        if self.retain_threshold.is_some() {
            self.conflict("retain_threshold", "component_grid");
        }
        self.component_grid = Some(Some(grid));
        self
    }

    /// Set the missing-value replacement policy.
    pub fn missing_policy(mut self, policy: MissingPolicy) -> Self {
        if self.missing_policy.is_some() {
            self.duplicate_param = Some("missing_policy");
        }
        self.missing_policy = Some(policy);
        self
    }

    /// Set the cross-validation training window: train on `min_train..max_train`
    /// instants, validating each time on the next one.
    pub fn train_window(mut self, min_train: usize, max_train: usize) -> Self {
        if self.min_train.is_some() {
            self.duplicate_param = Some("train_window");
        }
        self.min_train = Some(min_train);
        self.max_train = Some(max_train);
        self
    }

    /// Set the stopping tolerance of the component search, relative to the
    /// trace of the covariance estimator.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        if self.tolerance.is_some() {
            self.duplicate_param = Some("tolerance");
        }
        self.tolerance = Some(tolerance);
        self
    }

    /// Set the function domain of the snapshots. Defaults to `[0, 1]`.
    pub fn domain(mut self, left: T, right: T) -> Self {
        if self.domain.is_some() {
            self.duplicate_param = Some("domain");
        }
        self.domain = Some((left, right));
        self
    }

    /// Set the number of trapezoid elements used for score integration.
    pub fn integration_points(mut self, elements: usize) -> Self {
        if self.integration_points.is_some() {
            self.duplicate_param = Some("integration_points");
        }
        self.integration_points = Some(elements);
        self
    }

    /// Keep the cross-validation error tracks in the output.
    pub fn return_validation_errors(mut self) -> Self {
        if self.return_validation_errors.is_some() {
            self.duplicate_param = Some("return_validation_errors");
        }
        self.return_validation_errors = Some(true);
        self
    }

    /// Validate the configuration and produce a ready-to-fit model.
    pub fn build(self) -> Result<PpckoModel<T>, PpckoError> {
        if let Some(parameter) = self.duplicate_param {
            return Err(PpckoError::DuplicateParameter { parameter });
        }
        if let Some((first, second)) = self.conflicting_params {
            return Err(PpckoError::ConflictingParameters { first, second });
        }

        let alpha = match (self.alpha, self.alpha_grid) {
            (Some(alpha), None) => {
                Validator::validate_alpha(alpha)?;
                AlphaRule::Fixed(alpha)
            }
            (None, Some(mut grid)) => {
                Validator::validate_alpha_grid(&grid)?;
                grid.sort_by(|a, b| a.partial_cmp(b).unwrap());
                AlphaRule::Search(grid)
            }
            // Exclusivity is enforced by the setters.
            _ => AlphaRule::Fixed(T::from(DEFAULT_ALPHA).unwrap()),
        };

        let components = match (self.components, self.retain_threshold, self.component_grid) {
            (Some(k), None, None) => {
                // The upper bound depends on the data; checked again at fit.
                Validator::validate_components(k, usize::MAX)?;
                ComponentSpec::Fixed(k)
            }
            (None, Some(threshold), None) => {
                Validator::validate_retain_threshold(threshold)?;
                ComponentSpec::Threshold(threshold)
            }
            (None, None, Some(Some(mut grid))) => {
                Validator::validate_component_grid(&grid, usize::MAX)?;
                grid.sort_unstable();
                ComponentSpec::Search(Some(grid))
            }
            (None, None, Some(None)) => ComponentSpec::Search(None),
            _ => ComponentSpec::Threshold(T::from(DEFAULT_RETAIN_THRESHOLD).unwrap()),
        };

        let tolerance = match self.tolerance {
            Some(tolerance) => {
                Validator::validate_tolerance(tolerance)?;
                tolerance
            }
            None => T::from(DEFAULT_TOLERANCE).unwrap(),
        };

        let domain = match self.domain {
            Some((left, right)) => Domain1d::new(left, right)?,
            None => Domain1d::default(),
        };

        let integration_elements = self.integration_points.unwrap_or(DEFAULT_INTEGRATION_POINTS);
        Validator::validate_integration_points(integration_elements)?;

        let config = PpckoConfig {
            alpha,
            components,
            missing_policy: self.missing_policy.unwrap_or_default(),
            min_train: self.min_train,
            max_train: self.max_train,
            tolerance,
            domain,
            integration_elements,
            return_validation_errors: self.return_validation_errors.unwrap_or(false),
        };
        Ok(PpckoModel {
            executor: PpckoExecutor::new(config),
        })
    }
}

// ============================================================================
// Model
// ============================================================================

/// Validated PPC-KO model, ready to fit.
#[derive(Debug, Clone)]
pub struct PpckoModel<T> {
    executor: PpckoExecutor<T>,
}

impl<T: FloatLinalg> PpckoModel<T> {
    /// Fit on `data` (one row per evaluation point, one column per time
    /// instant) and forecast the next snapshot.
    pub fn fit(&self, data: &[Vec<T>]) -> Result<PpcForecast<T>, PpckoError> {
        self.executor.fit(data)
    }
}

// ============================================================================
// Stationarity
// ============================================================================

/// ADF p-values for every row of `data`, using `lag` lagged differences.
///
/// A convenience check to run before fitting: small p-values reject the
/// unit-root hypothesis for the corresponding row.
pub fn adf_pvalues<T: FloatLinalg>(data: &[Vec<T>], lag: usize) -> Result<Vec<T>, PpckoError> {
    let frame = SeriesFrame::from_rows(data)?;
    stationarity::adf_pvalues(&frame, lag)
}
