//! Execution engine for the PPC-KO predictor.
//!
//! ## Purpose
//!
//! This module owns the resolved configuration and drives a fit end to end:
//! missing-value handling, data-dependent validation, parameter selection by
//! cross-validation where requested, the final estimation, and assembly of
//! the output container.
//!
//! ## Design notes
//!
//! * The regularization parameter and the component rule are each either
//!   fixed or searched; the executor dispatches on the combination, running
//!   no cross-validation at all when both are fixed.
//! * A component search without an explicit grid resolves to the full grid
//!   `1..=m` once the number of rows is known.
//!
//! ## Invariants
//!
//! * The final estimate is always refitted on the full series with the
//!   winning parameters, never taken from a training window.
//! * Dropped row indices refer to the original input ordering.

// Internal dependencies
use crate::algorithms::estimator::{estimate, scores, ComponentRule, KoEstimate};
use crate::algorithms::imputation::{clean, MissingPolicy};
use crate::engine::output::{PpcForecast, ValidationErrors};
use crate::engine::validator::Validator;
use crate::evaluation::cv::{
    select_alpha, select_alpha_components, select_components, WindowPlan,
};
use crate::math::linalg::FloatLinalg;
use crate::math::mesh::Domain1d;
use crate::primitives::errors::PpckoError;
use crate::primitives::frame::SeriesFrame;

// ============================================================================
// Configuration
// ============================================================================

/// How the regularization parameter is chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum AlphaRule<T> {
    /// Use this value as-is.
    Fixed(T),
    /// Search this grid by cross-validation.
    Search(Vec<T>),
}

/// How the number of retained components is chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentSpec<T> {
    /// Retain exactly this many components.
    Fixed(usize),
    /// Retain enough components to reach this explanatory-power threshold.
    Threshold(T),
    /// Search a grid by cross-validation; `None` means the full grid
    /// `1..=m`, resolved once the data is seen.
    Search(Option<Vec<usize>>),
}

/// Fully resolved configuration, produced by the builder in the API layer.
#[derive(Debug, Clone, PartialEq)]
pub struct PpckoConfig<T> {
    /// Regularization rule.
    pub alpha: AlphaRule<T>,
    /// Component retention rule.
    pub components: ComponentSpec<T>,
    /// Missing-value replacement policy.
    pub missing_policy: MissingPolicy,
    /// Smallest cross-validation training size; `None` for the default
    /// `ceil(n / 2)`.
    pub min_train: Option<usize>,
    /// Largest cross-validation training size (exclusive); `None` for `n`.
    pub max_train: Option<usize>,
    /// Stopping tolerance of the component search, relative to the trace of
    /// the covariance estimator.
    pub tolerance: T,
    /// Function domain of the snapshots.
    pub domain: Domain1d<T>,
    /// Number of trapezoid elements used for score integration.
    pub integration_elements: usize,
    /// Whether to keep the cross-validation error tracks in the output.
    pub return_validation_errors: bool,
}

// ============================================================================
// Executor
// ============================================================================

/// Drives a fit with a resolved [`PpckoConfig`].
#[derive(Debug, Clone)]
pub struct PpckoExecutor<T> {
    config: PpckoConfig<T>,
}

impl<T: FloatLinalg> PpckoExecutor<T> {
    pub fn new(config: PpckoConfig<T>) -> Self {
        PpckoExecutor { config }
    }

    /// Fit the predictor on `rows` (one evaluation point per row, one time
    /// instant per column) and forecast the next snapshot.
    pub fn fit(&self, rows: &[Vec<T>]) -> Result<PpcForecast<T>, PpckoError> {
        let frame = SeriesFrame::from_rows(rows)?;
        let (frame, dropped_rows) = clean(&frame, self.config.missing_policy)?;
        Validator::validate_frame_shape(frame.rows(), frame.cols())?;
        let m = frame.rows();

        // Data-dependent parameter checks.
        match &self.config.components {
            ComponentSpec::Fixed(k) => Validator::validate_components(*k, m)?,
            ComponentSpec::Search(Some(grid)) => Validator::validate_component_grid(grid, m)?,
            ComponentSpec::Search(None) | ComponentSpec::Threshold(_) => {}
        }

        let (fit, errors, best_error) = self.dispatch(&frame)?;
        let score_values = scores(&fit, self.config.domain, self.config.integration_elements)?;

        let split = |flat: &[T]| -> Vec<Vec<T>> {
            flat.chunks(m).map(|c| c.to_vec()).collect()
        };
        Ok(PpcForecast {
            forecast: fit.forecast.clone(),
            alpha_used: fit.alpha,
            components_used: fit.components,
            scores: score_values,
            explanatory_power: fit.explanatory_power.clone(),
            loadings: split(&fit.loadings),
            weights: split(&fit.weights),
            means: fit.means.clone(),
            dropped_rows,
            validation_errors: if self.config.return_validation_errors {
                errors
            } else {
                None
            },
            best_validation_error: best_error,
        })
    }

    /// Run the search matching the configured rules, then refit on the full
    /// series with the winning parameters.
    fn dispatch(
        &self,
        frame: &SeriesFrame<T>,
    ) -> Result<(KoEstimate<T>, Option<ValidationErrors<T>>, Option<T>), PpckoError> {
        let m = frame.rows();
        let n = frame.cols();
        let plan = || WindowPlan::resolve(self.config.min_train, self.config.max_train, n);
        let full_grid = || (1..=m).collect::<Vec<usize>>();

        match (&self.config.alpha, &self.config.components) {
            (AlphaRule::Fixed(alpha), ComponentSpec::Fixed(k)) => {
                let fit = estimate(frame, *alpha, &ComponentRule::Fixed(*k))?;
                Ok((fit, None, None))
            }
            (AlphaRule::Fixed(alpha), ComponentSpec::Threshold(tau)) => {
                let fit = estimate(frame, *alpha, &ComponentRule::Threshold(*tau))?;
                Ok((fit, None, None))
            }
            (AlphaRule::Fixed(alpha), ComponentSpec::Search(grid)) => {
                let grid = grid.clone().unwrap_or_else(full_grid);
                let sel =
                    select_components(frame, *alpha, &grid, self.config.tolerance, &plan()?)?;
                let fit = estimate(frame, *alpha, &ComponentRule::Fixed(sel.best_components))?;
                Ok((
                    fit,
                    Some(ValidationErrors::PerComponent(sel.errors)),
                    Some(sel.best_error),
                ))
            }
            (AlphaRule::Search(alphas), ComponentSpec::Fixed(k)) => {
                let rule = ComponentRule::Fixed(*k);
                let sel = select_alpha(frame, alphas, &rule, &plan()?)?;
                let fit = estimate(frame, sel.best_alpha, &rule)?;
                Ok((
                    fit,
                    Some(ValidationErrors::PerAlpha(sel.errors)),
                    Some(sel.best_error),
                ))
            }
            (AlphaRule::Search(alphas), ComponentSpec::Threshold(tau)) => {
                let rule = ComponentRule::Threshold(*tau);
                let sel = select_alpha(frame, alphas, &rule, &plan()?)?;
                let fit = estimate(frame, sel.best_alpha, &rule)?;
                Ok((
                    fit,
                    Some(ValidationErrors::PerAlpha(sel.errors)),
                    Some(sel.best_error),
                ))
            }
            (AlphaRule::Search(alphas), ComponentSpec::Search(grid)) => {
                let grid = grid.clone().unwrap_or_else(full_grid);
                let sel = select_alpha_components(
                    frame,
                    alphas,
                    &grid,
                    self.config.tolerance,
                    &plan()?,
                )?;
                let fit = estimate(
                    frame,
                    sel.best_alpha,
                    &ComponentRule::Fixed(sel.best_components),
                )?;
                Ok((
                    fit,
                    Some(ValidationErrors::PerPair(sel.errors)),
                    Some(sel.best_error),
                ))
            }
        }
    }
}
