//! Expanding-window cross-validation for parameter selection.
//!
//! ## Purpose
//!
//! This module selects the regularization parameter, the number of retained
//! components, or both, by augmenting-window cross-validation: for each
//! training size `i` in the window plan, the predictor is fitted on the first
//! `i` time instants and scored against instant `i` with the mean squared
//! error.
//!
//! ## Design notes
//!
//! * The alpha search is embarrassingly parallel across candidates and runs
//!   through `rayon` when the `parallel` feature is enabled.
//! * The component search walks candidates in ascending order and stops early
//!   once the validation error stops moving by more than a tolerance scaled
//!   with the trace of the covariance estimator. The stop compares
//!   consecutive errors only, so a small error on the very first candidate
//!   never ends the walk by itself.
//! * The joint search runs one component search per alpha candidate and keeps
//!   the best pair.
//!
//! ## Invariants
//!
//! * `2 <= min_train < max_train <= n` for every window plan.
//! * A training window that fails to fit contributes an infinite error
//!   instead of aborting the whole search.
//! * Ties between candidates resolve to the first (smallest) one.

// External dependencies
use num_traits::Float;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Internal dependencies
use crate::algorithms::estimator::{centered_trace, estimate, ComponentRule};
use crate::math::linalg::FloatLinalg;
use crate::math::metrics::mse;
use crate::primitives::errors::PpckoError;
use crate::primitives::frame::SeriesFrame;

// ============================================================================
// Window Plan
// ============================================================================

/// Training sizes used by the expanding window.
///
/// Each split trains on the first `i` time instants and validates on instant
/// `i`, for `i` in `min_train..max_train`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPlan {
    /// Smallest training size (inclusive).
    pub min_train: usize,
    /// Largest training size (exclusive); the last validated instant is
    /// `max_train - 1`.
    pub max_train: usize,
}

impl WindowPlan {
    /// Resolve an optionally user-supplied window against `n` time instants.
    ///
    /// Defaults to training on at least half of the series and validating up
    /// to the last instant.
    pub fn resolve(
        min_train: Option<usize>,
        max_train: Option<usize>,
        n: usize,
    ) -> Result<Self, PpckoError> {
        let min = min_train.unwrap_or_else(|| n.div_ceil(2));
        let max = max_train.unwrap_or(n);
        if min < 2 || min >= max || max > n {
            return Err(PpckoError::InvalidWindow {
                min_train: min,
                max_train: max,
                n,
            });
        }
        Ok(WindowPlan {
            min_train: min,
            max_train: max,
        })
    }

    /// Training sizes, in ascending order.
    pub fn splits(&self) -> std::ops::Range<usize> {
        self.min_train..self.max_train
    }

    /// Number of validation splits. Always positive for a resolved plan.
    pub fn len(&self) -> usize {
        self.max_train - self.min_train
    }
}

// ============================================================================
// Selection Outcomes
// ============================================================================

/// Result of the alpha search.
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaSelection<T> {
    /// Candidate with the smallest mean validation error.
    pub best_alpha: T,
    /// Mean validation error per candidate, aligned with the input grid.
    pub errors: Vec<T>,
    /// Error of the winning candidate.
    pub best_error: T,
}

/// Result of the component search.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSelection<T> {
    /// Candidate with the smallest mean validation error.
    pub best_components: usize,
    /// Mean validation error per visited candidate; shorter than the grid
    /// when the search stopped early.
    pub errors: Vec<T>,
    /// Error of the winning candidate.
    pub best_error: T,
}

/// Result of the joint alpha and component search.
#[derive(Debug, Clone, PartialEq)]
pub struct PairSelection<T> {
    /// Winning regularization parameter.
    pub best_alpha: T,
    /// Winning number of components.
    pub best_components: usize,
    /// Per-alpha component-search error tracks, aligned with the alpha grid.
    pub errors: Vec<Vec<T>>,
    /// Error of the winning pair.
    pub best_error: T,
}

// ============================================================================
// Searches
// ============================================================================

/// Select the regularization parameter from `grid` by expanding-window CV.
pub fn select_alpha<T: FloatLinalg>(
    frame: &SeriesFrame<T>,
    grid: &[T],
    rule: &ComponentRule<T>,
    plan: &WindowPlan,
) -> Result<AlphaSelection<T>, PpckoError> {
    if grid.is_empty() {
        return Err(PpckoError::EmptyAlphaGrid);
    }

    #[cfg(feature = "parallel")]
    let errors: Vec<T> = grid
        .par_iter()
        .map(|&alpha| mean_window_error(frame, alpha, rule, plan))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let errors: Vec<T> = grid
        .iter()
        .map(|&alpha| mean_window_error(frame, alpha, rule, plan))
        .collect();

    let best = argmin(&errors);
    Ok(AlphaSelection {
        best_alpha: grid[best],
        best_error: errors[best],
        errors,
    })
}

/// Select the number of components from `grid` by expanding-window CV with a
/// fixed regularization parameter.
///
/// Candidates are visited in ascending order and the walk stops once the
/// error changes by less than `tolerance` times the trace of the covariance
/// estimator, so large grids do not force a full sweep.
pub fn select_components<T: FloatLinalg>(
    frame: &SeriesFrame<T>,
    alpha: T,
    grid: &[usize],
    tolerance: T,
    plan: &WindowPlan,
) -> Result<ComponentSelection<T>, PpckoError> {
    if grid.is_empty() {
        return Err(PpckoError::EmptyComponentGrid);
    }

    let scaled_tol = tolerance * centered_trace(frame);
    let mut errors: Vec<T> = Vec::with_capacity(grid.len());
    for &k in grid {
        let rule = ComponentRule::Fixed(k);
        errors.push(mean_window_error(frame, alpha, &rule, plan));
        let len = errors.len();
        if len > 1 && (errors[len - 1] - errors[len - 2]).abs() < scaled_tol {
            break;
        }
    }

    let best = argmin(&errors);
    Ok(ComponentSelection {
        best_components: grid[best],
        best_error: errors[best],
        errors,
    })
}

/// Select the regularization parameter and the number of components jointly.
pub fn select_alpha_components<T: FloatLinalg>(
    frame: &SeriesFrame<T>,
    alpha_grid: &[T],
    component_grid: &[usize],
    tolerance: T,
    plan: &WindowPlan,
) -> Result<PairSelection<T>, PpckoError> {
    if alpha_grid.is_empty() {
        return Err(PpckoError::EmptyAlphaGrid);
    }

    #[cfg(feature = "parallel")]
    let per_alpha: Vec<ComponentSelection<T>> = alpha_grid
        .par_iter()
        .map(|&alpha| select_components(frame, alpha, component_grid, tolerance, plan))
        .collect::<Result<_, _>>()?;
    #[cfg(not(feature = "parallel"))]
    let per_alpha: Vec<ComponentSelection<T>> = alpha_grid
        .iter()
        .map(|&alpha| select_components(frame, alpha, component_grid, tolerance, plan))
        .collect::<Result<_, _>>()?;

    let best_errors: Vec<T> = per_alpha.iter().map(|s| s.best_error).collect();
    let best = argmin(&best_errors);
    Ok(PairSelection {
        best_alpha: alpha_grid[best],
        best_components: per_alpha[best].best_components,
        best_error: per_alpha[best].best_error,
        errors: per_alpha.into_iter().map(|s| s.errors).collect(),
    })
}

// ============================================================================
// Helpers
// ============================================================================

/// Mean validation error of one candidate over all splits of `plan`.
fn mean_window_error<T: FloatLinalg>(
    frame: &SeriesFrame<T>,
    alpha: T,
    rule: &ComponentRule<T>,
    plan: &WindowPlan,
) -> T {
    let mut sum = T::zero();
    for train in plan.splits() {
        sum = sum + window_error(frame, train, alpha, rule);
    }
    sum / T::from(plan.len()).unwrap()
}

/// Validation error of one split: fit on the first `train` instants, score
/// the forecast against instant `train`. Fit failures count as infinite.
fn window_error<T: FloatLinalg>(
    frame: &SeriesFrame<T>,
    train: usize,
    alpha: T,
    rule: &ComponentRule<T>,
) -> T {
    let head = frame.head_cols(train);
    match estimate(&head, alpha, rule) {
        Ok(fit) => mse(&fit.forecast, frame.col(train)),
        Err(_) => T::infinity(),
    }
}

/// Index of the smallest error, first on ties. NaNs never win.
fn argmin<T: Float>(errors: &[T]) -> usize {
    let mut best = 0;
    for (i, &e) in errors.iter().enumerate().skip(1) {
        if e < errors[best] {
            best = i;
        }
    }
    best
}
