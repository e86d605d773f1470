//! Output container for PPC-KO results.
//!
//! ## Purpose
//!
//! This module defines the structured result returned by a fit: the forecast
//! itself plus the selected parameters, diagnostics, and optional
//! cross-validation error tracks.
//!
//! ## Design notes
//!
//! * All fields are public for direct access.
//! * The `Display` implementation renders a compact summary followed by the
//!   forecast values, for quick inspection in logs or a REPL.

// Standard library dependencies
use std::fmt;

// External dependencies
use num_traits::Float;

// ============================================================================
// Validation Error Tracks
// ============================================================================

/// Cross-validation error tracks, shaped after the search that produced them.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationErrors<T> {
    /// Mean validation error per alpha candidate.
    PerAlpha(Vec<T>),
    /// Mean validation error per visited component candidate.
    PerComponent(Vec<T>),
    /// One component-search track per alpha candidate.
    PerPair(Vec<Vec<T>>),
}

// ============================================================================
// Forecast
// ============================================================================

/// Result of a PPC-KO fit.
#[derive(Debug, Clone, PartialEq)]
pub struct PpcForecast<T> {
    /// One-step-ahead forecast, one value per kept row.
    pub forecast: Vec<T>,
    /// Regularization parameter used for the final fit.
    pub alpha_used: T,
    /// Number of principal predictive components retained.
    pub components_used: usize,
    /// Scores of the last snapshot along the retained loadings.
    pub scores: Vec<T>,
    /// Cumulative explanatory power of the retained components.
    pub explanatory_power: Vec<T>,
    /// Predictive loadings, one vector per retained component.
    pub loadings: Vec<Vec<T>>,
    /// Predictive weights, one vector per retained component.
    pub weights: Vec<Vec<T>>,
    /// Per-row means removed before estimation.
    pub means: Vec<T>,
    /// Indices of input rows dropped because every entry was missing.
    pub dropped_rows: Vec<usize>,
    /// Cross-validation error tracks, when requested.
    pub validation_errors: Option<ValidationErrors<T>>,
    /// Validation error of the winning candidate, when a search ran.
    pub best_validation_error: Option<T>,
}

impl<T: Float + fmt::Display> fmt::Display for PpcForecast<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PPC-KO forecast")?;
        writeln!(
            f,
            "  alpha: {}, components: {}",
            self.alpha_used, self.components_used
        )?;
        if let Some(&power) = self.explanatory_power.last() {
            writeln!(f, "  explanatory power: {}", power)?;
        }
        if let Some(err) = self.best_validation_error {
            writeln!(f, "  validation error: {}", err)?;
        }
        if !self.dropped_rows.is_empty() {
            writeln!(f, "  dropped rows: {:?}", self.dropped_rows)?;
        }
        writeln!(f, "  forecast ({} points):", self.forecast.len())?;
        for (i, value) in self.forecast.iter().enumerate() {
            writeln!(f, "    [{}] {}", i, value)?;
        }
        Ok(())
    }
}
