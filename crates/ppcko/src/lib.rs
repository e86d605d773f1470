//! # PPC-KO — Principal Predictive Components forecasting for Rust
//!
//! One-step-ahead forecasting of functional time series with the
//! Kargin-Onatski (KO) estimator of the autoregressive predictor.
//!
//! ## What is PPC-KO?
//!
//! A functional time series is a sequence of curves, each observed on a
//! common grid of evaluation points. PPC-KO models the sequence as a
//! functional autoregressive process of order one and estimates the
//! principal predictive components of its operator: the directions along
//! which the past is most informative about the future. The forecast is the
//! estimated operator applied to the last observed curve.
//!
//! The estimator is regularized by a ridge term on the covariance; both the
//! regularization parameter and the number of retained components can be
//! fixed, derived from an explanatory-power threshold, or selected by
//! expanding-window cross-validation.
//!
//! ## Quick Start
//!
//! ```rust
//! use ppcko::prelude::*;
//!
//! // One row per evaluation point, one column per time instant.
//! let data = vec![
//!     vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
//!     vec![2.0, 4.0, 6.0, 8.0, 10.0, 12.0],
//!     vec![0.5, 1.0, 1.5, 2.0, 2.5, 3.0],
//! ];
//!
//! // Build the model
//! let model = Ppcko::new()
//!     .alpha(0.75)            // Ridge regularization parameter
//!     .retain_threshold(0.95) // Keep 95% of explanatory power
//!     .build()?;
//!
//! // Fit and forecast the next curve
//! let result = model.fit(&data)?;
//!
//! println!("{}", result);
//! # Result::<(), PpckoError>::Ok(())
//! ```
//!
//! ## Parameter Selection
//!
//! ```rust
//! use ppcko::prelude::*;
//! # let data = vec![
//! #     vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
//! #     vec![2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0],
//! # ];
//!
//! // Cross-validate the regularization parameter and the number of
//! // components jointly over an expanding window.
//! let model = Ppcko::new()
//!     .search_alpha()
//!     .search_components()
//!     .return_validation_errors()
//!     .build()?;
//!
//! let result = model.fit(&data)?;
//! println!("alpha = {}, k = {}", result.alpha_used, result.components_used);
//! # Result::<(), PpckoError>::Ok(())
//! ```
//!
//! ## Stationarity Checking
//!
//! The KO estimator assumes stationarity. The [`adf_pvalues`] helper runs
//! the Augmented Dickey-Fuller test on every row so non-stationary inputs
//! can be caught before fitting:
//!
//! ```rust
//! use ppcko::prelude::*;
//! # let data = vec![vec![1.0, -1.2, 0.9, -1.1, 1.0, -0.8, 1.1, -1.0, 0.9, -1.1]];
//!
//! let pvalues = adf_pvalues(&data, 0)?;
//! # Result::<(), PpckoError>::Ok(())
//! ```
//!
//! ## Result and Error Handling
//!
//! The `fit` method returns a `Result<PpcForecast<T>, PpckoError>`.
//!
//! - **`Ok(PpcForecast<T>)`**: Contains the forecast, the selected
//!   parameters, scores, loadings, and optional validation error tracks.
//! - **`Err(PpckoError)`**: Indicates a failure (e.g., ragged input, too few
//!   time instants, invalid parameters).
//!
//! [`adf_pvalues`]: crate::prelude::adf_pvalues
//!
//! ## References
//!
//! - Kargin, V., Onatski, A. (2008). "Curve forecasting by functional
//!   autoregression"
//!
//! ## License
//!
//! See the repository for license information and contribution guidelines.

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - pure mathematical functions.
mod math;

// Layer 3: Algorithms - core PPC-KO algorithms.
mod algorithms;

// Layer 4: Evaluation - cross-validation for parameter selection.
mod evaluation;

// Layer 5: Engine - orchestration and execution control.
mod engine;

// High-level fluent API for PPC-KO forecasting.
mod api;

// Standard PPC-KO prelude.
pub mod prelude {
    pub use crate::api::{
        adf_pvalues, default_alpha_grid,
        MissingPolicy::MeanReplace,
        MissingPolicy::ZeroReplace,
        PpcForecast, PpckoBuilder as Ppcko, PpckoError, PpckoModel, ValidationErrors,
    };
    pub use crate::api::MissingPolicy;
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
