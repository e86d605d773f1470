//! Algorithm layer.
//!
//! Domain-specific building blocks of the predictor: missing-value handling,
//! the Kargin-Onatski estimator itself, and the pointwise ADF stationarity
//! test. Everything here operates on [`SeriesFrame`] values prepared by the
//! primitives layer and leans on the math layer for numerics.
//!
//! [`SeriesFrame`]: crate::primitives::frame::SeriesFrame

pub mod estimator;
pub mod imputation;
pub mod stationarity;
