//! Evaluation layer.
//!
//! Expanding-window cross-validation used to pick the regularization
//! parameter and the number of retained components.

pub mod cv;
