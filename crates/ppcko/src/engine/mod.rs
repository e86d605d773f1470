//! Engine layer.
//!
//! Orchestration of a fit: validation, mode dispatch, and output assembly.
//! The engine consumes a resolved configuration produced by the API layer
//! and delegates the numerics to the algorithm and evaluation layers.

pub mod executor;
pub mod output;
pub mod validator;
