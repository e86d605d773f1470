//! Error metrics for validation scoring.
//!
//! Mean squared error between a forecast and the realized snapshot, used by
//! the expanding-window cross-validation to score candidate parameters.

// External dependencies
use num_traits::Float;

/// Mean squared error between two equally long slices.
///
/// Returns infinity for empty input so that degenerate folds never win a
/// parameter search.
pub fn mse<T: Float>(prediction: &[T], actual: &[T]) -> T {
    debug_assert_eq!(prediction.len(), actual.len());
    if prediction.is_empty() {
        return T::infinity();
    }
    let mut sum = T::zero();
    for (&p, &a) in prediction.iter().zip(actual) {
        let d = p - a;
        sum = sum + d * d;
    }
    sum / T::from(prediction.len()).unwrap()
}
