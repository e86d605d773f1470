//! Tests for the public PPC-KO API.
//!
//! These tests exercise the builder, the fit entry point, and the ADF
//! convenience helper exactly as a downstream user would, through the
//! prelude only.
//!
//! ## Test Organization
//!
//! 1. **Fitting** - Forecast shape and selected parameters
//! 2. **Parameter Selection** - Cross-validation modes and error tracks
//! 3. **Missing Data** - Replacement policies and dropped rows
//! 4. **Builder Misuse** - Duplicate and conflicting parameters
//! 5. **Invalid Inputs** - Data and parameter validation
//! 6. **Stationarity** - ADF p-values

use approx::assert_relative_eq;

use ppcko::prelude::*;

/// Smooth deterministic test series: one row per evaluation point, one
/// column per time instant, with two independent modes so the covariance
/// has rank at least 2.
fn sample_data(m: usize, n: usize) -> Vec<Vec<f64>> {
    (0..m)
        .map(|i| {
            (0..n)
                .map(|t| {
                    let decay = (1.0 + 0.2 * i as f64) * 0.8f64.powi(t as i32);
                    let wiggle = 0.1 * (i as f64 + 1.0) * if t % 2 == 0 { 1.0 } else { -1.0 };
                    3.0 + decay + wiggle
                })
                .collect()
        })
        .collect()
}

// ============================================================================
// Fitting Tests
// ============================================================================

/// Fitting with defaults forecasts one value per row.
#[test]
fn test_fit_default_shape() {
    let data = sample_data(4, 10);
    let model = Ppcko::new().build().unwrap();
    let result = model.fit(&data).unwrap();

    assert_eq!(result.forecast.len(), 4);
    assert_eq!(result.means.len(), 4);
    assert!(result.forecast.iter().all(|v| v.is_finite()));
    assert!(result.dropped_rows.is_empty());
    // No search ran, so no validation errors exist.
    assert!(result.validation_errors.is_none());
    assert!(result.best_validation_error.is_none());
}

/// A fixed component count is honored exactly.
#[test]
fn test_fit_fixed_components() {
    let data = sample_data(3, 10);
    let model = Ppcko::new().alpha(0.5).components(2).build().unwrap();
    let result = model.fit(&data).unwrap();

    assert_eq!(result.components_used, 2);
    assert_eq!(result.loadings.len(), 2);
    assert_eq!(result.weights.len(), 2);
    assert_eq!(result.scores.len(), 2);
    assert_eq!(result.loadings[0].len(), 3);
}

/// Explanatory power is nondecreasing and bounded by one.
#[test]
fn test_fit_explanatory_power_monotone() {
    let data = sample_data(4, 12);
    let model = Ppcko::new().components(4).build().unwrap();
    let result = model.fit(&data).unwrap();

    for w in result.explanatory_power.windows(2) {
        assert!(w[1] >= w[0]);
    }
    let last = *result.explanatory_power.last().unwrap();
    assert!(last <= 1.0 + 1e-9);
}

/// The threshold rule retains a single component on rank-one dynamics.
#[test]
fn test_fit_threshold_rank_one() {
    // Every row is a multiple of the same decaying mode.
    let data: Vec<Vec<f64>> = (1..=3)
        .map(|i| (0..10).map(|t| i as f64 * 0.9f64.powi(t)).collect())
        .collect();
    let model = Ppcko::new().alpha(1e-8).retain_threshold(0.9).build().unwrap();
    let result = model.fit(&data).unwrap();

    assert_eq!(result.components_used, 1);
    assert_relative_eq!(result.explanatory_power[0], 1.0, epsilon = 1e-6);
}

/// A single evaluation point is valid input and fits end to end.
#[test]
fn test_fit_single_row() {
    let data: Vec<Vec<f64>> = vec![vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]];
    let model = Ppcko::new().alpha(0.75).components(1).build().unwrap();
    let result = model.fit(&data).unwrap();

    assert_eq!(result.forecast.len(), 1);
    assert_eq!(result.scores.len(), 1);
    assert!(result.forecast[0].is_finite());
    assert!(result.scores[0].is_finite());
}

/// The display output carries the headline fields.
#[test]
fn test_fit_display() {
    let data = sample_data(2, 8);
    let model = Ppcko::new().components(1).build().unwrap();
    let result = model.fit(&data).unwrap();

    let text = format!("{}", result);
    assert!(text.contains("PPC-KO forecast"));
    assert!(text.contains("components: 1"));
}

// ============================================================================
// Parameter Selection Tests
// ============================================================================

/// Searching alpha over an explicit grid reports one error per candidate.
#[test]
fn test_search_alpha_error_track() {
    let data = sample_data(3, 12);
    let grid = vec![1e-4, 1e-2, 1.0, 100.0];
    let model = Ppcko::new()
        .alpha_grid(grid.clone())
        .components(1)
        .return_validation_errors()
        .build()
        .unwrap();
    let result = model.fit(&data).unwrap();

    assert!(grid.contains(&result.alpha_used));
    let best = result.best_validation_error.unwrap();
    match result.validation_errors.unwrap() {
        ValidationErrors::PerAlpha(errors) => {
            assert_eq!(errors.len(), grid.len());
            let min = errors.iter().cloned().fold(f64::INFINITY, f64::min);
            assert_relative_eq!(best, min, epsilon = 1e-12);
        }
        other => panic!("expected per-alpha errors, got {:?}", other),
    }
}

/// The default alpha search uses the 21-point powers-of-ten grid.
#[test]
fn test_search_alpha_default_grid() {
    assert_eq!(default_alpha_grid::<f64>().len(), 21);

    let data = sample_data(2, 12);
    let model = Ppcko::new()
        .search_alpha()
        .components(1)
        .return_validation_errors()
        .build()
        .unwrap();
    let result = model.fit(&data).unwrap();

    match result.validation_errors.unwrap() {
        ValidationErrors::PerAlpha(errors) => assert_eq!(errors.len(), 21),
        other => panic!("expected per-alpha errors, got {:?}", other),
    }
}

/// The component search reports the visited candidates and may stop early.
#[test]
fn test_search_components_error_track() {
    let data = sample_data(4, 14);
    let model = Ppcko::new()
        .alpha(0.1)
        .search_components()
        .return_validation_errors()
        .build()
        .unwrap();
    let result = model.fit(&data).unwrap();

    assert!(result.components_used >= 1);
    assert!(result.components_used <= 4);
    match result.validation_errors.unwrap() {
        ValidationErrors::PerComponent(errors) => {
            assert!(!errors.is_empty());
            assert!(errors.len() <= 4);
        }
        other => panic!("expected per-component errors, got {:?}", other),
    }
}

/// The joint search reports one component track per alpha candidate.
#[test]
fn test_search_joint_error_track() {
    let data = sample_data(3, 12);
    let model = Ppcko::new()
        .alpha_grid(vec![1e-3, 1.0])
        .component_grid(vec![1, 2])
        .return_validation_errors()
        .build()
        .unwrap();
    let result = model.fit(&data).unwrap();

    assert!(result.components_used == 1 || result.components_used == 2);
    match result.validation_errors.unwrap() {
        ValidationErrors::PerPair(tracks) => assert_eq!(tracks.len(), 2),
        other => panic!("expected per-pair errors, got {:?}", other),
    }
}

/// Error tracks are withheld unless explicitly requested.
#[test]
fn test_validation_errors_opt_in() {
    let data = sample_data(2, 12);
    let model = Ppcko::new()
        .alpha_grid(vec![1e-3, 1.0])
        .components(1)
        .build()
        .unwrap();
    let result = model.fit(&data).unwrap();

    assert!(result.validation_errors.is_none());
    // The winning error is still reported.
    assert!(result.best_validation_error.is_some());
}

/// A custom training window reaches the searches.
#[test]
fn test_custom_train_window() {
    let data = sample_data(2, 12);
    let model = Ppcko::new()
        .alpha_grid(vec![1e-2, 1.0])
        .components(1)
        .train_window(8, 12)
        .build()
        .unwrap();
    assert!(model.fit(&data).is_ok());
}

// ============================================================================
// Missing Data Tests
// ============================================================================

/// NaN entries are replaced and do not leak into the forecast.
#[test]
fn test_missing_mean_replace() {
    let mut data = sample_data(3, 10);
    data[1][4] = f64::NAN;
    let model = Ppcko::new().components(1).build().unwrap();
    let result = model.fit(&data).unwrap();

    assert_eq!(result.forecast.len(), 3);
    assert!(result.forecast.iter().all(|v| v.is_finite()));
    assert!(result.dropped_rows.is_empty());
}

/// An all-NaN row is dropped and its index reported.
#[test]
fn test_missing_row_dropped() {
    let mut data = sample_data(4, 10);
    data[2] = vec![f64::NAN; 10];
    let model = Ppcko::new()
        .components(1)
        .missing_policy(ZeroReplace)
        .build()
        .unwrap();
    let result = model.fit(&data).unwrap();

    assert_eq!(result.dropped_rows, vec![2]);
    assert_eq!(result.forecast.len(), 3);
}

// ============================================================================
// Builder Misuse Tests
// ============================================================================

/// Setting the same parameter twice is rejected at build time.
#[test]
fn test_duplicate_parameter() {
    let err = Ppcko::<f64>::new().alpha(0.5).alpha(0.7).build().unwrap_err();
    assert!(matches!(err, PpckoError::DuplicateParameter { parameter: "alpha" }));
}

/// Fixing alpha and searching it at once is rejected.
#[test]
fn test_conflicting_alpha() {
    let err = Ppcko::<f64>::new().alpha(0.5).search_alpha().build().unwrap_err();
    assert!(matches!(err, PpckoError::ConflictingParameters { .. }));
}

/// A threshold and a component search exclude each other.
#[test]
fn test_conflicting_components() {
    let err = Ppcko::<f64>::new()
        .retain_threshold(0.9)
        .search_components()
        .build()
        .unwrap_err();
    assert!(matches!(err, PpckoError::ConflictingParameters { .. }));
}

// ============================================================================
// Invalid Input Tests
// ============================================================================

/// Empty data is rejected.
#[test]
fn test_empty_input() {
    let model = Ppcko::new().build().unwrap();
    let err = model.fit(&Vec::<Vec<f64>>::new()).unwrap_err();
    assert!(matches!(err, PpckoError::EmptyInput));
}

/// Rows of unequal length are rejected.
#[test]
fn test_ragged_input() {
    let model = Ppcko::new().build().unwrap();
    let data = vec![vec![1.0, 2.0, 3.0], vec![1.0, 2.0]];
    let err = model.fit(&data).unwrap_err();
    assert!(matches!(err, PpckoError::RaggedInput { row: 1, len: 2, expected: 3 }));
}

/// A single time instant cannot be forecast from.
#[test]
fn test_too_few_time_points() {
    let model = Ppcko::new().build().unwrap();
    let err = model.fit(&[vec![1.0], vec![2.0]]).unwrap_err();
    assert!(matches!(err, PpckoError::TooFewTimePoints { got: 1, min: 2 }));
}

/// Non-positive alpha is rejected at build time.
#[test]
fn test_invalid_alpha() {
    let err = Ppcko::<f64>::new().alpha(-1.0).build().unwrap_err();
    assert!(matches!(err, PpckoError::InvalidAlpha(_)));
}

/// A retention threshold outside (0, 1) is rejected.
#[test]
fn test_invalid_threshold() {
    let err = Ppcko::<f64>::new().retain_threshold(1.0).build().unwrap_err();
    assert!(matches!(err, PpckoError::InvalidRetainThreshold(_)));
}

/// Zero components are rejected at build time.
#[test]
fn test_zero_components() {
    let err = Ppcko::<f64>::new().components(0).build().unwrap_err();
    assert!(matches!(err, PpckoError::InvalidComponentCount { got: 0, .. }));
}

/// More components than rows are rejected at fit time.
#[test]
fn test_too_many_components() {
    let data = sample_data(2, 8);
    let model = Ppcko::new().components(5).build().unwrap();
    let err = model.fit(&data).unwrap_err();
    assert!(matches!(err, PpckoError::InvalidComponentCount { got: 5, max: 2 }));
}

/// A degenerate training window is rejected when a search runs.
#[test]
fn test_invalid_window() {
    let data = sample_data(2, 10);
    let model = Ppcko::new()
        .alpha_grid(vec![0.1, 1.0])
        .components(1)
        .train_window(8, 4)
        .build()
        .unwrap();
    let err = model.fit(&data).unwrap_err();
    assert!(matches!(err, PpckoError::InvalidWindow { .. }));
}

/// An empty alpha grid is rejected at build time.
#[test]
fn test_empty_alpha_grid() {
    let err = Ppcko::<f64>::new().alpha_grid(vec![]).build().unwrap_err();
    assert!(matches!(err, PpckoError::EmptyAlphaGrid));
}

/// Zero integration elements are rejected at build time.
#[test]
fn test_invalid_integration_points() {
    let err = Ppcko::<f64>::new().integration_points(0).build().unwrap_err();
    assert!(matches!(err, PpckoError::InvalidMesh { elements: 0 }));
}

/// A reversed domain is rejected at build time.
#[test]
fn test_invalid_domain() {
    let err = Ppcko::<f64>::new().domain(1.0, 0.0).build().unwrap_err();
    assert!(matches!(err, PpckoError::InvalidDomain { .. }));
}

// ============================================================================
// Stationarity Tests
// ============================================================================

/// One p-value per row, each inside the unit interval.
#[test]
fn test_adf_shape_and_range() {
    let data = sample_data(3, 20);
    let pvalues = adf_pvalues(&data, 1).unwrap();

    assert_eq!(pvalues.len(), 3);
    for p in pvalues {
        assert!((0.0..=1.0).contains(&p));
    }
}

/// A strongly mean-reverting series rejects the unit root.
#[test]
fn test_adf_stationary_series() {
    let row: Vec<f64> = (0..16).map(|t| if t % 2 == 0 { 1.0 } else { -1.0 }).collect();
    let pvalues = adf_pvalues(&[row], 0).unwrap();
    assert!(pvalues[0] < 0.05);
}

/// Series too short for the requested lag order are rejected.
#[test]
fn test_adf_too_short() {
    let err = adf_pvalues(&[vec![1.0, 2.0, 3.0, 4.0]], 2).unwrap_err();
    assert!(matches!(err, PpckoError::TooFewTimePoints { .. }));
}
