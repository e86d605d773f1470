#![cfg(feature = "dev")]
//! Tests for the Augmented Dickey-Fuller test.
//!
//! These tests verify the p-value range, the behavior on clearly stationary
//! series, the lagged-difference regression path, and the sample-size guard.

use approx::assert_relative_eq;

use ppcko::internals::algorithms::stationarity::{adf_pvalues, adf_statistic, df_pvalue};
use ppcko::internals::primitives::errors::PpckoError;
use ppcko::internals::primitives::frame::SeriesFrame;

/// Test that every row yields a p-value inside the unit interval.
#[test]
fn test_pvalues_in_range() {
    let rows: Vec<Vec<f64>> = (0..3)
        .map(|i| {
            (0..24)
                .map(|t| {
                    0.5f64.powi(t % 5) + 0.3 * (i as f64 + 1.0) * if t % 3 == 0 { 1.0 } else { -0.5 }
                })
                .collect()
        })
        .collect();
    let frame = SeriesFrame::from_rows(&rows).unwrap();

    for lag in 0..3 {
        let pvalues = adf_pvalues(&frame, lag).unwrap();
        assert_eq!(pvalues.len(), 3);
        for p in pvalues {
            assert!((0.0..=1.0).contains(&p), "p-value out of range: {}", p);
        }
    }
}

/// Test that a strongly mean-reverting series rejects the unit root.
#[test]
fn test_alternating_series_rejects_unit_root() {
    let row: Vec<f64> = (0..16).map(|t| if t % 2 == 0 { 1.0 } else { -1.0 }).collect();
    let frame = SeriesFrame::from_rows(&[row]).unwrap();
    let pvalues = adf_pvalues(&frame, 0).unwrap();

    // The level coefficient is -2 with essentially no residual noise, so the
    // statistic sits far below the whole table.
    assert!(pvalues[0] < 0.01);
}

/// Test the lagged-difference path on a mean-reverting series.
#[test]
fn test_lagged_regression_runs() {
    let mut row = vec![0.0f64; 30];
    // AR(1) with coefficient 0.3 driven by a deterministic sign pattern.
    let shocks = [1.0, -0.6, 0.8, -1.1, 0.5, -0.9];
    for t in 1..30 {
        row[t] = 0.3 * row[t - 1] + shocks[t % shocks.len()];
    }
    let frame = SeriesFrame::from_rows(&[row]).unwrap();
    let pvalues = adf_pvalues(&frame, 2).unwrap();

    assert_eq!(pvalues.len(), 1);
    assert!((0.0..=1.0).contains(&pvalues[0]));
}

/// Test that each row is tested independently.
#[test]
fn test_rows_independent() {
    let stationary: Vec<f64> =
        (0..20).map(|t| if t % 2 == 0 { 1.0 } else { -1.0 }).collect();
    let shifted: Vec<f64> = stationary.iter().map(|v| v + 10.0).collect();
    let frame = SeriesFrame::from_rows(&[stationary, shifted]).unwrap();
    let pvalues = adf_pvalues(&frame, 0).unwrap();

    // A constant shift does not change the test decision.
    assert!(pvalues[0] < 0.05);
    assert!(pvalues[1] < 0.05);
}

/// Test the table interpolation at exactly tabulated sample sizes.
#[test]
fn test_df_pvalue_table_interpolation() {
    // At sample size 25 the first table column applies as-is: -3.42 lies
    // halfway between the 5% (-3.60) and 10% (-3.24) critical values.
    assert_relative_eq!(df_pvalue(-3.42, 25), 0.075, epsilon = 1e-12);

    // Beyond the largest tabulated size the last column applies: -3.60
    // lies between the 2.5% (-3.66) and 5% (-3.41) critical values.
    assert_relative_eq!(df_pvalue(-3.60, 100_000), 0.031, epsilon = 1e-12);
}

/// Test clamping outside the tabulated statistics.
#[test]
fn test_df_pvalue_clamps() {
    assert_relative_eq!(df_pvalue(-9.0, 50), 0.0);
    assert_relative_eq!(df_pvalue(0.5, 50), 1.0);
    assert_relative_eq!(df_pvalue(f64::NEG_INFINITY, 100), 0.0);
    assert_relative_eq!(df_pvalue(f64::INFINITY, 100), 1.0);
}

/// Test the lagged test evaluates the table at the number of first
/// differences, not at the number of regression units left after embedding.
#[test]
fn test_lagged_pvalue_sample_size() {
    // n = 51 so the table is read at 50 first differences; the embedding
    // for lag 2 leaves only 48 regression units, which would interpolate
    // the critical values differently.
    let mut row = vec![0.0f64; 51];
    let shocks = [0.4, -0.25, 0.3, -0.45, 0.2, -0.35];
    for t in 1..51 {
        row[t] = 0.9 * row[t - 1] + shocks[t % shocks.len()];
    }

    let stat: f64 = adf_statistic(&row, 2).unwrap();
    let frame = SeriesFrame::from_rows(&[row]).unwrap();
    let pvalues = adf_pvalues(&frame, 2).unwrap();
    assert_relative_eq!(pvalues[0], df_pvalue(stat, 50), epsilon = 1e-12);
}

/// Test the sample-size guard for the requested lag order.
#[test]
fn test_too_few_points() {
    let frame = SeriesFrame::from_rows(&[vec![1.0, 2.0, 3.0, 4.0, 5.0]]).unwrap();
    let err = adf_pvalues(&frame, 2).unwrap_err();
    assert!(matches!(err, PpckoError::TooFewTimePoints { got: 5, min: 9 }));
}
