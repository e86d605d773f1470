//! Augmented Dickey-Fuller stationarity testing.
//!
//! ## Purpose
//!
//! This module runs the Augmented Dickey-Fuller (ADF) unit-root test on each
//! row of a series frame, so callers can check pointwise stationarity of a
//! functional time series before fitting the predictor.
//!
//! ## Design notes
//!
//! * The test regresses first differences on an intercept, the lagged level,
//!   a linear trend, and `lag` lagged differences, then compares the t-ratio
//!   of the level coefficient against the Dickey-Fuller distribution.
//! * P-values come from bilinear interpolation in the tabulated critical
//!   values (MacKinnon style table, trend specification), clamped to `[0, 1]`
//!   outside the tabulated range. The table is evaluated at the number of
//!   first differences `n - 1`, not at the number of regression units left
//!   after embedding.
//!
//! ## Invariants
//!
//! * Each row must provide strictly more regression units than regressors,
//!   i.e. `n - lag - 1 > lag + 3`.
//! * Returned p-values lie in `[0, 1]`.

// Internal dependencies
use crate::math::linalg::FloatLinalg;
use crate::primitives::errors::PpckoError;
use crate::primitives::frame::SeriesFrame;

// ============================================================================
// Dickey-Fuller Table
// ============================================================================

/// Tabulated Dickey-Fuller critical values for the trend specification.
/// Rows follow `DF_PROBS`, columns follow `DF_SAMPLE_SIZES`.
const DF_TABLE: [[f64; 6]; 8] = [
    [-4.38, -4.15, -4.04, -3.99, -3.98, -3.96],
    [-3.95, -3.80, -3.73, -3.69, -3.68, -3.66],
    [-3.60, -3.50, -3.45, -3.43, -3.42, -3.41],
    [-3.24, -3.18, -3.15, -3.13, -3.13, -3.12],
    [-1.14, -1.19, -1.22, -1.23, -1.24, -1.25],
    [-0.80, -0.87, -0.90, -0.92, -0.93, -0.94],
    [-0.50, -0.58, -0.62, -0.64, -0.65, -0.66],
    [-0.15, -0.24, -0.28, -0.31, -0.32, -0.33],
];

/// Sample sizes at which the table columns were computed.
const DF_SAMPLE_SIZES: [f64; 6] = [25.0, 50.0, 100.0, 250.0, 500.0, 100_000.0];

/// Tail probabilities attached to the table rows.
const DF_PROBS: [f64; 8] = [0.01, 0.025, 0.05, 0.10, 0.90, 0.95, 0.975, 0.99];

// ============================================================================
// Test
// ============================================================================

/// ADF p-values for every row of `frame`, using `lag` lagged differences.
///
/// Small p-values reject the unit-root hypothesis, i.e. suggest the row is
/// stationary around a deterministic trend.
pub fn adf_pvalues<T: FloatLinalg>(
    frame: &SeriesFrame<T>,
    lag: usize,
) -> Result<Vec<T>, PpckoError> {
    let n = frame.cols();
    let units = n.saturating_sub(lag + 1);
    let regressors = lag + 3;
    if units <= regressors {
        return Err(PpckoError::TooFewTimePoints {
            got: n,
            min: 2 * lag + 5,
        });
    }

    let mut pvalues = Vec::with_capacity(frame.rows());
    for i in 0..frame.rows() {
        let row = frame.row(i);
        let stat = adf_statistic(&row, lag)?;
        pvalues.push(T::from(df_pvalue(stat.to_f64().unwrap(), n - 1)).unwrap());
    }
    Ok(pvalues)
}

/// ADF t-statistic for a single series.
pub fn adf_statistic<T: FloatLinalg>(series: &[T], lag: usize) -> Result<T, PpckoError> {
    let n = series.len();
    let diffs: Vec<T> = series.windows(2).map(|w| w[1] - w[0]).collect();

    let (design, rows, cols, response) = if lag == 0 {
        // Units are all n - 1 differences; regress on intercept, level, trend.
        let units = n - 1;
        let mut design = Vec::with_capacity(units * 3);
        design.extend(std::iter::repeat(T::one()).take(units));
        design.extend_from_slice(&series[..units]);
        design.extend((1..=units).map(|t| T::from(t).unwrap()));
        (design, units, 3, diffs)
    } else {
        // Embed the differences so column 0 holds the current difference and
        // columns 1..=lag hold the lagged ones.
        let dim = lag + 1;
        let units = n - dim;
        let mut embedded = vec![T::zero(); units * dim];
        for j in 0..dim {
            for i in 0..units {
                embedded[j * units + i] = diffs[i + dim - 1 - j];
            }
        }

        let cols = 3 + lag;
        let mut design = Vec::with_capacity(units * cols);
        design.extend(std::iter::repeat(T::one()).take(units));
        design.extend_from_slice(&series[dim - 1..dim - 1 + units]);
        design.extend((dim..dim + units).map(|t| T::from(t).unwrap()));
        design.extend_from_slice(&embedded[units..]);
        let response = embedded[..units].to_vec();
        (design, units, cols, response)
    };

    let (coeff, stderr) = T::ols_with_stderr(&design, rows, cols, &response).ok_or_else(|| {
        PpckoError::NumericalFailure("ADF regression is rank deficient".to_string())
    })?;
    // t-ratio of the lagged level coefficient; infinities propagate to the
    // table clamp.
    Ok(coeff[1] / stderr[1])
}

/// Interpolated Dickey-Fuller p-value for `stat` at `sample_size` first
/// differences.
pub fn df_pvalue(stat: f64, sample_size: usize) -> f64 {
    let n = sample_size as f64;

    // Interpolate every table row at the observed sample size.
    let mut critical = [0.0f64; 8];
    for (row, crit) in DF_TABLE.iter().zip(critical.iter_mut()) {
        *crit = interp_clamped(&DF_SAMPLE_SIZES, row, n);
    }

    // Then interpolate the tail probability at the observed statistic.
    interp_clamped_ext(&critical, &DF_PROBS, stat)
}

/// Piecewise-linear interpolation with constant extrapolation.
fn interp_clamped(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[xs.len() - 1] {
        return ys[ys.len() - 1];
    }
    for w in 0..xs.len() - 1 {
        if x <= xs[w + 1] {
            let t = (x - xs[w]) / (xs[w + 1] - xs[w]);
            return ys[w] + t * (ys[w + 1] - ys[w]);
        }
    }
    ys[ys.len() - 1]
}

/// Like [`interp_clamped`] but extrapolates to the 0 and 1 probability
/// endpoints outside the tabulated statistics.
fn interp_clamped_ext(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    if x < xs[0] {
        return 0.0;
    }
    if x > xs[xs.len() - 1] {
        return 1.0;
    }
    interp_clamped(xs, ys, x)
}
