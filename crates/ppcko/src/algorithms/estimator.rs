//! Kargin-Onatski estimation of the autoregressive predictor.
//!
//! ## Purpose
//!
//! This module implements the core PPC-KO algorithm: from a functional time
//! series it estimates the principal predictive components of the lag-1
//! autoregressive operator and produces the one-step-ahead forecast.
//!
//! ## Key concepts
//!
//! * **Covariance** `C = X X' / n` and lag-1 **cross-covariance**
//!   `G = X[:,1..] X[:,..n-1]' / (n - 1)` of the centered data.
//! * **Regularization**: `C_a = C + alpha * tr(C) * I` keeps the inverse
//!   square root well conditioned.
//! * **Predictive operator**: `Phi = C_a^{-1/2} G'G C_a^{-1/2}`; its leading
//!   eigenvectors give the predictive weights `b_i = C_a^{-1/2} v_i` and
//!   loadings `a_i = G b_i`.
//! * **Component retention**: either a fixed count `k`, or the smallest `k`
//!   whose cumulative eigenvalue share of `tr(Phi)` reaches a threshold.
//! * **Scores**: L2 inner products of the centered last snapshot with the
//!   loadings, integrated over the function domain.
//!
//! ## Invariants
//!
//! * Input has at least 2 time instants.
//! * `1 <= components <= m`.
//! * The forecast has the same length as a snapshot and is reported on the
//!   original (non-centered) scale.
//!
//! ## Non-goals
//!
//! * Parameter selection (see `evaluation::cv`).
//! * Missing-value handling (see `algorithms::imputation`).

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::linalg::{transpose, FloatLinalg};
use crate::math::mesh::{Domain1d, Mesh1d};
use crate::math::quadrature::l2_inner_product;
use crate::primitives::errors::PpckoError;
use crate::primitives::frame::SeriesFrame;

// ============================================================================
// Component Retention Rule
// ============================================================================

/// How many principal predictive components to retain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComponentRule<T> {
    /// Retain exactly this many components.
    Fixed(usize),
    /// Retain the smallest number of components whose cumulative explanatory
    /// power reaches this threshold (strictly between 0 and 1).
    Threshold(T),
}

// ============================================================================
// Estimate
// ============================================================================

/// Fitted Kargin-Onatski predictor.
#[derive(Debug, Clone, PartialEq)]
pub struct KoEstimate<T> {
    /// Number of evaluation points (snapshot length).
    pub rows: usize,
    /// Per-row means removed before estimation.
    pub means: Vec<T>,
    /// Regularization parameter used.
    pub alpha: T,
    /// Number of principal predictive components retained.
    pub components: usize,
    /// Cumulative explanatory power of the retained components.
    pub explanatory_power: Vec<T>,
    /// Predictive loadings `a_i`, column-major `m x k`.
    pub loadings: Vec<T>,
    /// Predictive weights `b_i`, column-major `m x k`.
    pub weights: Vec<T>,
    /// One-step-ahead forecast on the original scale.
    pub forecast: Vec<T>,
    /// Centered last snapshot (used for score evaluation).
    pub last_centered: Vec<T>,
    /// Trace of the covariance estimator.
    pub trace_cov: T,
}

// ============================================================================
// Estimation
// ============================================================================

/// Fit the KO predictor on `frame` with regularization `alpha`.
pub fn estimate<T: FloatLinalg>(
    frame: &SeriesFrame<T>,
    alpha: T,
    rule: &ComponentRule<T>,
) -> Result<KoEstimate<T>, PpckoError> {
    let (m, n) = (frame.rows(), frame.cols());
    if n < 2 {
        return Err(PpckoError::TooFewTimePoints { got: n, min: 2 });
    }

    // Center the data per row across time.
    let means = frame.row_means();
    let mut centered = frame.as_slice().to_vec();
    for j in 0..n {
        for i in 0..m {
            centered[j * m + i] = centered[j * m + i] - means[i];
        }
    }

    // Covariance C = X X' / n and its trace.
    let inv_n = T::one() / T::from(n).unwrap();
    let centered_t = transpose(&centered, m, n);
    let mut cov = T::matmul(&centered, m, n, &centered_t, m);
    for v in &mut cov {
        *v = *v * inv_n;
    }
    let trace_cov = (0..m).fold(T::zero(), |acc, i| acc + cov[i * m + i]);

    // Lag-1 cross-covariance G = X[:,1..] X[:,..n-1]' / (n - 1).
    let inv_n1 = T::one() / T::from(n - 1).unwrap();
    let left_t = transpose(&centered[..m * (n - 1)], m, n - 1);
    let mut cross = T::matmul(&centered[m..], m, n - 1, &left_t, m);
    for v in &mut cross {
        *v = *v * inv_n1;
    }

    // G'G.
    let cross_t = transpose(&cross, m, m);
    let gamma_sq = T::matmul(&cross_t, m, m, &cross, m);

    // Regularized covariance and its inverse square root.
    let mut cov_reg = cov;
    let ridge = alpha * trace_cov;
    for i in 0..m {
        cov_reg[i * m + i] = cov_reg[i * m + i] + ridge;
    }
    let root = T::inverse_sqrt_spd(&cov_reg, m).ok_or_else(|| {
        PpckoError::NumericalFailure(
            "regularized covariance is not positive definite".to_string(),
        )
    })?;

    // Phi = C_a^{-1/2} G'G C_a^{-1/2}.
    let tmp = T::matmul(&root, m, m, &gamma_sq, m);
    let phi = T::matmul(&tmp, m, m, &root, m);
    let trace_phi = (0..m).fold(T::zero(), |acc, i| acc + phi[i * m + i]);
    if !(trace_phi > T::zero()) {
        return Err(PpckoError::NumericalFailure(
            "cross-covariance operator is numerically zero".to_string(),
        ));
    }

    let (eigvals, eigvecs) = T::sym_eigen_desc(&phi, m);

    // Retained components.
    let k = match *rule {
        ComponentRule::Fixed(k) => k.min(m),
        ComponentRule::Threshold(tau) => {
            let mut cum = T::zero();
            let mut chosen = m;
            for (i, &lam) in eigvals.iter().enumerate() {
                cum = cum + lam;
                if cum / trace_phi >= tau {
                    chosen = i + 1;
                    break;
                }
            }
            chosen
        }
    };

    // Cumulative explanatory power of the retained components.
    let mut explanatory_power = Vec::with_capacity(k);
    let mut cum = T::zero();
    for &lam in eigvals.iter().take(k) {
        cum = cum + lam;
        explanatory_power.push(cum / trace_phi);
    }

    // Weights b = C_a^{-1/2} V_k and loadings a = G b.
    let weights = T::matmul(&root, m, m, &eigvecs[..m * k], k);
    let loadings = T::matmul(&cross, m, m, &weights, k);

    // Forecast rho x_n + means with rho = A B' applied factor by factor.
    let last_centered = centered[m * (n - 1)..].to_vec();
    let mut factor = vec![T::zero(); k];
    for (c, fc) in factor.iter_mut().enumerate() {
        let b_c = &weights[c * m..(c + 1) * m];
        *fc = b_c
            .iter()
            .zip(&last_centered)
            .fold(T::zero(), |acc, (&b, &x)| acc + b * x);
    }
    let mut forecast = means.clone();
    for (c, &fc) in factor.iter().enumerate() {
        let a_c = &loadings[c * m..(c + 1) * m];
        for (fi, &a) in forecast.iter_mut().zip(a_c) {
            *fi = *fi + a * fc;
        }
    }

    Ok(KoEstimate {
        rows: m,
        means,
        alpha,
        components: k,
        explanatory_power,
        loadings,
        weights,
        forecast,
        last_centered,
        trace_cov,
    })
}

// ============================================================================
// Scores
// ============================================================================

/// Scores of the last snapshot along the retained loadings.
///
/// Each score is the L2 inner product of the centered last snapshot with one
/// loading, both regarded as functions sampled on a uniform evaluation grid
/// over `domain`, integrated with `integration_elements` trapezoid elements.
/// A single evaluation point reads as a constant function, so its score is
/// the pointwise product scaled by the domain length.
pub fn scores<T: FloatLinalg>(
    fit: &KoEstimate<T>,
    domain: Domain1d<T>,
    integration_elements: usize,
) -> Result<Vec<T>, PpckoError> {
    let m = fit.rows;
    let grid: Vec<T> = if m == 1 {
        vec![domain.left()]
    } else {
        Mesh1d::uniform(domain, m - 1)?.nodes().to_vec()
    };
    let int_mesh = Mesh1d::uniform(domain, integration_elements)?;

    let mut out = Vec::with_capacity(fit.components);
    for c in 0..fit.components {
        let direction = &fit.loadings[c * m..(c + 1) * m];
        out.push(l2_inner_product(
            &int_mesh,
            &grid,
            &fit.last_centered,
            direction,
        ));
    }
    Ok(out)
}

// ============================================================================
// Helpers
// ============================================================================

/// Trace of the covariance of the centered data, without forming the full
/// covariance matrix. Used to scale the component-search tolerance.
pub fn centered_trace<T: Float>(frame: &SeriesFrame<T>) -> T {
    let (m, n) = (frame.rows(), frame.cols());
    let means = frame.row_means();
    let mut sum = T::zero();
    for j in 0..n {
        let col = frame.col(j);
        for i in 0..m {
            let d = col[i] - means[i];
            sum = sum + d * d;
        }
    }
    sum / T::from(n).unwrap()
}
