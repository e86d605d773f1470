//! Missing-value handling for functional time series.
//!
//! ## Purpose
//!
//! This module repairs NaNs in the input matrix before estimation. Each row
//! (the series observed at one evaluation point) is treated independently:
//! rows that are entirely missing are dropped, otherwise the missing entries
//! are replaced according to a [`MissingPolicy`].
//!
//! ## Key concepts
//!
//! * **MeanReplace**: NaNs become the mean of the row's finite entries.
//!   Preserves the row mean, shrinks the row variance.
//! * **ZeroReplace**: NaNs become zero. Preserves sparsity, shifts the mean.
//!
//! ## Invariants
//!
//! * The output frame contains no NaNs.
//! * Dropped row indices refer to the original row numbering.
//!
//! ## Edge cases
//!
//! * Every row all-NaN is an error (`AllMissing`).

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::PpckoError;
use crate::primitives::frame::SeriesFrame;

// ============================================================================
// Policy
// ============================================================================

/// Replacement rule for missing entries in a partially observed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPolicy {
    /// Replace NaNs with the mean of the row's finite entries.
    #[default]
    MeanReplace,
    /// Replace NaNs with zeros.
    ZeroReplace,
}

// ============================================================================
// Cleaning
// ============================================================================

/// Repair NaNs in `frame` under `policy`.
///
/// Returns the cleaned frame together with the indices of rows that were
/// dropped because they contained no finite entry at all.
pub fn clean<T: Float>(
    frame: &SeriesFrame<T>,
    policy: MissingPolicy,
) -> Result<(SeriesFrame<T>, Vec<usize>), PpckoError> {
    let (m, n) = (frame.rows(), frame.cols());

    let mut kept_rows: Vec<Vec<T>> = Vec::with_capacity(m);
    let mut dropped = Vec::new();

    for i in 0..m {
        let mut row = frame.row(i);
        let finite: Vec<T> = row.iter().copied().filter(|v| !v.is_nan()).collect();

        if finite.is_empty() {
            dropped.push(i);
            continue;
        }

        if finite.len() < n {
            let replacement = match policy {
                MissingPolicy::MeanReplace => {
                    let sum = finite.iter().fold(T::zero(), |acc, &v| acc + v);
                    sum / T::from(finite.len()).unwrap()
                }
                MissingPolicy::ZeroReplace => T::zero(),
            };
            for v in &mut row {
                if v.is_nan() {
                    *v = replacement;
                }
            }
        }

        kept_rows.push(row);
    }

    if kept_rows.is_empty() {
        return Err(PpckoError::AllMissing);
    }

    let cleaned = SeriesFrame::from_rows(&kept_rows)?;
    Ok((cleaned, dropped))
}
