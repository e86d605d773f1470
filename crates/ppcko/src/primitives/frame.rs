//! Column-major storage for discretized functional time series.
//!
//! ## Purpose
//!
//! This module defines [`SeriesFrame`], the dense `m x n` matrix holding a
//! functional time series: `m` evaluation points on a 1D grid (rows) observed
//! at `n` consecutive time instants (columns).
//!
//! ## Design notes
//!
//! * **Column-major**: A column is one snapshot of the curve; prefix windows
//!   of columns (used by expanding-window cross-validation) are contiguous.
//! * **Generics**: Generic over `Float` types.
//! * **Cheap windows**: `head_cols` is a contiguous prefix copy, no
//!   per-element gathering.
//!
//! ## Invariants
//!
//! * `data.len() == rows * cols`.
//! * All rows have the same number of time instants (checked at construction).
//!
//! ## Non-goals
//!
//! * This module does not handle missing values (see `algorithms::imputation`).
//! * This module does not perform algebra on the data.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::PpckoError;

// ============================================================================
// Series Frame
// ============================================================================

/// Dense column-major `m x n` functional time series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesFrame<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Float> SeriesFrame<T> {
    /// Build a frame from row slices (one row per evaluation point).
    ///
    /// Fails on empty input, rows with fewer than one column, or ragged rows.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, PpckoError> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(PpckoError::EmptyInput);
        }
        let n = rows[0].len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(PpckoError::RaggedInput {
                    row: i,
                    len: row.len(),
                    expected: n,
                });
            }
        }

        let m = rows.len();
        let mut data = vec![T::zero(); m * n];
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                data[j * m + i] = v;
            }
        }
        Ok(Self {
            data,
            rows: m,
            cols: n,
        })
    }

    /// Number of evaluation points (rows).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of time instants (columns).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Column-major storage.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Snapshot at time instant `j`.
    pub fn col(&self, j: usize) -> &[T] {
        let start = j * self.rows;
        &self.data[start..start + self.rows]
    }

    /// Value at evaluation point `i`, time instant `j`.
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[j * self.rows + i]
    }

    /// Gather row `i` (the series observed at one evaluation point).
    pub fn row(&self, i: usize) -> Vec<T> {
        (0..self.cols).map(|j| self.get(i, j)).collect()
    }

    /// Frame restricted to the first `k` time instants.
    pub fn head_cols(&self, k: usize) -> SeriesFrame<T> {
        debug_assert!(k <= self.cols);
        SeriesFrame {
            data: self.data[..k * self.rows].to_vec(),
            rows: self.rows,
            cols: k,
        }
    }

    /// Per-row means across time instants.
    pub fn row_means(&self) -> Vec<T> {
        let inv_n = T::one() / T::from(self.cols).unwrap();
        let mut means = vec![T::zero(); self.rows];
        for j in 0..self.cols {
            let col = self.col(j);
            for (mean, &v) in means.iter_mut().zip(col) {
                *mean = *mean + v;
            }
        }
        for mean in &mut means {
            *mean = *mean * inv_n;
        }
        means
    }
}
