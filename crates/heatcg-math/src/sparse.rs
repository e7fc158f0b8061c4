//! Compressed Sparse Row matrix.
//!
//! Produced by [`TripletBuilder::into_csr`](crate::TripletBuilder::into_csr)
//! and immutable afterwards, so it can be shared freely by reference.

use serde::{Deserialize, Serialize};

use heatcg_types::{HeatError, HeatResult};

/// Square sparse matrix in Compressed Sparse Row (CSR) form.
///
/// Invariants:
/// - `row_ptr.len() == n + 1`, `row_ptr[0] == 0`, non-decreasing,
///   `row_ptr[n] == nnz`
/// - `col_idx.len() == values.len() == nnz`
/// - within each row, column indices are strictly increasing and `< n`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsrMatrix {
    /// Number of rows (and columns).
    n: usize,
    /// `row_ptr[i]..row_ptr[i+1]` indexes row `i` in `col_idx` and `values`.
    row_ptr: Vec<usize>,
    /// Column index of each non-zero.
    col_idx: Vec<usize>,
    /// Non-zero values.
    values: Vec<f64>,
}

impl CsrMatrix {
    /// Wraps arrays the converter already canonicalized.
    pub(crate) fn from_canonical(
        n: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<f64>,
    ) -> Self {
        let m = Self {
            n,
            row_ptr,
            col_idx,
            values,
        };
        debug_assert!(m.validate().is_ok(), "converter produced invalid CSR");
        m
    }

    /// Builds a matrix from raw CSR arrays, checking every invariant.
    pub fn from_raw_parts(
        n: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<f64>,
    ) -> HeatResult<Self> {
        let m = Self {
            n,
            row_ptr,
            col_idx,
            values,
        };
        m.validate()?;
        Ok(m)
    }

    /// Creates the `n × n` identity matrix.
    pub fn identity(n: usize) -> Self {
        Self {
            n,
            row_ptr: (0..=n).collect(),
            col_idx: (0..n).collect(),
            values: vec![1.0; n],
        }
    }

    /// Checks the structural CSR invariants.
    pub fn validate(&self) -> HeatResult<()> {
        if self.row_ptr.len() != self.n + 1 {
            return Err(HeatError::InvariantViolation(format!(
                "row_ptr has length {}, expected {}",
                self.row_ptr.len(),
                self.n + 1
            )));
        }
        if self.row_ptr[0] != 0 {
            return Err(HeatError::InvariantViolation(
                "row_ptr[0] must be 0".into(),
            ));
        }
        if self.col_idx.len() != self.values.len() {
            return Err(HeatError::InvariantViolation(format!(
                "col_idx has {} entries but values has {}",
                self.col_idx.len(),
                self.values.len()
            )));
        }
        if self.row_ptr[self.n] != self.values.len() {
            return Err(HeatError::InvariantViolation(format!(
                "row_ptr[n] = {} but nnz = {}",
                self.row_ptr[self.n],
                self.values.len()
            )));
        }
        for r in 0..self.n {
            let (start, end) = (self.row_ptr[r], self.row_ptr[r + 1]);
            if start > end || end > self.values.len() {
                return Err(HeatError::InvariantViolation(format!(
                    "row {r} spans {start}..{end} with {} stored values",
                    self.values.len()
                )));
            }
            let cols = &self.col_idx[start..end];
            if let Some(&c) = cols.iter().find(|&&c| c >= self.n) {
                return Err(HeatError::InvariantViolation(format!(
                    "row {r} has column {c} outside a {n}x{n} matrix",
                    n = self.n
                )));
            }
            if cols.windows(2).any(|w| w[0] >= w[1]) {
                return Err(HeatError::InvariantViolation(format!(
                    "row {r} columns are not strictly increasing"
                )));
            }
        }
        Ok(())
    }

    /// Matrix dimension `n`.
    pub fn dimension(&self) -> usize {
        self.n
    }

    /// Number of stored non-zeros.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Row pointer array (length `n + 1`).
    pub fn row_ptr(&self) -> &[usize] {
        &self.row_ptr
    }

    /// Column indices, row by row.
    pub fn col_idx(&self) -> &[usize] {
        &self.col_idx
    }

    /// Non-zero values, row by row.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Column indices and values of row `r`.
    pub fn row(&self, r: usize) -> (&[usize], &[f64]) {
        let range = self.row_ptr[r]..self.row_ptr[r + 1];
        (&self.col_idx[range.clone()], &self.values[range])
    }

    /// Value at `(r, c)`, or `0.0` if not stored.
    pub fn get(&self, r: usize, c: usize) -> f64 {
        if r >= self.n {
            return 0.0;
        }
        let (cols, vals) = self.row(r);
        cols.binary_search(&c).map_or(0.0, |i| vals[i])
    }

    /// Computes `A · v`.
    ///
    /// `v` may be longer than `n`; only its first `n` entries are read.
    ///
    /// # Panics
    ///
    /// If a row slice runs past the stored values. That can only happen
    /// when the CSR invariants were broken after construction.
    pub fn mul_vec(&self, v: &[f64]) -> HeatResult<Vec<f64>> {
        if v.len() < self.n {
            return Err(HeatError::DimensionMismatch {
                expected: self.n,
                actual: v.len(),
            });
        }

        let mut out = Vec::with_capacity(self.n);
        for r in 0..self.n {
            let (start, end) = (self.row_ptr[r], self.row_ptr[r + 1]);
            assert!(
                start <= end && end <= self.values.len(),
                "CSR row {r} spans {start}..{end} but only {} values are stored",
                self.values.len()
            );
            let mut sum = 0.0;
            for i in start..end {
                sum += self.values[i] * v[self.col_idx[i]];
            }
            out.push(sum);
        }
        Ok(out)
    }

    /// Expands to a dense row-major `n × n` array.
    pub fn to_dense(&self) -> Vec<Vec<f64>> {
        let mut dense = vec![vec![0.0; self.n]; self.n];
        for (r, row) in dense.iter_mut().enumerate() {
            let (cols, vals) = self.row(r);
            for (&c, &v) in cols.iter().zip(vals) {
                row[c] = v;
            }
        }
        dense
    }

    /// Returns true if `A == Aᵀ` within `tol`.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.n).all(|r| {
            let (cols, vals) = self.row(r);
            cols.iter()
                .zip(vals)
                .all(|(&c, &v)| (self.get(c, r) - v).abs() <= tol)
        })
    }
}
