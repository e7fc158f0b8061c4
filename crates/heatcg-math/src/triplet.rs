//! COO triplet builder.
//!
//! Accumulates `(row, col, value)` entries in insertion order. No bounds or
//! duplicate checks happen here; duplicates are summed when the builder is
//! converted to CSR.

use heatcg_types::HeatResult;

use crate::convert::coo_to_csr;
use crate::sparse::CsrMatrix;

/// Coordinate-format matrix under assembly.
///
/// Stored as three parallel vectors, consumed by [`TripletBuilder::into_csr`].
#[derive(Debug, Clone, Default)]
pub struct TripletBuilder {
    rows: Vec<usize>,
    cols: Vec<usize>,
    values: Vec<f64>,
    /// Declared minimum dimension. Entries beyond it extend the matrix.
    declared_dim: usize,
}

impl TripletBuilder {
    /// Creates a builder whose dimension is inferred from the largest row index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for a matrix of at least `n × n`.
    ///
    /// Trailing rows without entries are kept as empty rows instead of
    /// shrinking the inferred dimension.
    pub fn with_dimension(n: usize) -> Self {
        Self {
            declared_dim: n,
            ..Self::default()
        }
    }

    /// Pre-allocates room for `additional` more triplets.
    pub fn reserve(&mut self, additional: usize) {
        self.rows.reserve(additional);
        self.cols.reserve(additional);
        self.values.reserve(additional);
    }

    /// Appends one triplet.
    pub fn add_entry(&mut self, row: usize, col: usize, value: f64) {
        self.rows.push(row);
        self.cols.push(col);
        self.values.push(value);
    }

    /// Number of triplets added so far (duplicates included).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no triplets have been added.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Dimension the converted matrix will have.
    pub fn dimension(&self) -> usize {
        let inferred = self.rows.iter().max().map_or(0, |&r| r + 1);
        inferred.max(self.declared_dim)
    }

    /// Converts to canonical CSR, consuming the triplet storage.
    pub fn into_csr(self) -> HeatResult<CsrMatrix> {
        coo_to_csr(self.rows, self.cols, self.values, self.declared_dim)
    }
}
