//! In-place COO → CSR conversion.
//!
//! ## Algorithm
//!
//! ```text
//! Phase A  bucket distribution
//!   histogram rows, prefix-sum into per-row cursors (n + 1 buckets)
//!   cycle-chase every unplaced triplet into its row bucket,
//!   marking slots CONSUMED as they are filled
//!   cursors now hold row ends  ->  row_ptr[1..] ; row_ptr[0] = 0
//!
//! Phase B  per-row canonicalization
//!   insertion-sort each row slice by column
//!   merge equal columns by summation, compacting leftward
//!   row_ptr[r + 1] = write cursor   (carries all earlier merges)
//!   truncate col_idx / values to the final nnz
//! ```
//!
//! Phase A runs in O(n + nnz) time with O(n) scratch and never allocates a
//! second triplet array; the row-index vector's allocation is reused for
//! `row_ptr`. The permutation is not stable, so duplicates of one
//! `(row, col)` pair may be summed in a different order than they were
//! inserted. Phase B costs O(k²) per row of length k, which is fine for
//! stencil rows.

use heatcg_types::{HeatError, HeatResult};

use crate::sparse::CsrMatrix;
use crate::triplet::TripletBuilder;

/// Marks a triplet slot whose entry has already been moved to its bucket.
const CONSUMED: usize = usize::MAX;

/// Converts a builder's triplets to canonical CSR.
///
/// Same as [`TripletBuilder::into_csr`].
pub fn convert_to_csr(builder: TripletBuilder) -> HeatResult<CsrMatrix> {
    builder.into_csr()
}

/// Converts parallel triplet vectors into a canonical CSR matrix.
///
/// The dimension is `max(min_dim, max_row + 1)`. Duplicate `(row, col)`
/// pairs are summed; every row ends up sorted by strictly increasing column.
///
/// # Errors
///
/// - [`HeatError::DimensionMismatch`] if the three vectors differ in length.
/// - [`HeatError::InvalidMatrix`] if a column index falls outside the
///   (square) matrix.
pub fn coo_to_csr(
    mut rows: Vec<usize>,
    mut cols: Vec<usize>,
    mut values: Vec<f64>,
    min_dim: usize,
) -> HeatResult<CsrMatrix> {
    if cols.len() != rows.len() {
        return Err(HeatError::DimensionMismatch {
            expected: rows.len(),
            actual: cols.len(),
        });
    }
    if values.len() != rows.len() {
        return Err(HeatError::DimensionMismatch {
            expected: rows.len(),
            actual: values.len(),
        });
    }

    let n = rows.iter().max().map_or(0, |&r| r + 1).max(min_dim);
    if let Some((idx, &col)) = cols.iter().enumerate().find(|&(_, &c)| c >= n) {
        return Err(HeatError::InvalidMatrix(format!(
            "triplet {idx} has column {col}, outside a {n}x{n} matrix"
        )));
    }

    let row_ends = distribute_rows(&mut rows, &mut cols, &mut values, n);

    // Reuse the row-index allocation for the row pointer.
    let mut row_ptr = rows;
    row_ptr.clear();
    row_ptr.reserve(n + 1);
    row_ptr.push(0);
    row_ptr.extend_from_slice(&row_ends[..n]);
    drop(row_ends);

    canonicalize_rows(&mut row_ptr, &mut cols, &mut values);

    Ok(CsrMatrix::from_canonical(n, row_ptr, cols, values))
}

/// Phase A: permutes the triplets into row-major order in place.
///
/// Returns the bucket cursors, where `cursor[r]` is the end of row `r`.
/// On return every entry of `rows` is [`CONSUMED`].
fn distribute_rows(
    rows: &mut [usize],
    cols: &mut [usize],
    values: &mut [f64],
    n: usize,
) -> Vec<usize> {
    let nnz = values.len();

    let mut cursor = vec![0usize; n + 1];
    for &r in rows.iter() {
        cursor[r + 1] += 1;
    }
    for r in 0..n {
        cursor[r + 1] += cursor[r];
    }

    let mut init = 0;
    while init < nnz {
        let mut row = rows[init];
        let mut col = cols[init];
        let mut val = values[init];
        rows[init] = CONSUMED;

        // The only consumed slot ahead of any cursor is the hole at `init`,
        // so the chase ends exactly when the carried entry lands there.
        loop {
            let slot = cursor[row];
            let next_row = rows[slot];
            let next_col = cols[slot];
            let next_val = values[slot];

            rows[slot] = CONSUMED;
            cols[slot] = col;
            values[slot] = val;
            cursor[row] += 1;

            if next_row == CONSUMED {
                break;
            }
            row = next_row;
            col = next_col;
            val = next_val;
        }

        init += 1;
        while init < nnz && rows[init] == CONSUMED {
            init += 1;
        }
    }

    cursor
}

/// Phase B: sorts each row by column, merges duplicates, and compacts.
///
/// `row_ptr` holds the pre-merge row boundaries on entry and the final
/// boundaries on return. `cols`/`values` are truncated to the final nnz.
fn canonicalize_rows(row_ptr: &mut [usize], cols: &mut Vec<usize>, values: &mut Vec<f64>) {
    let n = row_ptr.len() - 1;
    let mut write = 0;
    let mut start = 0;

    for r in 0..n {
        let end = row_ptr[r + 1];
        sort_row(&mut cols[start..end], &mut values[start..end]);

        let mut i = start;
        while i < end {
            let col = cols[i];
            let mut sum = values[i];
            i += 1;
            while i < end && cols[i] == col {
                sum += values[i];
                i += 1;
            }
            // write <= i - 1 always holds, so this never clobbers unread data.
            cols[write] = col;
            values[write] = sum;
            write += 1;
        }

        row_ptr[r + 1] = write;
        start = end;
    }

    cols.truncate(write);
    values.truncate(write);
}

/// Stable insertion sort of one row by column index.
fn sort_row(cols: &mut [usize], values: &mut [f64]) {
    for j in 1..cols.len() {
        let mut k = j;
        while k > 0 && cols[k - 1] > cols[k] {
            cols.swap(k - 1, k);
            values.swap(k - 1, k);
            k -= 1;
        }
    }
}
