//! Transpose Jagged Diagonal Storage (TJDS)
//!
//! TJDS stores a matrix column-compressed and reordered so that every
//! "transpose jagged diagonal" is a dense run of entries. Construction:
//!
//! 1. Sort a working copy by (col, row).
//! 2. Vertical compression: the k-th entry of each column gets synthetic row `k`.
//! 3. Rank columns by descending population, ties by ascending column index.
//! 4. Replace each entry's column by its rank. The multiplicand follows the
//!    same permutation (see [`SparseMatrixTJDS::permute_vector`]).
//! 5. Re-sort by (synthetic row, rank). Synthetic row `d` is diagonal `d`.
//! 6. Emit `values`, the original `row_idx`, and `start_pos` with one offset
//!    per diagonal plus a final sentinel equal to nnz.
//!
//! Because ranks are ordered by descending column length, diagonal `d`
//! contains exactly the ranks `0..len(d)` in order. The multiplicand index of
//! entry `j` is therefore `j - start_pos[d]`, with no per-entry column array.

use std::ops::AddAssign;

use num_traits::Num;
use tracing::debug;

use crate::matrix::triplet::TripletStore;
use crate::utils::exclusive_scan;

/// Permutation from original column index to diagonal-major rank
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderTable {
    /// rank_of[col] = rank of original column `col`
    rank_of: Vec<usize>,
    /// col_of_rank[rank] = original column holding `rank`
    col_of_rank: Vec<usize>,
    /// Number of entries in each original column
    lengths: Vec<usize>,
}

impl ReorderTable {
    /// Ranks columns by descending length, breaking ties by ascending index
    pub fn from_lengths(lengths: Vec<usize>) -> Self {
        let mut col_of_rank: Vec<usize> = (0..lengths.len()).collect();
        col_of_rank.sort_by(|&a, &b| lengths[b].cmp(&lengths[a]).then(a.cmp(&b)));

        let mut rank_of = vec![0; lengths.len()];
        for (rank, &col) in col_of_rank.iter().enumerate() {
            rank_of[col] = rank;
        }

        Self {
            rank_of,
            col_of_rank,
            lengths,
        }
    }

    /// Rank assigned to original column `col`
    #[inline]
    pub fn rank_of(&self, col: usize) -> usize {
        self.rank_of[col]
    }

    /// Original column holding `rank`
    #[inline]
    pub fn column_at(&self, rank: usize) -> usize {
        self.col_of_rank[rank]
    }

    /// Population of original column `col`
    pub fn column_length(&self, col: usize) -> usize {
        self.lengths[col]
    }

    pub fn len(&self) -> usize {
        self.rank_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rank_of.is_empty()
    }

    /// Longest column population, which is also the diagonal count
    pub fn max_length(&self) -> usize {
        self.lengths.iter().copied().max().unwrap_or(0)
    }
}

/// Working record used during construction
#[derive(Clone, Copy)]
struct Staged<T> {
    synthetic_row: usize,
    col: usize,
    orig_row: usize,
    value: T,
}

/// A sparse matrix in Transpose Jagged Diagonal Storage
#[derive(Debug, Clone)]
pub struct SparseMatrixTJDS<T> {
    /// Number of rows in the matrix
    pub n_rows: usize,

    /// Number of columns in the matrix
    pub n_cols: usize,

    /// Non-zero values in diagonal-major order (size: nnz)
    pub values: Vec<T>,

    /// Original row of each value (size: nnz)
    pub row_idx: Vec<usize>,

    /// Offset of each diagonal in `values` (size: n_diagonals + 1, last = nnz)
    pub start_pos: Vec<usize>,

    /// Column permutation applied during construction
    pub reorder: ReorderTable,
}

impl<T> SparseMatrixTJDS<T>
where
    T: Copy + Num,
{
    /// Builds the TJDS representation from a triplet store
    pub fn from_triplets(store: &TripletStore<T>) -> Self {
        let n_cols = store.n_cols();
        let sorted = store.sorted_col_major();

        // Vertical compression: slide each column's entries up to rows 0, 1, 2, ...
        let mut lengths = vec![0usize; n_cols];
        let mut staged: Vec<Staged<T>> = sorted
            .iter()
            .map(|t| {
                let k = lengths[t.col];
                lengths[t.col] += 1;
                Staged {
                    synthetic_row: k,
                    col: t.col,
                    orig_row: t.row,
                    value: t.value,
                }
            })
            .collect();

        let reorder = ReorderTable::from_lengths(lengths);
        let n_diagonals = reorder.max_length();

        for entry in staged.iter_mut() {
            entry.col = reorder.rank_of(entry.col);
        }

        staged.sort_by(|a, b| {
            a.synthetic_row
                .cmp(&b.synthetic_row)
                .then(a.col.cmp(&b.col))
        });

        let mut diagonal_counts = vec![0usize; n_diagonals];
        let mut values = Vec::with_capacity(staged.len());
        let mut row_idx = Vec::with_capacity(staged.len());

        for entry in &staged {
            diagonal_counts[entry.synthetic_row] += 1;
            values.push(entry.value);
            row_idx.push(entry.orig_row);
        }

        let start_pos = exclusive_scan(&diagonal_counts);

        debug!(
            n_rows = store.n_rows(),
            n_cols,
            nnz = values.len(),
            n_diagonals,
            "built TJDS matrix"
        );

        Self {
            n_rows: store.n_rows(),
            n_cols,
            values,
            row_idx,
            start_pos,
            reorder,
        }
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Number of transpose jagged diagonals
    pub fn n_diagonals(&self) -> usize {
        self.start_pos.len() - 1
    }

    /// Reorders a multiplicand so component `rank` holds `x[column_at(rank)]`
    pub fn permute_vector(&self, x: &[T]) -> Vec<T> {
        assert_eq!(x.len(), self.n_cols, "x.len() must equal n_cols");
        (0..self.n_cols)
            .map(|rank| x[self.reorder.column_at(rank)])
            .collect()
    }
}

impl<T> SparseMatrixTJDS<T>
where
    T: Copy + Num + AddAssign,
{
    /// Computes `y = A·x` from an already permuted multiplicand
    ///
    /// `y` is zeroed first, so repeated calls never accumulate.
    #[inline]
    pub fn multiply_permuted_into(&self, x_perm: &[T], y: &mut [T]) {
        assert_eq!(x_perm.len(), self.n_cols, "x_perm.len() must equal n_cols");
        assert_eq!(y.len(), self.n_rows, "y.len() must equal n_rows");

        y.fill(T::zero());

        for d in 0..self.n_diagonals() {
            let start = self.start_pos[d];
            let end = self.start_pos[d + 1];

            for j in start..end {
                y[self.row_idx[j]] += self.values[j] * x_perm[j - start];
            }
        }
    }

    /// Computes `y = A·x` for a multiplicand in original column order
    pub fn multiply(&self, x: &[T]) -> Vec<T> {
        let x_perm = self.permute_vector(x);
        let mut y = vec![T::zero(); self.n_rows];
        self.multiply_permuted_into(&x_perm, &mut y);
        y
    }
}
