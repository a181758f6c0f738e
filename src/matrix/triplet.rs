//! Coordinate (COO) triplet storage
//!
//! The triplet store is the validated, read-only source every storage format
//! is converted from. Engines never sort the store itself: each one asks for a
//! [`TripletStore::working_copy`] in the original order and reorders that.

use std::cmp::Ordering;

use crate::error::{Result, SmvpError};

/// A single explicitly stored entry of a sparse matrix (0-based indices)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triplet<T = f64> {
    pub row: usize,
    pub col: usize,
    pub value: T,
}

impl<T> Triplet<T> {
    pub fn new(row: usize, col: usize, value: T) -> Self {
        Self { row, col, value }
    }
}

/// Orders triplets by row, then column
pub fn row_major_order<T>(a: &Triplet<T>, b: &Triplet<T>) -> Ordering {
    a.row.cmp(&b.row).then(a.col.cmp(&b.col))
}

/// Orders triplets by column, then row
pub fn col_major_order<T>(a: &Triplet<T>, b: &Triplet<T>) -> Ordering {
    a.col.cmp(&b.col).then(a.row.cmp(&b.row))
}

/// Validated set of triplets together with the matrix dimensions
#[derive(Debug, Clone)]
pub struct TripletStore<T = f64> {
    n_rows: usize,
    n_cols: usize,
    entries: Vec<Triplet<T>>,
}

impl<T: Copy> TripletStore<T> {
    /// Creates a store, checking every index against the dimensions
    ///
    /// # Errors
    ///
    /// Returns [`SmvpError::InvalidDimension`] for the first entry whose row
    /// or column lies outside `[0, n_rows)` / `[0, n_cols)`.
    pub fn new(n_rows: usize, n_cols: usize, entries: Vec<Triplet<T>>) -> Result<Self> {
        if let Some(bad) = entries.iter().find(|t| t.row >= n_rows || t.col >= n_cols) {
            return Err(SmvpError::InvalidDimension {
                row: bad.row,
                col: bad.col,
                n_rows,
                n_cols,
            });
        }

        Ok(Self {
            n_rows,
            n_cols,
            entries,
        })
    }

    /// Creates a store from an ingestion source that also announces its nnz
    pub fn from_parts(
        n_rows: usize,
        n_cols: usize,
        nnz: usize,
        entries: Vec<Triplet<T>>,
    ) -> Result<Self> {
        if nnz != entries.len() {
            return Err(SmvpError::NnzMismatch {
                declared: nnz,
                actual: entries.len(),
            });
        }
        Self::new(n_rows, n_cols, entries)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Entries in their original order
    pub fn entries(&self) -> &[Triplet<T>] {
        &self.entries
    }

    /// Fresh copy of the entries in original order, owned by the caller
    pub fn working_copy(&self) -> Vec<Triplet<T>> {
        self.entries.clone()
    }

    /// Working copy sorted by (row, col)
    pub fn sorted_row_major(&self) -> Vec<Triplet<T>> {
        let mut copy = self.working_copy();
        copy.sort_by(row_major_order);
        copy
    }

    /// Working copy sorted by (col, row)
    pub fn sorted_col_major(&self) -> Vec<Triplet<T>> {
        let mut copy = self.working_copy();
        copy.sort_by(col_major_order);
        copy
    }
}
