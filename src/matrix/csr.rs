//! Compressed Sparse Row (CSR) matrix format implementation

use std::fmt;
use std::ops::AddAssign;

use num_traits::Num;
use tracing::debug;

use crate::error::{Result, SmvpError};
use crate::matrix::triplet::TripletStore;

/// A sparse matrix in Compressed Sparse Row (CSR) format
///
/// The CSR format stores a sparse matrix using three arrays:
/// - row_ptr: Array of size n_rows + 1 containing indices into col_idx and values arrays
/// - col_idx: Array of size nnz containing column indices of non-zero elements
/// - values: Array of size nnz containing the non-zero values
///
/// Rows without entries occupy an empty range, `row_ptr[r] == row_ptr[r + 1]`.
#[derive(Clone)]
pub struct SparseMatrixCSR<T> {
    /// Number of rows in the matrix
    pub n_rows: usize,

    /// Number of columns in the matrix
    pub n_cols: usize,

    /// Row pointers (size: n_rows + 1)
    /// row_ptr[i] is the index in col_idx and values where row i starts
    /// row_ptr[n_rows] is equal to nnz
    pub row_ptr: Vec<usize>,

    /// Column indices (size: nnz)
    pub col_idx: Vec<usize>,

    /// Non-zero values (size: nnz)
    pub values: Vec<T>,
}

impl<T> SparseMatrixCSR<T>
where
    T: Copy + Num,
{
    /// Creates a new CSR matrix with the given dimensions and data
    ///
    /// # Arguments
    ///
    /// * `n_rows` - Number of rows
    /// * `n_cols` - Number of columns
    /// * `row_ptr` - Row pointers
    /// * `col_idx` - Column indices
    /// * `values` - Non-zero values
    ///
    /// # Panics
    ///
    /// Panics if the input arrays are inconsistent:
    /// - row_ptr.len() must be n_rows + 1
    /// - col_idx.len() must equal values.len()
    /// - row_ptr[n_rows] must equal col_idx.len()
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        assert_eq!(row_ptr.len(), n_rows + 1, "row_ptr.len() must be n_rows + 1");
        assert_eq!(col_idx.len(), values.len(), "col_idx.len() must equal values.len()");
        assert_eq!(
            row_ptr[n_rows], col_idx.len(),
            "row_ptr[n_rows] must equal col_idx.len()"
        );

        for &col in &col_idx {
            assert!(col < n_cols, "Column index {} out of bounds (n_cols = {})", col, n_cols);
        }

        Self {
            n_rows,
            n_cols,
            row_ptr,
            col_idx,
            values,
        }
    }

    /// Builds a CSR matrix from a triplet store
    ///
    /// A working copy of the triplets is sorted by (row, col) and consumed in a
    /// single forward pass. The row cursor is advanced through every row that
    /// has no entries, so leading, interior and trailing empty rows all get an
    /// empty range instead of an unset pointer.
    ///
    /// # Errors
    ///
    /// Returns [`SmvpError::MalformedRowPtr`] if the finished row pointer array
    /// fails [`SparseMatrixCSR::check_row_ptr`]. That would indicate a bug in
    /// this conversion, not a property of the input.
    pub fn from_triplets(store: &TripletStore<T>) -> Result<Self> {
        let n_rows = store.n_rows();
        let sorted = store.sorted_row_major();

        let mut row_ptr = Vec::with_capacity(n_rows + 1);
        let mut col_idx = Vec::with_capacity(sorted.len());
        let mut values = Vec::with_capacity(sorted.len());

        row_ptr.push(0);
        let mut current_row = 0;

        for t in &sorted {
            // Close every row up to and including the gap before t.row
            while current_row < t.row {
                row_ptr.push(col_idx.len());
                current_row += 1;
            }

            col_idx.push(t.col);
            values.push(t.value);
        }

        // Trailing rows (and the final sentinel)
        while current_row < n_rows {
            row_ptr.push(col_idx.len());
            current_row += 1;
        }

        let matrix = Self {
            n_rows,
            n_cols: store.n_cols(),
            row_ptr,
            col_idx,
            values,
        };
        matrix.check_row_ptr()?;

        debug!(
            n_rows = matrix.n_rows,
            n_cols = matrix.n_cols,
            nnz = matrix.nnz(),
            "built CSR matrix"
        );

        Ok(matrix)
    }

    /// Verifies the structural invariants of `row_ptr`
    ///
    /// `row_ptr` must hold `n_rows + 1` entries, start at 0, never decrease
    /// and end at nnz.
    pub fn check_row_ptr(&self) -> Result<()> {
        if self.row_ptr.len() != self.n_rows + 1 {
            return Err(SmvpError::MalformedRowPtr(format!(
                "expected {} entries, found {}",
                self.n_rows + 1,
                self.row_ptr.len()
            )));
        }
        if self.row_ptr[0] != 0 {
            return Err(SmvpError::MalformedRowPtr(format!(
                "row_ptr[0] = {}",
                self.row_ptr[0]
            )));
        }
        if let Some(r) = self.row_ptr.windows(2).position(|w| w[0] > w[1]) {
            return Err(SmvpError::MalformedRowPtr(format!(
                "row_ptr decreases between rows {} and {}",
                r,
                r + 1
            )));
        }
        if self.row_ptr[self.n_rows] != self.nnz() {
            return Err(SmvpError::MalformedRowPtr(format!(
                "row_ptr[n_rows] = {} but nnz = {}",
                self.row_ptr[self.n_rows],
                self.nnz()
            )));
        }
        Ok(())
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns an iterator over the non-zero elements in row i
    ///
    /// Each item is a tuple (col_idx, value) representing a non-zero element
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, &T)> {
        assert!(i < self.n_rows, "Row index out of bounds");

        let start = self.row_ptr[i];
        let end = self.row_ptr[i + 1];

        self.col_idx[start..end]
            .iter()
            .zip(&self.values[start..end])
            .map(|(&col, val)| (col, val))
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            row_ptr: vec![0; n_rows + 1],
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl<T> SparseMatrixCSR<T>
where
    T: Copy + Num + AddAssign,
{
    /// Computes `y = A·x` into a caller-owned buffer
    ///
    /// `y` is zeroed first, so repeated calls never accumulate.
    ///
    /// # Panics
    ///
    /// Panics if `x.len() != n_cols` or `y.len() != n_rows`.
    #[inline]
    pub fn multiply_into(&self, x: &[T], y: &mut [T]) {
        assert_eq!(x.len(), self.n_cols, "x.len() must equal n_cols");
        assert_eq!(y.len(), self.n_rows, "y.len() must equal n_rows");

        y.fill(T::zero());

        for (row, out) in y.iter_mut().enumerate() {
            for j in self.row_ptr[row]..self.row_ptr[row + 1] {
                *out += self.values[j] * x[self.col_idx[j]];
            }
        }
    }

    /// Computes `y = A·x`
    pub fn multiply(&self, x: &[T]) -> Vec<T> {
        let mut y = vec![T::zero(); self.n_rows];
        self.multiply_into(x, &mut y);
        y
    }
}

/// Longest prefix of each array shown by the Debug dump
const DEBUG_ARRAY_LIMIT: usize = 16;

fn write_array<V: fmt::Debug>(f: &mut fmt::Formatter<'_>, name: &str, items: &[V]) -> fmt::Result {
    write!(f, "  {}: [", name)?;
    for (i, item) in items.iter().take(DEBUG_ARRAY_LIMIT).enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{:?}", item)?;
    }
    if items.len() > DEBUG_ARRAY_LIMIT {
        write!(f, ", ... ({} more)", items.len() - DEBUG_ARRAY_LIMIT)?;
    }
    writeln!(f, "]")
}

/// Dumps the three CSR arrays, row_ptr first
impl<T: fmt::Debug + Copy + Num> fmt::Debug for SparseMatrixCSR<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrixCSR {}x{}, nnz {} {{", self.n_rows, self.n_cols, self.nnz())?;
        write_array(f, "row_ptr", &self.row_ptr)?;
        write_array(f, "col_ind", &self.col_idx)?;
        write_array(f, "val", &self.values)?;
        write!(f, "}}")
    }
}
