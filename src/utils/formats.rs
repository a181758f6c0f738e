//! Interop with the `sprs` crate, used as an independent reference kernel

use crate::matrix::SparseMatrixCSR;
use num_traits::Num;
use sprs::CsMat;
use std::ops::AddAssign;

/// Converts our CSR matrix format to sprs CsMat format
///
/// sprs requires sorted, duplicate-free column indices within each row, which
/// [`SparseMatrixCSR::from_triplets`] produces for duplicate-free input.
pub fn to_sprs_csr<T>(matrix: &SparseMatrixCSR<T>) -> CsMat<T>
where
    T: Copy + Num + Default,
{
    CsMat::new(
        (matrix.n_rows, matrix.n_cols),
        matrix.row_ptr.clone(),
        matrix.col_idx.clone(),
        matrix.values.clone(),
    )
}

/// Converts sprs CsMat in CSR format to our SparseMatrixCSR format
pub fn from_sprs_csr<T>(matrix: CsMat<T>) -> SparseMatrixCSR<T>
where
    T: Copy + Num + Default,
{
    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let shape = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    SparseMatrixCSR::new(shape.0, shape.1, indptr, indices, data)
}

/// Matrix-vector product computed by walking a sprs CSR matrix
pub fn sprs_mat_vec<T>(matrix: &CsMat<T>, x: &[T]) -> Vec<T>
where
    T: Copy + Num + AddAssign,
{
    assert!(matrix.is_csr(), "sprs_mat_vec expects a CSR matrix");
    assert_eq!(x.len(), matrix.cols(), "x.len() must equal cols");

    let mut y = vec![T::zero(); matrix.rows()];
    for (row, vec) in matrix.outer_iterator().enumerate() {
        for (col, &val) in vec.iter() {
            y[row] += val * x[col];
        }
    }
    y
}
