//! Integration tests for CSR conversion and the CSR kernel

use smvp_toolbox::utils::{sprs_mat_vec, to_sprs_csr};
use smvp_toolbox::{benchmark_csr, ones_vector, SparseMatrixCSR, Triplet, TripletStore};

fn store(n_rows: usize, n_cols: usize, entries: &[(usize, usize, f64)]) -> TripletStore<f64> {
    let triplets = entries
        .iter()
        .map(|&(r, c, v)| Triplet::new(r, c, v))
        .collect();
    TripletStore::new(n_rows, n_cols, triplets).unwrap()
}

/// Creates a tridiagonal matrix, entries listed column-first so conversion must sort
fn tridiagonal(n: usize) -> TripletStore<f64> {
    let mut entries = Vec::new();
    for i in 0..n {
        entries.push((i, i, 2.0));
    }
    for i in 1..n {
        entries.push((i, i - 1, 1.0));
        entries.push((i - 1, i, 1.0));
    }
    store(n, n, &entries)
}

#[test]
fn test_three_by_three_with_empty_middle_row() {
    let csr = SparseMatrixCSR::from_triplets(&store(
        3,
        3,
        &[(0, 0, 1.0), (0, 2, 2.0), (2, 1, 3.0)],
    ))
    .unwrap();

    assert_eq!(csr.row_ptr, vec![0, 2, 2, 3]);
    assert_eq!(csr.col_idx, vec![0, 2, 1]);
    assert_eq!(csr.values, vec![1.0, 2.0, 3.0]);
    assert_eq!(csr.multiply(&ones_vector(3)), vec![3.0, 0.0, 3.0]);
}

#[test]
fn test_many_gaps() {
    // Rows 0, 1, 3, 4, 6 and 7 are empty
    let csr = SparseMatrixCSR::from_triplets(&store(8, 4, &[(5, 3, 7.0), (2, 0, 1.0), (5, 1, 2.0)]))
        .unwrap();

    assert_eq!(csr.row_ptr, vec![0, 0, 0, 1, 1, 1, 3, 3, 3]);
    assert!(csr.check_row_ptr().is_ok());
    for r in [0, 1, 3, 4, 6, 7] {
        assert_eq!(csr.row_ptr[r], csr.row_ptr[r + 1], "row {r} should be empty");
        assert_eq!(csr.row_iter(r).count(), 0);
    }
}

#[test]
fn test_tridiagonal_row_sums() {
    let n = 6;
    let csr = SparseMatrixCSR::from_triplets(&tridiagonal(n)).unwrap();

    assert_eq!(csr.nnz(), 3 * n - 2);
    let y = csr.multiply(&ones_vector(n));
    assert_eq!(y, vec![3.0, 4.0, 4.0, 4.0, 4.0, 3.0]);
}

#[test]
fn test_non_square_sizes_vectors_by_shape() {
    let csr = SparseMatrixCSR::from_triplets(&store(2, 5, &[(0, 4, 1.0), (1, 0, 2.0), (1, 3, 3.0)]))
        .unwrap();

    let y = csr.multiply(&[1.0, 1.0, 1.0, 1.0, 10.0]);
    assert_eq!(y, vec![10.0, 5.0]);
}

#[test]
fn test_matches_sprs_reference() {
    let csr = SparseMatrixCSR::from_triplets(&tridiagonal(10)).unwrap();
    let x: Vec<f64> = (0..10).map(|i| i as f64 * 0.5).collect();

    let reference = sprs_mat_vec(&to_sprs_csr(&csr), &x);
    let ours = csr.multiply(&x);
    for (a, b) in ours.iter().zip(&reference) {
        assert!((a - b).abs() < 1e-12);
    }
}

#[test]
fn test_benchmark_returns_last_iteration_result() {
    let csr = SparseMatrixCSR::from_triplets(&tridiagonal(4)).unwrap();
    let run = benchmark_csr(&csr, &ones_vector(4), 25).unwrap();

    // Output is a single product, not 25 accumulated ones
    assert_eq!(run.output, vec![3.0, 4.0, 4.0, 3.0]);
    assert_eq!(run.timing.per_iteration.len(), 25);
    assert!(run.timing.per_iteration.iter().all(|&ms| ms >= 0.0));
}
