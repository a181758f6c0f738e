//! Utility functions and helpers

pub mod formats;

pub use formats::{from_sprs_csr, sprs_mat_vec, to_sprs_csr};

use num_traits::Num;

/// Computes an exclusive prefix sum (scan) for a vector
///
/// The result has `input.len() + 1` entries; the last one is the total.
pub fn exclusive_scan(input: &[usize]) -> Vec<usize> {
    let mut result = Vec::with_capacity(input.len() + 1);
    let mut sum = 0;

    result.push(0); // First element is always 0

    for &val in input {
        sum += val;
        result.push(sum);
    }

    result
}

/// The all-ones multiplicand used by every benchmark
pub fn ones_vector<T: Num + Clone>(len: usize) -> Vec<T> {
    vec![T::one(); len]
}
