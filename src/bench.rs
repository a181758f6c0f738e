//! Timed SMVP kernels
//!
//! Every kernel runs a fixed number of iterations. Each iteration zeroes the
//! output vector and performs one full product; only that unit of work sits
//! between the two `Instant` readings. Recording the duration, logging and
//! everything else happens outside the measured window.

use std::hint::black_box;
use std::ops::AddAssign;
use std::time::Instant;

use num_traits::{Num, ToPrimitive};
use tracing::debug;

use crate::error::Result;
use crate::matrix::cisr::{CisrEncoder, CisrImage};
use crate::matrix::config::{validate_iterations, CisrConfig};
use crate::matrix::{SparseMatrixCSR, SparseMatrixTJDS, TripletStore};
use crate::stats::{aggregate, duration_to_ms, TimingRecord};
use crate::utils::ones_vector;

/// Output vector of the final iteration together with its timings
#[derive(Debug, Clone, PartialEq)]
pub struct SmvpRun<T> {
    pub output: Vec<T>,
    pub timing: TimingRecord,
}

/// Runs `kernel` `iterations` times, timing each call on the monotonic clock
///
/// # Errors
///
/// Returns [`crate::SmvpError::InvalidIterationCount`] for zero iterations,
/// before `kernel` is ever called.
pub fn time_iterations<F>(iterations: usize, mut kernel: F) -> Result<TimingRecord>
where
    F: FnMut(),
{
    validate_iterations(iterations)?;

    let mut durations = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let start = Instant::now();
        kernel();
        let elapsed = start.elapsed();
        durations.push(duration_to_ms(elapsed));
    }

    aggregate(&durations)
}

/// Benchmarks the CSR kernel against `x`
pub fn benchmark_csr<T>(csr: &SparseMatrixCSR<T>, x: &[T], iterations: usize) -> Result<SmvpRun<T>>
where
    T: Copy + Num + AddAssign,
{
    let mut y = vec![T::zero(); csr.n_rows];
    let timing = time_iterations(iterations, || {
        csr.multiply_into(black_box(x), black_box(&mut y));
    })?;

    Ok(SmvpRun { output: y, timing })
}

/// Benchmarks the TJDS kernel against `x` (given in original column order)
///
/// The multiplicand is permuted once, before timing starts.
pub fn benchmark_tjds<T>(
    tjds: &SparseMatrixTJDS<T>,
    x: &[T],
    iterations: usize,
) -> Result<SmvpRun<T>>
where
    T: Copy + Num + AddAssign,
{
    let x_perm = tjds.permute_vector(x);
    let mut y = vec![T::zero(); tjds.n_rows];
    let timing = time_iterations(iterations, || {
        tjds.multiply_permuted_into(black_box(&x_perm), black_box(&mut y));
    })?;

    Ok(SmvpRun { output: y, timing })
}

/// Validates, converts and benchmarks CSR against the ones vector
pub fn run_csr<T>(store: &TripletStore<T>, iterations: usize) -> Result<SmvpRun<T>>
where
    T: Copy + Num + AddAssign,
{
    validate_iterations(iterations)?;

    let csr = SparseMatrixCSR::from_triplets(store)?;
    let x = ones_vector(store.n_cols());
    benchmark_csr(&csr, &x, iterations)
}

/// Validates, converts and benchmarks TJDS against the ones vector
pub fn run_tjds<T>(store: &TripletStore<T>, iterations: usize) -> Result<SmvpRun<T>>
where
    T: Copy + Num + AddAssign,
{
    validate_iterations(iterations)?;

    let tjds = SparseMatrixTJDS::from_triplets(store);
    let x = ones_vector(store.n_cols());
    benchmark_tjds(&tjds, &x, iterations)
}

/// CISR encoding together with its packed hex export
#[derive(Debug, Clone, PartialEq)]
pub struct CisrExport<T> {
    pub image: CisrImage<T>,
    pub hex_lines: Vec<String>,
}

/// Validates, converts (through an untimed CSR view) and encodes CISR
pub fn run_cisr<T>(store: &TripletStore<T>, config: CisrConfig) -> Result<CisrExport<T>>
where
    T: Copy + Num + ToPrimitive,
{
    let encoder = CisrEncoder::new(config)?;

    let csr = SparseMatrixCSR::from_triplets(store)?;
    let image = encoder.encode(&csr)?;
    let hex_lines = image.to_hex_lines(config.line_tag)?;

    debug!(lines = hex_lines.len(), "packed CISR image");

    Ok(CisrExport { image, hex_lines })
}
