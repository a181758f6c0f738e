//! # SMVP toolbox: sparse matrix-vector product benchmarks
//!
//! Benchmarks `y = A·1` over three sparse storage formats built from the same
//! coordinate (triplet) data:
//!
//! - **CSR**: Compressed Sparse Row.
//! - **TJDS**: Transpose Jagged Diagonal Storage, column-compressed and
//!   reordered so each jagged diagonal is a dense run.
//! - **CISR**: Compressed Interleaved Sparse Row, a fixed-lane slot encoding
//!   exported as a packed hex image for hardware memory initialisation.
//!
//! ## Pipeline
//!
//! 1. A [`TripletStore`] holds validated 0-based triplets.
//! 2. Each engine takes its own working copy and converts it.
//! 3. CSR and TJDS kernels run a fixed number of timed iterations; the
//!    per-iteration durations are aggregated into a [`TimingRecord`].
//! 4. The [`BenchmarkDriver`] runs every selected engine and returns one
//!    result per engine; a failing engine does not stop the others.
//!
//! ## Usage
//!
//! ```
//! use smvp_toolbox::{BenchmarkConfig, BenchmarkDriver, Triplet, TripletStore};
//! use smvp_toolbox::driver::AlgorithmOutput;
//!
//! let store = TripletStore::new(
//!     3, 3,
//!     vec![Triplet::new(0, 0, 1.0), Triplet::new(0, 2, 2.0), Triplet::new(2, 1, 3.0)],
//! ).unwrap();
//!
//! let config = BenchmarkConfig { iterations: 10, ..BenchmarkConfig::default() };
//! let driver = BenchmarkDriver::new(config).unwrap();
//!
//! for run in driver.run(&store) {
//!     if let Ok(AlgorithmOutput::Product(product)) = run.outcome {
//!         assert_eq!(product.output, vec![3.0, 0.0, 3.0]);
//!     }
//! }
//! ```

pub mod bench;
pub mod driver;
pub mod error;
pub mod io;
pub mod matrix;
pub mod stats;
pub mod utils;

// Re-export primary components
pub use bench::{benchmark_csr, benchmark_tjds, run_cisr, run_csr, run_tjds, time_iterations, SmvpRun};
pub use driver::{AlgorithmOutput, AlgorithmRun, BenchmarkDriver};
pub use error::{Result, SmvpError};
pub use matrix::{Algorithm, BenchmarkConfig, CisrConfig};
pub use matrix::{CisrEncoder, CisrImage, SlotEntry, SlotGroup};
pub use matrix::{ReorderTable, SparseMatrixCSR, SparseMatrixTJDS, Triplet, TripletStore};
pub use stats::{aggregate, TimingRecord};
pub use utils::{exclusive_scan, ones_vector};

/// Version information for the SMVP toolbox
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
