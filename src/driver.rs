//! Benchmark driver: runs each selected algorithm on its own copy of the data
//!
//! A failing algorithm produces an error for that algorithm only; the
//! remaining selections still run.

use tracing::{info, warn};

use crate::bench::{run_cisr, run_csr, run_tjds, CisrExport, SmvpRun};
use crate::error::Result;
use crate::matrix::config::{Algorithm, BenchmarkConfig};
use crate::matrix::TripletStore;

/// What a single algorithm hands back to the reporting side
#[derive(Debug, Clone, PartialEq)]
pub enum AlgorithmOutput {
    /// Output vector and timings from a CSR or TJDS kernel
    Product(SmvpRun<f64>),
    /// Slot encoding and hex stream from the CISR encoder
    Encoding(CisrExport<f64>),
}

/// Outcome of one algorithm within a run
#[derive(Debug)]
pub struct AlgorithmRun {
    pub algorithm: Algorithm,
    pub outcome: Result<AlgorithmOutput>,
}

/// Runs the configured algorithms over a triplet store
#[derive(Debug, Clone)]
pub struct BenchmarkDriver {
    config: BenchmarkConfig,
}

impl BenchmarkDriver {
    /// Creates a driver after validating the whole configuration
    ///
    /// # Errors
    ///
    /// Any of the input validation errors from [`BenchmarkConfig::validate`];
    /// nothing has been converted when they are returned.
    pub fn new(config: BenchmarkConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Runs one algorithm
    pub fn run_algorithm(
        &self,
        algorithm: Algorithm,
        store: &TripletStore<f64>,
    ) -> Result<AlgorithmOutput> {
        match algorithm {
            Algorithm::Csr => run_csr(store, self.config.iterations).map(AlgorithmOutput::Product),
            Algorithm::Tjds => {
                run_tjds(store, self.config.iterations).map(AlgorithmOutput::Product)
            }
            Algorithm::Cisr => run_cisr(store, self.config.cisr).map(AlgorithmOutput::Encoding),
        }
    }

    /// Runs every selected algorithm in order
    pub fn run(&self, store: &TripletStore<f64>) -> Vec<AlgorithmRun> {
        self.config
            .selected()
            .into_iter()
            .map(|algorithm| {
                info!(
                    %algorithm,
                    n_rows = store.n_rows(),
                    n_cols = store.n_cols(),
                    nnz = store.nnz(),
                    "running algorithm"
                );

                let outcome = self.run_algorithm(algorithm, store);
                match &outcome {
                    Ok(AlgorithmOutput::Product(run)) => info!(
                        %algorithm,
                        iterations = run.timing.iterations(),
                        total_ms = run.timing.total,
                        average_ms = run.timing.average,
                        "benchmark complete"
                    ),
                    Ok(AlgorithmOutput::Encoding(export)) => info!(
                        %algorithm,
                        groups = export.image.groups.len(),
                        lines = export.hex_lines.len(),
                        "encoding complete"
                    ),
                    Err(err) => warn!(%algorithm, error = %err, "algorithm failed"),
                }

                AlgorithmRun { algorithm, outcome }
            })
            .collect()
    }
}
