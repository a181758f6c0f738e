//! Configuration for benchmark runs and the CISR encoder

use std::fmt;

use crate::error::{Result, SmvpError};
use crate::matrix::cisr::SLOT_BITS;

/// Default number of timed iterations per algorithm
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Default number of CISR lanes
pub const DEFAULT_SLOT_COUNT: usize = 16;

/// Most CISR lanes the packed slot field can address
pub const MAX_SLOT_COUNT: usize = 1 << SLOT_BITS;

/// Storage format / kernel to benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Algorithm {
    /// Compressed Sparse Row
    Csr,
    /// Transpose Jagged Diagonal Storage
    Tjds,
    /// Compressed Interleaved Sparse Row slot encoding
    Cisr,
}

impl Algorithm {
    /// Every supported algorithm, in run order
    pub const ALL: [Algorithm; 3] = [Algorithm::Csr, Algorithm::Tjds, Algorithm::Cisr];

    /// Lowercase name used in file names and logs
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Csr => "csr",
            Algorithm::Tjds => "tjds",
            Algorithm::Cisr => "cisr",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters of the CISR slot encoder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CisrConfig {
    /// Number of parallel lanes
    pub slot_count: usize,
    /// Two-hex-digit tag prefixed to every exported line
    pub line_tag: u8,
}

impl Default for CisrConfig {
    fn default() -> Self {
        Self {
            slot_count: DEFAULT_SLOT_COUNT,
            line_tag: 0x00,
        }
    }
}

impl CisrConfig {
    /// Config with the given lane count and the default tag
    pub fn with_slots(slot_count: usize) -> Self {
        Self {
            slot_count,
            ..Self::default()
        }
    }

    /// Lane count must be in `1..=MAX_SLOT_COUNT`
    pub fn validate(&self) -> Result<()> {
        if self.slot_count == 0 || self.slot_count > MAX_SLOT_COUNT {
            return Err(SmvpError::InvalidSlotCount(self.slot_count));
        }
        Ok(())
    }
}

/// Configuration for a benchmark run
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkConfig {
    /// Algorithms to run, in order; duplicates are ignored
    pub algorithms: Vec<Algorithm>,

    /// Timed iterations per kernel
    pub iterations: usize,

    /// CISR encoder parameters
    pub cisr: CisrConfig,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            algorithms: Algorithm::ALL.to_vec(),
            iterations: DEFAULT_ITERATIONS,
            cisr: CisrConfig::default(),
        }
    }
}

impl BenchmarkConfig {
    /// Create a config running only the given algorithms
    pub fn for_algorithms(algorithms: &[Algorithm]) -> Self {
        Self {
            algorithms: algorithms.to_vec(),
            ..Self::default()
        }
    }

    /// Checks every input parameter before any conversion work starts
    ///
    /// # Errors
    ///
    /// [`SmvpError::NoAlgorithmSelected`], [`SmvpError::InvalidIterationCount`]
    /// or [`SmvpError::InvalidSlotCount`].
    pub fn validate(&self) -> Result<()> {
        if self.algorithms.is_empty() {
            return Err(SmvpError::NoAlgorithmSelected);
        }
        validate_iterations(self.iterations)?;
        if self.algorithms.contains(&Algorithm::Cisr) {
            self.cisr.validate()?;
        }
        Ok(())
    }

    /// Selected algorithms with duplicates removed, first occurrence wins
    pub fn selected(&self) -> Vec<Algorithm> {
        let mut seen = Vec::with_capacity(self.algorithms.len());
        for &alg in &self.algorithms {
            if !seen.contains(&alg) {
                seen.push(alg);
            }
        }
        seen
    }
}

/// Rejects a zero iteration count
pub fn validate_iterations(iterations: usize) -> Result<()> {
    if iterations == 0 {
        return Err(SmvpError::InvalidIterationCount(iterations));
    }
    Ok(())
}
