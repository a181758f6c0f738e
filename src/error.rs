//! Error types for SMVP conversion, benchmarking and export.

use thiserror::Error;

/// Errors that can occur while converting, benchmarking or exporting a matrix.
#[derive(Debug, Error)]
pub enum SmvpError {
    /// A triplet references a row or column outside the matrix dimensions.
    #[error("Invalid dimension: entry ({row}, {col}) lies outside a {n_rows} × {n_cols} matrix")]
    InvalidDimension {
        /// Row index of the offending entry
        row: usize,
        /// Column index of the offending entry
        col: usize,
        /// Number of rows in the matrix
        n_rows: usize,
        /// Number of columns in the matrix
        n_cols: usize,
    },

    /// The declared non-zero count disagrees with the supplied triplets.
    #[error("Declared nnz {declared} does not match the {actual} supplied entries")]
    NnzMismatch {
        /// Non-zero count announced by the source
        declared: usize,
        /// Number of triplets actually supplied
        actual: usize,
    },

    /// Statistics were requested over an empty series of durations.
    #[error("Cannot aggregate an empty series of durations")]
    EmptySeries,

    /// The CISR encoder produced more slot groups than there are non-zeros.
    #[error("Slot overrun: {groups} slot groups exceed nnz = {nnz}")]
    SlotOverrun {
        /// Number of slot groups produced so far
        groups: usize,
        /// Number of non-zeros in the matrix
        nnz: usize,
    },

    /// Iteration count must be positive.
    #[error("Invalid iteration count: {0} (must be at least 1)")]
    InvalidIterationCount(usize),

    /// CISR slot count must fit the packed slot field.
    #[error("Invalid slot count: {0} (must be between 1 and 256)")]
    InvalidSlotCount(usize),

    /// No algorithm was selected for a benchmark run.
    #[error("No algorithm selected")]
    NoAlgorithmSelected,

    /// A CISR field does not fit its packed bit width.
    #[error("CISR {field} {value} does not fit the packed field (limit {limit})")]
    PackOverflow {
        /// Name of the packed field
        field: &'static str,
        /// Value that was rejected
        value: i64,
        /// Largest value the field accepts
        limit: i64,
    },

    /// A CSR row pointer array failed its structural check.
    #[error("Malformed row_ptr: {0}")]
    MalformedRowPtr(String),

    /// Underlying I/O failure in an ingestion or reporting collaborator.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Matrix Market content could not be parsed.
    #[error("Parse error on line {line}: {reason}")]
    Parse {
        /// 1-based line number in the source file
        line: usize,
        /// Description of the problem
        reason: String,
    },

    /// The Matrix Market banner describes a matrix this tool does not handle.
    #[error("Unsupported matrix: {0}")]
    UnsupportedMatrix(String),
}

/// Result type for SMVP operations.
pub type Result<T> = std::result::Result<T, SmvpError>;
