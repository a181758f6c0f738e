// Sparse storage formats and their configuration

pub mod cisr;
pub mod config;
pub mod csr;
pub mod tjds;
pub mod triplet;

pub use cisr::{CisrEncoder, CisrImage, RowAssignment, SlotEntry, SlotGroup};
pub use config::{Algorithm, BenchmarkConfig, CisrConfig};
pub use csr::SparseMatrixCSR;
pub use tjds::{ReorderTable, SparseMatrixTJDS};
pub use triplet::{Triplet, TripletStore};
