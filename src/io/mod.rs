//! Ingestion and reporting around the core engines
//!
//! Nothing in `matrix`, `bench` or `driver` touches the filesystem; these
//! modules turn files into a [`crate::TripletStore`] and results back into files.

pub mod matrix_market;
pub mod report;

pub use matrix_market::{read_matrix_market, read_matrix_market_file};
pub use report::{save_reports, ReportContext};
