//! Plain-text benchmark reports and CISR hex images

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::bench::SmvpRun;
use crate::driver::{AlgorithmOutput, AlgorithmRun};
use crate::error::Result;
use crate::matrix::config::Algorithm;

/// Facts about the run that every report repeats
#[derive(Debug, Clone)]
pub struct ReportContext {
    /// Input file as given on the command line
    pub input: String,
    pub n_rows: usize,
    pub n_cols: usize,
    pub nnz: usize,
    /// Unix time used in the header and the file names
    pub generated_at: u64,
}

impl ReportContext {
    pub fn new(input: impl Into<String>, n_rows: usize, n_cols: usize, nnz: usize) -> Self {
        let generated_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            input: input.into(),
            n_rows,
            n_cols,
            nnz,
            generated_at,
        }
    }
}

/// `smvp-<alg>_output_<unix-time>.<ext>`
pub fn report_file_name(algorithm: Algorithm, generated_at: u64, extension: &str) -> String {
    format!("smvp-{}_output_{}.{}", algorithm, generated_at, extension)
}

/// Writes the timing summary and output vector of one kernel
pub fn write_product_report<W: Write>(
    w: &mut W,
    algorithm: Algorithm,
    ctx: &ReportContext,
    run: &SmvpRun<f64>,
) -> io::Result<()> {
    let timing = &run.timing;

    writeln!(
        w,
        "Execution results for smvp-{} v{}",
        algorithm,
        crate::VERSION
    )?;
    writeln!(w, "Generated on {} (Unix time)", ctx.generated_at)?;
    writeln!(w)?;
    writeln!(w, "Sparse matrix file in use:\n{}", ctx.input)?;
    writeln!(w)?;
    writeln!(w, "Matrix dimensions:\n{} x {}", ctx.n_rows, ctx.n_cols)?;
    writeln!(w)?;
    writeln!(w, "Non-zero numbers contained in matrix:\n{}", ctx.nnz)?;
    writeln!(w)?;
    writeln!(w, "Compute time for {} iterations (ms):", timing.iterations())?;
    writeln!(w, "  total:   {}", timing.total)?;
    writeln!(w, "  average: {}", timing.average)?;
    writeln!(w, "  min:     {}", timing.min)?;
    writeln!(w, "  max:     {}", timing.max)?;
    writeln!(w, "  stdev:   {}", timing.stdev)?;
    writeln!(w)?;
    writeln!(w, "Per-iteration compute time (ms, execution order):")?;
    for (i, ms) in timing.per_iteration.iter().enumerate() {
        writeln!(w, "  {:>6}: {}", i, ms)?;
    }
    writeln!(w)?;
    writeln!(w, "Output vector (one cell per line):")?;
    writeln!(w, "[")?;
    for cell in &run.output {
        writeln!(w, "{}", cell)?;
    }
    writeln!(w, "]")?;

    Ok(())
}

/// Writes one hex line per packed CISR entry
pub fn write_hex_image<W: Write>(w: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(w, "{}", line)?;
    }
    Ok(())
}

/// Writes a file per successful algorithm into `dir` and returns their paths
///
/// Failed algorithms are skipped; their errors stay with the caller.
pub fn save_reports(dir: &Path, ctx: &ReportContext, runs: &[AlgorithmRun]) -> Result<Vec<PathBuf>> {
    if !fs::metadata(dir)?.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} is not a directory", dir.display()),
        )
        .into());
    }

    let mut written = Vec::new();
    for run in runs {
        let Ok(output) = &run.outcome else {
            continue;
        };

        let path = match output {
            AlgorithmOutput::Product(product) => {
                let path = dir.join(report_file_name(run.algorithm, ctx.generated_at, "txt"));
                let mut w = BufWriter::new(File::create(&path)?);
                write_product_report(&mut w, run.algorithm, ctx, product)?;
                w.flush()?;
                path
            }
            AlgorithmOutput::Encoding(export) => {
                let path = dir.join(report_file_name(run.algorithm, ctx.generated_at, "hex"));
                let mut w = BufWriter::new(File::create(&path)?);
                write_hex_image(&mut w, &export.hex_lines)?;
                w.flush()?;
                path
            }
        };
        written.push(path);
    }

    Ok(written)
}
