//! Command-line front end: load a Matrix Market file, benchmark, write reports

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use smvp_toolbox::io::{read_matrix_market_file, save_reports, ReportContext};
use smvp_toolbox::matrix::config::{DEFAULT_ITERATIONS, DEFAULT_SLOT_COUNT};
use smvp_toolbox::{Algorithm, BenchmarkConfig, BenchmarkDriver, CisrConfig};

#[derive(Parser)]
#[command(name = "smvp-toolbox", version)]
#[command(about = "Benchmark sparse matrix-vector products over CSR, TJDS and CISR")]
struct Cli {
    /// Matrix Market (.mtx) input file
    input: PathBuf,

    /// Algorithm to run (repeatable; defaults to all)
    #[arg(short, long = "algorithm", value_enum)]
    algorithms: Vec<Algorithm>,

    /// Timed iterations per kernel
    #[arg(short = 'n', long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    /// CISR lane count (1-256)
    #[arg(short, long, default_value_t = DEFAULT_SLOT_COUNT)]
    slots: usize,

    /// Directory the reports are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    info!("smvp-toolbox v{}", smvp_toolbox::VERSION);

    let algorithms = if cli.algorithms.is_empty() {
        Algorithm::ALL.to_vec()
    } else {
        cli.algorithms
    };
    let config = BenchmarkConfig {
        algorithms,
        iterations: cli.iterations,
        cisr: CisrConfig::with_slots(cli.slots),
    };
    let driver = BenchmarkDriver::new(config).context("invalid benchmark configuration")?;

    let store = read_matrix_market_file(&cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;
    info!(
        n_rows = store.n_rows(),
        n_cols = store.n_cols(),
        nnz = store.nnz(),
        "loaded {}",
        cli.input.display()
    );

    let runs = driver.run(&store);

    let ctx = ReportContext::new(
        cli.input.display().to_string(),
        store.n_rows(),
        store.n_cols(),
        store.nnz(),
    );
    let written = save_reports(&cli.output_dir, &ctx, &runs)
        .with_context(|| format!("failed to write reports to {}", cli.output_dir.display()))?;
    for path in &written {
        info!("report saved as {}", path.display());
    }

    let failures: Vec<_> = runs.iter().filter(|r| r.outcome.is_err()).collect();
    for run in &failures {
        if let Err(err) = &run.outcome {
            error!("{} failed: {}", run.algorithm, err);
        }
    }
    if !failures.is_empty() {
        process::exit(1);
    }

    Ok(())
}
