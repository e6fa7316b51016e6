use super::CliError;
use super::helpers::load_matrix_file;
use pardet_core::benchmark::{
    BenchmarkCase, BenchmarkConfig, DEFAULT_ITERATIONS, DEFAULT_SEED, hardware_concurrency,
    render_human_summary, run_benchmarks,
};
use pardet_core::domain::DetError;
use pardet_core::numerics::{Tolerance, compare_with_tolerance, format_extended};
use pardet_core::samples::SampleKind;
use pardet_core::{Extended, Matrix};
use std::path::PathBuf;
use tracing::debug;

#[derive(clap::Args)]
#[command(group(clap::ArgGroup::new("source").required(true).args(["input", "sample"])))]
pub(super) struct DetArgs {
    /// JSON file holding the matrix as an array of equal-length rows
    #[arg(long)]
    input: Option<PathBuf>,

    /// Built-in sample: diagonal, triangle, constant, hilbert or random
    #[arg(long, requires = "size")]
    sample: Option<SampleKind>,

    /// Size of the built-in sample
    #[arg(long)]
    size: Option<usize>,

    /// Entry value for the diagonal, triangle and constant samples
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    value: f64,

    /// Seed for the random sample
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Worker threads used for elimination (0 is treated as 1)
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Expected determinant; exit with status 1 when the result is outside tolerance
    #[arg(long, allow_negative_numbers = true)]
    expect: Option<f64>,

    /// Absolute tolerance applied to --expect
    #[arg(long, default_value_t = 1.0e-7)]
    tolerance: f64,
}

#[derive(clap::Args)]
pub(super) struct BenchArgs {
    /// Highest thread count in the sweep (default: available parallelism)
    #[arg(long)]
    max_threads: Option<usize>,

    /// Iterations per case; sweep cases use sizes 2..=iterations
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    /// Seed for random workloads
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Case to run (repeatable): random-200, triangle-sweep, random-sweep, hilbert-sweep
    #[arg(long = "case")]
    cases: Vec<BenchmarkCase>,

    /// JSON report output path
    #[arg(long)]
    report: Option<PathBuf>,
}

impl BenchArgs {
    fn into_config(self) -> BenchmarkConfig {
        BenchmarkConfig {
            max_threads: self.max_threads.unwrap_or_else(hardware_concurrency),
            iterations: self.iterations,
            seed: self.seed,
            cases: if self.cases.is_empty() {
                BenchmarkCase::ALL.to_vec()
            } else {
                self.cases
            },
            report_path: self.report,
        }
    }
}

pub(super) fn run_det_command(args: DetArgs) -> Result<i32, CliError> {
    let matrix = resolve_matrix(&args)?;
    debug!(size = matrix.size(), threads = args.threads, "computing determinant");

    let determinant = matrix.determinant_with_threads(args.threads);
    if !determinant.is_finite() {
        return Err(CliError::Compute(DetError::computation(
            "COMPUTE.DETERMINANT_RANGE",
            format!(
                "determinant of the {size}x{size} matrix is {} and cannot be represented",
                format_extended(determinant),
                size = matrix.size()
            ),
        )));
    }

    println!("size: {}", matrix.size());
    println!("threads: {}", args.threads.max(1));
    println!("determinant: {}", format_extended(determinant));

    let Some(expected) = args.expect else {
        return Ok(0);
    };

    let comparison = compare_with_tolerance(
        Extended::from(expected),
        determinant,
        Tolerance::absolute(args.tolerance),
    );
    println!("expected: {}", format_extended(Extended::from(expected)));
    println!("abs_diff: {:.6E}", comparison.abs_diff);
    if comparison.passes {
        println!("status: PASS");
        Ok(0)
    } else {
        println!("status: FAIL");
        Ok(1)
    }
}

fn resolve_matrix(args: &DetArgs) -> Result<Matrix<Extended>, CliError> {
    if let Some(path) = &args.input {
        return Ok(load_matrix_file(path)?);
    }

    match (args.sample, args.size) {
        (Some(kind), Some(size)) => Ok(kind.build(size, args.value, args.seed)),
        _ => Err(CliError::Compute(DetError::input_validation(
            "INPUT.CLI_SAMPLE",
            "--sample requires --size",
        ))),
    }
}

pub(super) fn run_bench_command(args: BenchArgs) -> Result<i32, CliError> {
    let config = args.into_config();
    let report = run_benchmarks(&config)?;
    println!("{}", render_human_summary(&report));
    if let Some(report_path) = &config.report_path {
        println!("JSON report: {}", report_path.display());
    }

    Ok(0)
}
