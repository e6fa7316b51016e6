//! Thread-count sweep over a fixed set of determinant workloads.

use crate::domain::{DetError, DetResult};
use crate::matrix::Matrix;
use crate::numerics::Element;
use crate::samples;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::fs;
use std::hint::black_box;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::info;

pub const FIXED_RANDOM_SIZE: usize = 200;
pub const DEFAULT_ITERATIONS: usize = 20;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BenchmarkCase {
    /// One `FIXED_RANDOM_SIZE` square random matrix per iteration.
    Random200,
    /// Triangle `i x i` with value `i` for `i = 2..=iterations`.
    TriangleSweep,
    /// Random `i x i` for `i = 2..=iterations`.
    RandomSweep,
    /// Hilbert `i x i` for `i = 2..=iterations`.
    HilbertSweep,
}

impl BenchmarkCase {
    pub const ALL: [BenchmarkCase; 4] = [
        Self::Random200,
        Self::TriangleSweep,
        Self::RandomSweep,
        Self::HilbertSweep,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Random200 => "random-200",
            Self::TriangleSweep => "triangle-sweep",
            Self::RandomSweep => "random-sweep",
            Self::HilbertSweep => "hilbert-sweep",
        }
    }

    /// Runs the workload and returns how many determinants were computed and
    /// the time spent inside the determinant calls.
    fn run(self, iterations: usize, threads: usize, seed: u64) -> (usize, Duration) {
        let timings: Vec<Duration> = match self {
            Self::Random200 => (0..iterations)
                .map(|iteration| {
                    let matrix = samples::random_seeded(
                        FIXED_RANDOM_SIZE,
                        seed.wrapping_add(iteration as u64),
                    );
                    time_determinant(&matrix, threads)
                })
                .collect(),
            Self::TriangleSweep => (2..=iterations)
                .map(|size| time_determinant(&samples::triangle(size, size as f64), threads))
                .collect(),
            Self::RandomSweep => (2..=iterations)
                .map(|size| {
                    let matrix = samples::random_seeded(size, seed.wrapping_add(size as u64));
                    time_determinant(&matrix, threads)
                })
                .collect(),
            Self::HilbertSweep => (2..=iterations)
                .map(|size| time_determinant(&samples::hilbert(size), threads))
                .collect(),
        };

        (timings.len(), timings.into_iter().sum())
    }
}

fn time_determinant<T: Element>(matrix: &Matrix<T>, threads: usize) -> Duration {
    let started = Instant::now();
    black_box(matrix.determinant_with_threads(threads));
    started.elapsed()
}

impl Display for BenchmarkCase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

impl FromStr for BenchmarkCase {
    type Err = DetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|case| case.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| {
                DetError::input_validation(
                    "INPUT.BENCH_CASE",
                    format!(
                        "unknown benchmark case '{value}', expected one of {}",
                        Self::ALL.map(Self::as_str).join(", ")
                    ),
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkConfig {
    pub max_threads: usize,
    pub iterations: usize,
    pub seed: u64,
    pub cases: Vec<BenchmarkCase>,
    pub report_path: Option<PathBuf>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            max_threads: hardware_concurrency(),
            iterations: DEFAULT_ITERATIONS,
            seed: DEFAULT_SEED,
            cases: BenchmarkCase::ALL.to_vec(),
            report_path: None,
        }
    }
}

pub fn hardware_concurrency() -> usize {
    std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub generated_at_unix_seconds: u64,
    pub max_threads: usize,
    pub iterations: usize,
    pub seed: u64,
    pub total_seconds: f64,
    pub rounds: Vec<ThreadRoundReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreadRoundReport {
    pub threads: usize,
    pub total_seconds: f64,
    pub cases: Vec<CaseTiming>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseTiming {
    pub case: BenchmarkCase,
    pub determinants: usize,
    pub elapsed_seconds: f64,
    pub mean_seconds: f64,
}

pub fn run_benchmarks(config: &BenchmarkConfig) -> DetResult<BenchmarkReport> {
    validate_config(config)?;

    let mut rounds = Vec::with_capacity(config.max_threads);
    let mut total_seconds = 0.0;
    for threads in 1..=config.max_threads {
        let round_started = Instant::now();
        let cases = config
            .cases
            .iter()
            .map(|case| {
                let (determinants, elapsed) = case.run(config.iterations, threads, config.seed);
                let elapsed_seconds = elapsed.as_secs_f64();
                CaseTiming {
                    case: *case,
                    determinants,
                    elapsed_seconds,
                    mean_seconds: if determinants == 0 {
                        0.0
                    } else {
                        elapsed_seconds / determinants as f64
                    },
                }
            })
            .collect();

        let round_seconds = round_started.elapsed().as_secs_f64();
        info!(
            threads,
            max_threads = config.max_threads,
            seconds = round_seconds,
            "Processed {threads} of {}",
            config.max_threads
        );
        total_seconds += round_seconds;
        rounds.push(ThreadRoundReport {
            threads,
            total_seconds: round_seconds,
            cases,
        });
    }

    let report = BenchmarkReport {
        generated_at_unix_seconds: unix_seconds(),
        max_threads: config.max_threads,
        iterations: config.iterations,
        seed: config.seed,
        total_seconds,
        rounds,
    };

    if let Some(report_path) = &config.report_path {
        write_report(&report, report_path)?;
    }

    Ok(report)
}

fn validate_config(config: &BenchmarkConfig) -> DetResult<()> {
    if config.max_threads == 0 {
        return Err(DetError::input_validation(
            "INPUT.BENCH_THREADS",
            "benchmark needs at least one thread",
        ));
    }
    if config.iterations == 0 {
        return Err(DetError::input_validation(
            "INPUT.BENCH_ITERATIONS",
            "benchmark needs at least one iteration",
        ));
    }
    if config.cases.is_empty() {
        return Err(DetError::input_validation(
            "INPUT.BENCH_CASE",
            "benchmark needs at least one case",
        ));
    }
    Ok(())
}

pub fn write_report(report: &BenchmarkReport, path: &Path) -> DetResult<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| {
            DetError::io_system(
                "IO.BENCH_REPORT",
                format!(
                    "failed to create report directory '{}': {source}",
                    parent.display()
                ),
            )
        })?;
    }

    let json = serde_json::to_string_pretty(report).map_err(|source| {
        DetError::internal(
            "SYS.BENCH_REPORT",
            format!("failed to serialize benchmark report: {source}"),
        )
    })?;
    fs::write(path, json).map_err(|source| {
        DetError::io_system(
            "IO.BENCH_REPORT",
            format!("failed to write report '{}': {source}", path.display()),
        )
    })
}

pub fn render_human_summary(report: &BenchmarkReport) -> String {
    let mut lines = vec![format!(
        "Benchmark: threads 1..={}, iterations {}, seed {}",
        report.max_threads, report.iterations, report.seed
    )];

    for round in &report.rounds {
        lines.push(String::new());
        lines.push(format!("Threads used: {}", round.threads));
        for timing in &round.cases {
            lines.push(format!(
                "  {}: {} determinants in {:.6}s (mean {:.6}s)",
                timing.case, timing.determinants, timing.elapsed_seconds, timing.mean_seconds
            ));
        }
        lines.push(format!("Time taken: {:.3}s", round.total_seconds));
    }

    lines.push(String::new());
    lines.push(format!("Benchmark finished in {:.3}s", report.total_seconds));
    lines.join("\n")
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}
