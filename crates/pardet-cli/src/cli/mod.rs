mod commands;
mod helpers;

use clap::Parser;
use pardet_core::domain::DetError;

pub fn run_from_env() -> i32 {
    match run(std::env::args().skip(1)) {
        Ok(code) => code,
        Err(error) => {
            let det_error = error.as_det_error();
            eprintln!("{}", det_error.diagnostic_line());
            eprintln!("{}", det_error.fatal_exit_line());
            det_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("pardet".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            helpers::init_tracing(&cli.log_level)?;
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(name = "pardet", version, about = "Parallel LU determinant engine")]
struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Compute the determinant of a matrix file or a built-in sample
    Det(commands::DetArgs),
    /// Time the determinant workloads for every thread count up to a limit
    Bench(commands::BenchArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Det(args) => commands::run_det_command(args),
        CliCommand::Bench(args) => commands::run_bench_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(DetError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_det_error(&self) -> DetError {
        match self {
            Self::Usage(message) => {
                DetError::input_validation("INPUT.CLI_USAGE", message.trim_end().to_string())
            }
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => DetError::internal("SYS.CLI", format!("{error:#}")),
        }
    }
}

impl From<DetError> for CliError {
    fn from(error: DetError) -> Self {
        Self::Compute(error)
    }
}
