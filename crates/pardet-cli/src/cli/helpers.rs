use anyhow::Context;
use pardet_core::domain::DetError;
use pardet_core::{Extended, Matrix};
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber. `RUST_LOG` wins over `log_level`.
pub(super) fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .with_context(|| format!("invalid log level '{log_level}'"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to install tracing subscriber: {error}"))
}

pub(super) fn load_matrix_file(path: &Path) -> Result<Matrix<Extended>, DetError> {
    let source = fs::read_to_string(path).map_err(|source| {
        DetError::io_system(
            "IO.MATRIX_FILE",
            format!("failed to read matrix file '{}': {source}", path.display()),
        )
    })?;

    parse_matrix_json(&source).map_err(|message| {
        DetError::input_validation(
            "INPUT.MATRIX_FILE",
            format!("failed to parse matrix file '{}': {message}", path.display()),
        )
    })
}

fn parse_matrix_json(source: &str) -> Result<Matrix<Extended>, String> {
    let matrix: Matrix<f64> = serde_json::from_str(source).map_err(|error| error.to_string())?;
    Ok(matrix.map(|value| Extended::from(*value)))
}
