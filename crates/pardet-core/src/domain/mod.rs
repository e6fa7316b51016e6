pub mod errors;

pub use errors::{DetError, DetResult, ErrorCategory};

use crate::matrix::MatrixShapeError;

impl From<MatrixShapeError> for DetError {
    fn from(error: MatrixShapeError) -> Self {
        DetError::input_validation("INPUT.MATRIX_SHAPE", error.to_string())
    }
}
