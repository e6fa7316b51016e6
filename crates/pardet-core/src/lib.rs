//! Determinants of square matrices via LU decomposition with partial pivoting,
//! with each elimination step split across a caller-chosen number of threads.
//!
//! ```
//! use pardet_core::{Extended, Matrix};
//!
//! let matrix = Matrix::from([[4.0, 3.0], [6.0, 3.0]]);
//! let det = matrix.determinant_with_threads(2);
//! assert!((det - Extended::from(-6.0)).abs().to_f64() < 1.0e-20);
//! ```

pub mod benchmark;
pub mod domain;
pub mod matrix;
pub mod numerics;
pub mod samples;
pub mod sync;

pub use domain::{DetError, DetResult, ErrorCategory};
pub use matrix::{Matrix, MatrixShapeError};
pub use numerics::{Element, Extended};
pub use sync::Barrier;
