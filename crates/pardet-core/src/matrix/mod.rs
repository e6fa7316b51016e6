pub mod elimination;
mod interop;
mod serialization;

pub use elimination::{PIVOT_TOLERANCE, RowPartition};
pub use interop::DenseMatrix;

use crate::numerics::{Element, Extended};
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixShapeError {
    #[error("matrix row {row} has {actual} entries, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("matrix must be square, got {rows}x{cols}")]
    NonSquare { rows: usize, cols: usize },
}

/// Dense square matrix stored row by row.
///
/// The size is fixed at construction. Rows are handed out as slices, so entries
/// can be edited in place but a row can never change length.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    size: usize,
    data: Vec<Vec<T>>,
}

impl<T> Matrix<T> {
    pub const fn new() -> Self {
        Self {
            size: 0,
            data: Vec::new(),
        }
    }

    pub fn filled(size: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            size,
            data: vec![vec![value; size]; size],
        }
    }

    pub fn try_from_rows(rows: Vec<Vec<T>>) -> Result<Self, MatrixShapeError> {
        let size = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((row, actual)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != cols)
        {
            return Err(MatrixShapeError::RaggedRow {
                row,
                expected: cols,
                actual,
            });
        }
        if cols != size {
            return Err(MatrixShapeError::NonSquare { rows: size, cols });
        }

        Ok(Self { size, data: rows })
    }

    pub const fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.data.get(row).and_then(|values| values.get(col))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.iter().map(Vec::as_slice)
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Matrix<U> {
        Matrix {
            size: self.size,
            data: self
                .data
                .iter()
                .map(|row| row.iter().map(&mut f).collect())
                .collect(),
        }
    }

    pub fn into_rows(self) -> Vec<Vec<T>> {
        self.data
    }
}

impl<T: Clone + Default> Matrix<T> {
    pub fn with_size(size: usize) -> Self {
        Self::filled(size, T::default())
    }
}

impl<T: Element> Matrix<T> {
    /// Determinant computed on the calling thread's behalf by a single worker.
    pub fn determinant(&self) -> Extended {
        self.determinant_with_threads(1)
    }

    /// Determinant via LU elimination split across `thread_count` workers.
    ///
    /// The matrix is left untouched: elimination runs on an extended-precision
    /// copy. A thread count of zero is treated as one, an empty matrix yields
    /// zero, and a numerically singular matrix (NaN during elimination) yields
    /// zero.
    pub fn determinant_with_threads(&self, thread_count: usize) -> Extended {
        elimination::determinant(&self.data, thread_count)
    }
}

impl<T> Default for Matrix<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> From<[[T; N]; N]> for Matrix<T> {
    fn from(rows: [[T; N]; N]) -> Self {
        Self {
            size: N,
            data: rows.into_iter().map(Vec::from).collect(),
        }
    }
}

impl<T> TryFrom<Vec<Vec<T>>> for Matrix<T> {
    type Error = MatrixShapeError;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self, Self::Error> {
        Self::try_from_rows(rows)
    }
}

impl<T> Index<usize> for Matrix<T> {
    type Output = [T];

    fn index(&self, row: usize) -> &[T] {
        &self.data[row]
    }
}

impl<T> IndexMut<usize> for Matrix<T> {
    fn index_mut(&mut self, row: usize) -> &mut [T] {
        &mut self.data[row]
    }
}

#[cfg(test)]
mod tests {
    use super::{Matrix, MatrixShapeError};
    use crate::numerics::Extended;

    #[test]
    fn constructors_produce_square_tables() {
        let empty: Matrix<f64> = Matrix::new();
        assert_eq!(empty.size(), 0);
        assert!(empty.is_empty());

        let zeros: Matrix<i32> = Matrix::with_size(3);
        assert_eq!(zeros.size(), 3);
        assert!(zeros.rows().all(|row| row.len() == 3 && row.iter().all(|v| *v == 0)));

        let filled = Matrix::filled(2, 7_u8);
        assert_eq!(filled[1], [7, 7]);

        let literal = Matrix::from([[1, 2], [3, 4]]);
        assert_eq!(literal.size(), 2);
        assert_eq!(literal[0], [1, 2]);
        assert_eq!(literal[1], [3, 4]);
    }

    #[test]
    fn rows_are_editable_in_place() {
        let mut matrix: Matrix<f64> = Matrix::with_size(2);
        matrix[0][0] = 3.0;
        matrix[1][1] = 5.0;
        matrix[1][0] = 1.0;

        assert_eq!(matrix.get(1, 0), Some(&1.0));
        assert_eq!(matrix.get(2, 0), None);
        assert_eq!(matrix.determinant(), Extended::from_f64(15.0));
    }

    #[test]
    fn try_from_rows_validates_shape() {
        let ragged = Matrix::try_from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert_eq!(
            ragged,
            Err(MatrixShapeError::RaggedRow {
                row: 1,
                expected: 2,
                actual: 1
            })
        );

        let wide = Matrix::try_from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        assert_eq!(wide, Err(MatrixShapeError::NonSquare { rows: 2, cols: 3 }));

        let square =
            Matrix::<f64>::try_from(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).expect("square");
        assert_eq!(square.size(), 2);

        let empty = Matrix::<f64>::try_from_rows(Vec::new()).expect("empty");
        assert_eq!(empty.size(), 0);
    }

    #[test]
    fn determinant_leaves_data_untouched() {
        let matrix = Matrix::from([[0.0, 2.0, 1.0], [1.0, -2.0, -3.0], [2.0, 3.0, 1.0]]);
        let before = matrix.clone();
        let _ = matrix.determinant_with_threads(3);
        assert_eq!(matrix, before);
    }

    #[test]
    fn empty_matrix_determinant_is_zero() {
        let matrix: Matrix<f64> = Matrix::new();
        assert_eq!(matrix.determinant(), Extended::ZERO);
        assert_eq!(matrix.determinant_with_threads(8), Extended::ZERO);
    }

    #[test]
    fn map_preserves_shape() {
        let matrix = Matrix::from([[1, 2], [3, 4]]);
        let doubled = matrix.map(|value| f64::from(*value) * 2.0);
        assert_eq!(doubled[1], [6.0, 8.0]);
    }
}
