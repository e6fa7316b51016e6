use super::{Matrix, MatrixShapeError};
use faer::Mat;

pub type DenseMatrix = Mat<f64>;

impl TryFrom<&DenseMatrix> for Matrix<f64> {
    type Error = MatrixShapeError;

    fn try_from(dense: &DenseMatrix) -> Result<Self, Self::Error> {
        let rows = dense.nrows();
        let cols = dense.ncols();
        if rows != cols {
            return Err(MatrixShapeError::NonSquare { rows, cols });
        }

        let data = (0..rows)
            .map(|row| (0..cols).map(|col| dense[(row, col)]).collect())
            .collect();
        Ok(Self { size: rows, data })
    }
}

impl Matrix<f64> {
    pub fn to_dense(&self) -> DenseMatrix {
        let mut dense = DenseMatrix::zeros(self.size, self.size);
        for (row_index, row) in self.data.iter().enumerate() {
            for (col_index, value) in row.iter().enumerate() {
                dense[(row_index, col_index)] = *value;
            }
        }
        dense
    }
}
