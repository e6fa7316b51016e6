//! Matrix generators with known determinants, used by tests, the CLI and the
//! benchmark sweep.

use crate::matrix::Matrix;
use crate::numerics::Extended;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const RANDOM_ENTRY_BOUND: f64 = 10.0;

/// `value` on the diagonal, default elsewhere. Determinant `value^size`.
pub fn diagonal<T: Clone + Default>(size: usize, value: T) -> Matrix<T> {
    let mut matrix = Matrix::with_size(size);
    for index in 0..size {
        matrix[index][index] = value.clone();
    }
    matrix
}

/// `value` on and above the diagonal, default below. Determinant `value^size`.
pub fn triangle<T: Clone + Default>(size: usize, value: T) -> Matrix<T> {
    let mut matrix = Matrix::with_size(size);
    for row in 0..size {
        for entry in &mut matrix[row][row..] {
            *entry = value.clone();
        }
    }
    matrix
}

/// Every entry equal, so rank is at most one.
pub fn constant<T: Clone>(size: usize, value: T) -> Matrix<T> {
    Matrix::filled(size, value)
}

/// Hilbert matrix `1 / (i + j + 1)` (zero-based), computed in working precision.
pub fn hilbert(size: usize) -> Matrix<Extended> {
    let mut matrix = Matrix::with_size(size);
    for row in 0..size {
        for col in 0..size {
            matrix[row][col] = Extended::from(row + col + 1).recip();
        }
    }
    matrix
}

/// Closed form `c(n)^4 / c(2n)` with `c(n) = 1! 2! ... (n-1)!`.
pub fn expected_hilbert_determinant(size: usize) -> Extended {
    superfactorial(size).powi(4) / superfactorial(2 * size)
}

fn superfactorial(n: usize) -> Extended {
    (1..n)
        .scan(Extended::ONE, |factorial, index| {
            *factorial *= Extended::from(index);
            Some(*factorial)
        })
        .product()
}

/// Entries drawn uniformly from `[-RANDOM_ENTRY_BOUND, RANDOM_ENTRY_BOUND)`.
pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Matrix<f64> {
    let mut matrix = Matrix::with_size(size);
    for row in 0..size {
        for entry in matrix[row].iter_mut() {
            *entry = rng.gen_range(-RANDOM_ENTRY_BOUND..RANDOM_ENTRY_BOUND);
        }
    }
    matrix
}

pub fn random_seeded(size: usize, seed: u64) -> Matrix<f64> {
    random(size, &mut StdRng::seed_from_u64(seed))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleKind {
    Diagonal,
    Triangle,
    Constant,
    Hilbert,
    Random,
}

impl SampleKind {
    pub const ALL: [SampleKind; 5] = [
        Self::Diagonal,
        Self::Triangle,
        Self::Constant,
        Self::Hilbert,
        Self::Random,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Diagonal => "diagonal",
            Self::Triangle => "triangle",
            Self::Constant => "constant",
            Self::Hilbert => "hilbert",
            Self::Random => "random",
        }
    }

    /// `value` feeds diagonal, triangle and constant; `seed` feeds random.
    pub fn build(self, size: usize, value: f64, seed: u64) -> Matrix<Extended> {
        let value = Extended::from_f64(value);
        match self {
            Self::Diagonal => diagonal(size, value),
            Self::Triangle => triangle(size, value),
            Self::Constant => constant(size, value),
            Self::Hilbert => hilbert(size),
            Self::Random => random_seeded(size, seed).map(|entry| Extended::from_f64(*entry)),
        }
    }

    /// Determinant known in closed form, if any.
    pub fn expected_determinant(self, size: usize, value: f64) -> Option<Extended> {
        let value = Extended::from_f64(value);
        match self {
            _ if size == 0 => Some(Extended::ZERO),
            Self::Diagonal | Self::Triangle => Some(value.powi(exponent(size)?)),
            Self::Constant if size >= 2 => Some(Extended::ZERO),
            Self::Constant => Some(value),
            Self::Hilbert => Some(expected_hilbert_determinant(size)),
            Self::Random => None,
        }
    }
}

fn exponent(size: usize) -> Option<i32> {
    i32::try_from(size).ok()
}

impl Display for SampleKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sample kind '{0}', expected one of diagonal, triangle, constant, hilbert, random")]
pub struct UnknownSampleKind(pub String);

impl FromStr for SampleKind {
    type Err = UnknownSampleKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownSampleKind(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{
        SampleKind, constant, diagonal, expected_hilbert_determinant, hilbert, random_seeded,
        triangle,
    };
    use crate::numerics::Extended;

    #[test]
    fn diagonal_and_triangle_shapes() {
        let d = diagonal(3, 2.0);
        assert_eq!(d[0], [2.0, 0.0, 0.0]);
        assert_eq!(d[2], [0.0, 0.0, 2.0]);

        let t = triangle(3, 5);
        assert_eq!(t[0], [5, 5, 5]);
        assert_eq!(t[1], [0, 5, 5]);
        assert_eq!(t[2], [0, 0, 5]);

        let c = constant(2, 3_i32);
        assert_eq!(c[1], [3, 3]);
    }

    #[test]
    fn hilbert_entries_follow_reciprocal_pattern() {
        let h = hilbert(3);
        assert_eq!(h[0][0], Extended::ONE);
        assert_eq!(h[1][0], Extended::from_f64(0.5));
        assert_eq!(h[2][2], Extended::from_f64(5.0).recip());
    }

    #[test]
    fn hilbert_closed_form_matches_known_values() {
        let two = expected_hilbert_determinant(2);
        let diff = (two - Extended::from_f64(12.0).recip()).abs().to_f64();
        assert!(diff < 1.0e-30, "diff={diff:e}");

        assert_eq!(expected_hilbert_determinant(1), Extended::ONE);

        let three = expected_hilbert_determinant(3);
        let diff = (three - Extended::from_f64(2160.0).recip()).abs().to_f64();
        assert!(diff < 1.0e-30, "diff={diff:e}");
    }

    #[test]
    fn seeded_random_is_reproducible_and_bounded() {
        let first = random_seeded(6, 7);
        let second = random_seeded(6, 7);
        assert_eq!(first, second);
        assert!(first.rows().flatten().all(|v| (-10.0..10.0).contains(v)));
        assert_ne!(first, random_seeded(6, 8));
    }

    #[test]
    fn sample_kind_parses_case_insensitively() {
        assert_eq!("Hilbert".parse::<SampleKind>(), Ok(SampleKind::Hilbert));
        assert_eq!(" random ".parse::<SampleKind>(), Ok(SampleKind::Random));
        assert!("sparse".parse::<SampleKind>().is_err());
        assert_eq!(SampleKind::Triangle.to_string(), "triangle");
    }

    #[test]
    fn expected_determinants_for_closed_forms() {
        assert_eq!(
            SampleKind::Diagonal.expected_determinant(5, 2.0),
            Some(Extended::from_f64(32.0))
        );
        assert_eq!(
            SampleKind::Triangle.expected_determinant(10, 3.0),
            Some(Extended::from_f64(59_049.0))
        );
        assert_eq!(
            SampleKind::Constant.expected_determinant(4, 3.0),
            Some(Extended::ZERO)
        );
        assert_eq!(SampleKind::Random.expected_determinant(4, 0.0), None);
        assert_eq!(
            SampleKind::Hilbert.expected_determinant(0, 0.0),
            Some(Extended::ZERO)
        );
    }
}
