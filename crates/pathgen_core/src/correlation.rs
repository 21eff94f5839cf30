//! Correlation matrices and Cholesky factors.
//!
//! Given `n` independent standard normals `Z`, correlated normals are
//! obtained as
//!
//! ```text
//! W = L * Z
//! ```
//!
//! where `L` is the lower triangular Cholesky factor of the correlation
//! matrix `C = L * L^T`. Positive semi-definite matrices (for example a
//! 2x2 matrix with `rho = ±1`) are accepted; their factor carries zeros on
//! the degenerate diagonal entries.
//!
//! ## Usage
//!
//! ```
//! use pathgen_core::correlation::CorrelationMatrix;
//!
//! let corr = CorrelationMatrix::two_factor(-0.7).unwrap();
//! let cholesky = corr.cholesky().unwrap();
//!
//! let mut w = [0.0; 2];
//! cholesky.transform_into(&[0.5, 0.8], &mut w);
//! assert_eq!(w[0], 0.5);
//! ```

use crate::error::CorrelationError;

/// Tolerance for diagonal, symmetry and semi-definiteness checks.
const TOLERANCE: f64 = 1e-12;

/// Correlation matrix with validation and Cholesky decomposition.
///
/// A correlation matrix must be:
/// - square and symmetric
/// - unit on the diagonal
/// - bounded to [-1, 1] off the diagonal
/// - positive semi-definite (checked during factorisation)
#[derive(Clone, Debug, PartialEq)]
pub struct CorrelationMatrix {
    /// Matrix elements in row-major order.
    data: Vec<f64>,
    dim: usize,
}

impl CorrelationMatrix {
    /// Creates a correlation matrix from a row-major slice of `dim * dim`
    /// elements.
    ///
    /// # Errors
    ///
    /// Returns a [`CorrelationError`] describing the first violated
    /// constraint.
    pub fn new(data: &[f64], dim: usize) -> Result<Self, CorrelationError> {
        let expected = dim * dim;
        if data.len() != expected {
            return Err(CorrelationError::InvalidDimensions {
                expected,
                got: data.len(),
            });
        }

        for i in 0..dim {
            let diag = data[i * dim + i];
            if !((diag - 1.0).abs() <= TOLERANCE) {
                return Err(CorrelationError::InvalidDiagonal {
                    index: i,
                    value: diag,
                });
            }
        }

        for i in 0..dim {
            for j in (i + 1)..dim {
                let val_ij = data[i * dim + j];
                let val_ji = data[j * dim + i];

                if !(-1.0..=1.0).contains(&val_ij) {
                    return Err(CorrelationError::OutOfRange {
                        i,
                        j,
                        value: val_ij,
                    });
                }

                if !((val_ij - val_ji).abs() <= TOLERANCE) {
                    return Err(CorrelationError::NotSymmetric { i, j });
                }
            }
        }

        Ok(Self {
            data: data.to_vec(),
            dim,
        })
    }

    /// The 2x2 matrix `[[1, rho], [rho, 1]]`.
    pub fn two_factor(rho: f64) -> Result<Self, CorrelationError> {
        Self::new(&[1.0, rho, rho, 1.0], 2)
    }

    /// Matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at (i, j).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.dim + j]
    }

    /// Computes the lower triangular factor `L` with `C = L * L^T`.
    ///
    /// # Errors
    ///
    /// Returns [`CorrelationError::NotPositiveSemiDefinite`] if a pivot is
    /// negative, or zero while the remaining column is not.
    pub fn cholesky(&self) -> Result<CholeskyFactor, CorrelationError> {
        let n = self.dim;
        let mut lower = vec![0.0; n * n];

        for i in 0..n {
            for j in 0..=i {
                if j == i {
                    let sum: f64 = (0..j).map(|k| lower[j * n + k] * lower[j * n + k]).sum();
                    let diag = self.get(j, j) - sum;
                    if diag < -TOLERANCE {
                        return Err(CorrelationError::NotPositiveSemiDefinite);
                    }
                    lower[j * n + j] = diag.max(0.0).sqrt();
                } else {
                    let sum: f64 = (0..j).map(|k| lower[i * n + k] * lower[j * n + k]).sum();
                    let residual = self.get(i, j) - sum;
                    let l_jj = lower[j * n + j];
                    lower[i * n + j] = if l_jj > TOLERANCE {
                        residual / l_jj
                    } else if residual.abs() <= TOLERANCE {
                        0.0
                    } else {
                        return Err(CorrelationError::NotPositiveSemiDefinite);
                    };
                }
            }
        }

        Ok(CholeskyFactor { data: lower, dim: n })
    }
}

/// Lower triangular Cholesky factor of a correlation matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct CholeskyFactor {
    /// Lower triangular elements (row-major).
    data: Vec<f64>,
    dim: usize,
}

impl CholeskyFactor {
    /// Matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at (i, j); zero above the diagonal.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if j > i {
            0.0
        } else {
            self.data[i * self.dim + j]
        }
    }

    /// Writes `L * z` into `out`.
    ///
    /// # Panics
    ///
    /// Panics if `z` or `out` is shorter than `dim()`.
    #[inline]
    pub fn transform_into(&self, z: &[f64], out: &mut [f64]) {
        assert!(
            z.len() >= self.dim && out.len() >= self.dim,
            "Input length {} / output length {} is less than matrix dimension {}",
            z.len(),
            out.len(),
            self.dim
        );

        for (i, w) in out.iter_mut().take(self.dim).enumerate() {
            *w = (0..=i).map(|j| self.get(i, j) * z[j]).sum();
        }
    }
}
