//! Linear algebra utilities.
//!
//! Column standardisation, covariance and eigen decomposition of symmetric
//! matrices, built on `nalgebra`.

use nalgebra::{DMatrix, DVector, SymmetricEigen};

use crate::error::{MathError, MathResult};
use crate::statistics::{mean, population_std_dev};

/// Variance at or below which a column is treated as constant.
pub const ZERO_VARIANCE_TOLERANCE: f64 = 1e-14;

/// Iteration cap for the symmetric QR algorithm.
pub const EIGEN_MAX_ITERATIONS: usize = 1000;

/// A column-standardised data matrix and the moments used to produce it.
#[derive(Debug, Clone, PartialEq)]
pub struct Standardized {
    /// The standardised data (each column has zero mean and unit population variance).
    pub data: DMatrix<f64>,
    /// Per-column means of the input.
    pub means: DVector<f64>,
    /// Per-column population standard deviations of the input.
    pub std_devs: DVector<f64>,
}

/// Subtracts each column's mean and divides by its population standard
/// deviation (divisor `n`).
///
/// # Errors
///
/// - `MathError::InsufficientData` with fewer than two rows
/// - `MathError::ZeroVariance` if any column is constant
pub fn standardize_columns(data: &DMatrix<f64>) -> MathResult<Standardized> {
    let (n, m) = data.shape();
    if n < 2 {
        return Err(MathError::insufficient_data(2, n));
    }

    let mut means = DVector::zeros(m);
    let mut std_devs = DVector::zeros(m);
    for j in 0..m {
        let column: Vec<f64> = data.column(j).iter().copied().collect();
        let sd = population_std_dev(&column);
        if sd * sd <= ZERO_VARIANCE_TOLERANCE {
            return Err(MathError::ZeroVariance { column: j });
        }
        means[j] = mean(&column);
        std_devs[j] = sd;
    }

    let standardized = DMatrix::from_fn(n, m, |i, j| (data[(i, j)] - means[j]) / std_devs[j]);

    Ok(Standardized {
        data: standardized,
        means,
        std_devs,
    })
}

/// Sample covariance matrix of the columns (divisor `n - 1`).
///
/// # Errors
///
/// Returns `MathError::InsufficientData` with fewer than two rows.
pub fn covariance_matrix(data: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
    let (n, m) = data.shape();
    if n < 2 {
        return Err(MathError::insufficient_data(2, n));
    }

    let means = data.row_mean();
    let centered = DMatrix::from_fn(n, m, |i, j| data[(i, j)] - means[j]);
    Ok(centered.transpose() * &centered / (n - 1) as f64)
}

/// Eigenvalues and eigenvectors of a symmetric matrix, ordered by
/// descending eigenvalue.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenDecomposition {
    /// Eigenvalues, largest first.
    pub eigenvalues: DVector<f64>,
    /// Unit eigenvectors stored as columns, matching `eigenvalues`.
    pub eigenvectors: DMatrix<f64>,
}

impl EigenDecomposition {
    /// Sum of all eigenvalues (the trace of the decomposed matrix).
    #[must_use]
    pub fn total(&self) -> f64 {
        self.eigenvalues.sum()
    }

    /// Number of eigenpairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }

    /// Returns true for a decomposition of an empty matrix.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }
}

/// Decomposes a symmetric matrix with the symmetric QR algorithm.
///
/// The eigenvector signs are whatever the algorithm produces; callers that
/// need a stable orientation must fix it themselves.
///
/// # Errors
///
/// - `MathError::DimensionMismatch` if the matrix is not square
/// - `MathError::InvalidInput` if it contains non-finite values
/// - `MathError::ConvergenceFailed` if the iteration cap is hit
pub fn symmetric_eigen(matrix: &DMatrix<f64>) -> MathResult<EigenDecomposition> {
    let (rows, cols) = matrix.shape();
    if rows != cols {
        return Err(MathError::DimensionMismatch {
            rows1: rows,
            cols1: cols,
            rows2: cols,
            cols2: rows,
        });
    }
    if matrix.iter().any(|v| !v.is_finite()) {
        return Err(MathError::invalid_input("matrix contains non-finite values"));
    }

    let eigen = SymmetricEigen::try_new(matrix.clone(), f64::EPSILON, EIGEN_MAX_ITERATIONS)
        .ok_or_else(|| MathError::convergence_failed("symmetric eigen", EIGEN_MAX_ITERATIONS))?;

    let mut order: Vec<usize> = (0..rows).collect();
    order.sort_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));

    let eigenvalues = DVector::from_iterator(rows, order.iter().map(|&i| eigen.eigenvalues[i]));
    let mut eigenvectors = DMatrix::zeros(rows, rows);
    for (dst, &src) in order.iter().enumerate() {
        eigenvectors.set_column(dst, &eigen.eigenvectors.column(src));
    }

    Ok(EigenDecomposition {
        eigenvalues,
        eigenvectors,
    })
}
