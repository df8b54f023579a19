//! Results of a factor fit.

use curvefly_core::{ChangeTable, Date, Tenor};
use nalgebra::{DMatrix, DVector};

use crate::error::AnalyticsResult;
use crate::validation::{ensure_finite, require_columns};

/// Display label for component `k` (zero-based): `PC1`, `PC2`, ...
#[must_use]
pub fn component_label(k: usize) -> String {
    format!("PC{}", k + 1)
}

/// Per-maturity weights of each retained component.
///
/// Row `k` is the unit eigenvector of component `k`; rows are mutually
/// orthogonal. Columns follow the model's maturity order.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorLoadings {
    tenors: Vec<Tenor>,
    matrix: DMatrix<f64>,
}

impl FactorLoadings {
    pub(crate) fn new(tenors: Vec<Tenor>, matrix: DMatrix<f64>) -> Self {
        debug_assert_eq!(tenors.len(), matrix.ncols());
        Self { tenors, matrix }
    }

    /// Number of retained components (K).
    #[must_use]
    pub fn n_components(&self) -> usize {
        self.matrix.nrows()
    }

    /// Maturities, in column order (M).
    #[must_use]
    pub fn tenors(&self) -> &[Tenor] {
        &self.tenors
    }

    /// Weights of component `k` across maturities.
    ///
    /// # Panics
    ///
    /// Panics if `k >= n_components()`.
    #[must_use]
    pub fn component(&self, k: usize) -> Vec<f64> {
        self.matrix.row(k).iter().copied().collect()
    }

    /// Weight of one maturity within component `k`.
    #[must_use]
    pub fn loading(&self, k: usize, tenor: Tenor) -> Option<f64> {
        let col = self.tenors.iter().position(|t| *t == tenor)?;
        (k < self.n_components()).then(|| self.matrix[(k, col)])
    }

    /// The K x M loadings matrix.
    #[must_use]
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }
}

/// Share of total standardised variance captured by each retained component.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplainedVariance {
    eigenvalues: Vec<f64>,
    ratios: Vec<f64>,
}

impl ExplainedVariance {
    pub(crate) fn new(eigenvalues: Vec<f64>, ratios: Vec<f64>) -> Self {
        Self {
            eigenvalues,
            ratios,
        }
    }

    /// Fractions in `[0, 1]`, non-increasing.
    #[must_use]
    pub fn ratios(&self) -> &[f64] {
        &self.ratios
    }

    /// Eigenvalues of the retained components, largest first.
    #[must_use]
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    /// Running sum of the ratios.
    #[must_use]
    pub fn cumulative(&self) -> Vec<f64> {
        self.ratios
            .iter()
            .scan(0.0, |acc, r| {
                *acc += r;
                Some(*acc)
            })
            .collect()
    }

    /// Total share explained by the retained components.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.ratios.iter().sum()
    }
}

/// Factor scores: one row per change date, one column per component.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorSeries {
    dates: Vec<Date>,
    scores: DMatrix<f64>,
}

impl FactorSeries {
    pub(crate) fn new(dates: Vec<Date>, scores: DMatrix<f64>) -> Self {
        debug_assert_eq!(dates.len(), scores.nrows());
        Self { dates, scores }
    }

    /// Number of dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if there are no dates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of components (K).
    #[must_use]
    pub fn n_components(&self) -> usize {
        self.scores.ncols()
    }

    /// Row dates.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Scores of all components on row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[must_use]
    pub fn row(&self, index: usize) -> Vec<f64> {
        self.scores.row(index).iter().copied().collect()
    }

    /// Time series of component `k`.
    ///
    /// # Panics
    ///
    /// Panics if `k >= n_components()`.
    #[must_use]
    pub fn component(&self, k: usize) -> Vec<f64> {
        self.scores.column(k).iter().copied().collect()
    }

    /// The N x K score matrix.
    #[must_use]
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.scores
    }
}

/// Everything one factor fit produces.
///
/// The standardisation moments are kept so that new change tables can be
/// projected onto the same factors with [`FactorDecomposition::transform`].
#[derive(Debug, Clone, PartialEq)]
pub struct FactorDecomposition {
    pub(crate) loadings: FactorLoadings,
    pub(crate) series: FactorSeries,
    pub(crate) explained_variance: ExplainedVariance,
    pub(crate) means: DVector<f64>,
    pub(crate) std_devs: DVector<f64>,
}

impl FactorDecomposition {
    /// Per-maturity loadings (K x M).
    #[must_use]
    pub fn loadings(&self) -> &FactorLoadings {
        &self.loadings
    }

    /// Factor scores of the fitted changes.
    #[must_use]
    pub fn series(&self) -> &FactorSeries {
        &self.series
    }

    /// Explained variance of the retained components.
    #[must_use]
    pub fn explained_variance(&self) -> &ExplainedVariance {
        &self.explained_variance
    }

    /// Column means of the fitted changes, in maturity order.
    #[must_use]
    pub fn means(&self) -> &[f64] {
        self.means.as_slice()
    }

    /// Column population standard deviations of the fitted changes.
    #[must_use]
    pub fn std_devs(&self) -> &[f64] {
        self.std_devs.as_slice()
    }

    /// Projects another change table onto the fitted factors, standardising
    /// it with the fitted means and deviations.
    ///
    /// # Errors
    ///
    /// - `AnalyticsError::MissingMaturity` if a fitted maturity is absent
    /// - `AnalyticsError::DegenerateInput` on NaN or infinite values
    pub fn transform(&self, changes: &ChangeTable) -> AnalyticsResult<FactorSeries> {
        let tenors = self.loadings.tenors();
        let columns = require_columns(changes, tenors)?;
        ensure_finite(changes)?;

        let n = changes.nrows();
        let standardized = DMatrix::from_fn(n, columns.len(), |i, j| {
            (changes.row(i)[columns[j]] - self.means[j]) / self.std_devs[j]
        });
        let scores = standardized * self.loadings.as_matrix().transpose();

        Ok(FactorSeries::new(changes.dates().to_vec(), scores))
    }

    /// Splits the fit into `(loadings, series, explained variance)`.
    #[must_use]
    pub fn into_parts(self) -> (FactorLoadings, FactorSeries, ExplainedVariance) {
        (self.loadings, self.series, self.explained_variance)
    }
}
