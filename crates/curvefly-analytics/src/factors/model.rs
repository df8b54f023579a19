//! Principal component model of standardised yield changes.
//!
//! ## Algorithm
//!
//! ```text
//! Z        = (X - mean(X)) / sd(X)          column-wise, population sd
//! C        = Z'Z / (n - 1)                  correlation-like covariance
//! C v_k    = λ_k v_k                        λ_1 >= λ_2 >= ... >= λ_M
//! scores   = Z [v_1 .. v_K]
//! ratio_k  = λ_k / Σ λ
//! ```
//!
//! Each `v_k` is oriented so its weight on the longest maturity is
//! non-negative. When that weight is numerically zero the largest-magnitude
//! weight is made positive instead.

use curvefly_core::{ChangeTable, Tenor};
use curvefly_math::linear_algebra::{covariance_matrix, standardize_columns, symmetric_eigen};
use curvefly_math::MathError;
use log::debug;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use super::decomposition::{
    component_label, ExplainedVariance, FactorDecomposition, FactorLoadings, FactorSeries,
};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::validation::{ensure_finite, require_columns};

/// Loadings smaller than this on the anchor maturity cannot decide the sign.
pub const SIGN_TOLERANCE: f64 = 1e-12;

/// Retained eigenvalues at or below this mean the covariance is singular.
pub const EIGENVALUE_TOLERANCE: f64 = 1e-12;

/// Configuration of a [`FactorModel`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FactorModelConfig {
    /// Maturities to decompose, in output column order.
    pub maturities: Vec<Tenor>,
    /// Number of leading components to keep (K).
    pub n_components: usize,
}

impl Default for FactorModelConfig {
    fn default() -> Self {
        Self {
            maturities: vec![
                Tenor::Years(2),
                Tenor::Years(5),
                Tenor::Years(10),
                Tenor::Years(30),
            ],
            n_components: 3,
        }
    }
}

impl FactorModelConfig {
    /// Creates a configuration.
    pub fn new(maturities: impl Into<Vec<Tenor>>, n_components: usize) -> Self {
        Self {
            maturities: maturities.into(),
            n_components,
        }
    }

    /// Checks `1 <= n_components <= M` and a non-empty, duplicate-free
    /// maturity set.
    pub fn validate(&self) -> AnalyticsResult<()> {
        let m = self.maturities.len();
        if m == 0 {
            return Err(AnalyticsError::InvalidConfig(
                "factor model needs at least one maturity".to_string(),
            ));
        }

        let mut sorted = self.maturities.clone();
        sorted.sort();
        if let Some(pair) = sorted.windows(2).find(|p| p[0].months() == p[1].months()) {
            return Err(AnalyticsError::InvalidConfig(format!(
                "duplicate maturity {}",
                pair[1]
            )));
        }

        if self.n_components == 0 || self.n_components > m {
            return Err(AnalyticsError::InvalidConfig(format!(
                "n_components must be between 1 and {m}, got {}",
                self.n_components
            )));
        }
        Ok(())
    }
}

/// Fits level/slope/curvature style factors to daily yield changes.
///
/// [`FactorModel::decompose`] is a pure function of the input and the fixed
/// configuration. [`FactorModel::fit`] additionally keeps the latest result
/// for the accessor methods; that cache is informational and a failed fit
/// leaves it unchanged.
///
/// # Example
///
/// ```rust
/// use curvefly_analytics::factors::{FactorModel, FactorModelConfig};
/// use curvefly_core::{ChangeTable, Date, Tenor};
///
/// let tenors = vec![Tenor::Years(2), Tenor::Years(10)];
/// let start = Date::from_ymd(2024, 1, 2).unwrap();
/// let dates = (0..4).map(|i| start.add_business_days(i)).collect();
/// let rows = vec![
///     vec![0.02, 0.01],
///     vec![-0.03, -0.01],
///     vec![0.01, 0.02],
///     vec![0.00, -0.02],
/// ];
/// let changes = ChangeTable::new(dates, tenors.clone(), rows).unwrap();
///
/// let mut model = FactorModel::new(FactorModelConfig::new(tenors, 1)).unwrap();
/// let fit = model.fit(&changes).unwrap();
/// assert_eq!(fit.loadings().n_components(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FactorModel {
    config: FactorModelConfig,
    anchor: usize,
    last_fit: Option<FactorDecomposition>,
}

impl FactorModel {
    /// Creates a model after validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidConfig` if the configuration is invalid.
    pub fn new(config: FactorModelConfig) -> AnalyticsResult<Self> {
        config.validate()?;
        let anchor = config
            .maturities
            .iter()
            .enumerate()
            .max_by_key(|(_, tenor)| **tenor)
            .map_or(0, |(i, _)| i);

        Ok(Self {
            config,
            anchor,
            last_fit: None,
        })
    }

    /// The model configuration.
    #[must_use]
    pub fn config(&self) -> &FactorModelConfig {
        &self.config
    }

    /// Number of retained components (K).
    #[must_use]
    pub fn n_components(&self) -> usize {
        self.config.n_components
    }

    /// Decomposes a change table without touching the cached fit.
    ///
    /// # Errors
    ///
    /// - `AnalyticsError::MissingMaturity` if a configured maturity is absent
    /// - `AnalyticsError::DegenerateInput` for NaN/infinite cells, no more
    ///   rows than maturities, a constant column, or a singular covariance
    /// - `AnalyticsError::Math` if the eigen solver fails
    pub fn decompose(&self, changes: &ChangeTable) -> AnalyticsResult<FactorDecomposition> {
        let tenors = &self.config.maturities;
        let columns = require_columns(changes, tenors)?;
        ensure_finite(changes)?;

        let (n, m) = (changes.nrows(), tenors.len());
        if n <= m {
            return Err(AnalyticsError::degenerate(format!(
                "{n} change rows for {m} maturities, need at least {}",
                m + 1
            )));
        }

        let data = DMatrix::from_fn(n, m, |i, j| changes.row(i)[columns[j]]);
        let standardized = standardize_columns(&data).map_err(|err| match err {
            MathError::ZeroVariance { column } => {
                AnalyticsError::degenerate(format!("{} changes have zero variance", tenors[column]))
            }
            other => other.into(),
        })?;
        let covariance = covariance_matrix(&standardized.data)?;
        let eigen = symmetric_eigen(&covariance)?;

        let total: f64 = eigen.eigenvalues.iter().map(|v| v.max(0.0)).sum();
        let k = self.config.n_components;
        let mut loadings = DMatrix::zeros(k, m);
        let mut eigenvalues = Vec::with_capacity(k);
        let mut ratios = Vec::with_capacity(k);

        for c in 0..k {
            let lambda = eigen.eigenvalues[c];
            if lambda <= EIGENVALUE_TOLERANCE {
                return Err(AnalyticsError::degenerate(format!(
                    "singular covariance: {} has eigenvalue {lambda:.3e}",
                    component_label(c)
                )));
            }

            let mut vector: DVector<f64> = eigen.eigenvectors.column(c).into_owned();
            orient(&mut vector, self.anchor);
            loadings.set_row(c, &vector.transpose());
            eigenvalues.push(lambda);
            ratios.push(lambda / total);
        }

        let scores = &standardized.data * loadings.transpose();
        let explained_variance = ExplainedVariance::new(eigenvalues, ratios);

        debug!(
            "factor fit over {n} dates: first {k} components explain {:.4}% of variance",
            explained_variance.total() * 100.0
        );

        Ok(FactorDecomposition {
            loadings: FactorLoadings::new(tenors.clone(), loadings),
            series: FactorSeries::new(changes.dates().to_vec(), scores),
            explained_variance,
            means: standardized.means,
            std_devs: standardized.std_devs,
        })
    }

    /// Decomposes a change table and caches the result.
    ///
    /// # Errors
    ///
    /// Same as [`FactorModel::decompose`]; on error the previous fit is kept.
    pub fn fit(&mut self, changes: &ChangeTable) -> AnalyticsResult<&FactorDecomposition> {
        let fit = self.decompose(changes)?;
        Ok(self.last_fit.insert(fit))
    }

    /// The most recent successful fit.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::NotFitted` before the first successful fit.
    pub fn last_fit(&self) -> AnalyticsResult<&FactorDecomposition> {
        self.last_fit
            .as_ref()
            .ok_or_else(|| AnalyticsError::not_fitted("factor decomposition"))
    }

    /// Loadings of the most recent fit.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::NotFitted` before the first successful fit.
    pub fn loadings(&self) -> AnalyticsResult<&FactorLoadings> {
        self.last_fit
            .as_ref()
            .map(FactorDecomposition::loadings)
            .ok_or_else(|| AnalyticsError::not_fitted("factor loadings"))
    }

    /// Factor scores of the most recent fit.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::NotFitted` before the first successful fit.
    pub fn factor_series(&self) -> AnalyticsResult<&FactorSeries> {
        self.last_fit
            .as_ref()
            .map(FactorDecomposition::series)
            .ok_or_else(|| AnalyticsError::not_fitted("factor series"))
    }

    /// Explained variance of the most recent fit.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::NotFitted` before the first successful fit.
    pub fn explained_variance(&self) -> AnalyticsResult<&ExplainedVariance> {
        self.last_fit
            .as_ref()
            .map(FactorDecomposition::explained_variance)
            .ok_or_else(|| AnalyticsError::not_fitted("explained variance"))
    }

    /// Projects new changes onto the most recently fitted factors.
    ///
    /// # Errors
    ///
    /// `AnalyticsError::NotFitted` before a fit, otherwise as
    /// [`FactorDecomposition::transform`].
    pub fn transform(&self, changes: &ChangeTable) -> AnalyticsResult<FactorSeries> {
        self.last_fit()?.transform(changes)
    }
}

/// Flips `vector` so the anchor weight (or, if that is ~0, the largest
/// weight) is non-negative.
fn orient(vector: &mut DVector<f64>, anchor: usize) {
    let pivot = if vector[anchor].abs() >= SIGN_TOLERANCE {
        anchor
    } else {
        vector.iamax()
    };
    if vector[pivot] < 0.0 {
        vector.neg_mut();
    }
}
