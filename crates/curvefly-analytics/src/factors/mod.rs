//! Yield-curve factor decomposition.
//!
//! Extracts the dominant co-movement patterns of daily yield changes
//! (level, slope, curvature) by principal component analysis on the
//! standardised change matrix.

mod decomposition;
mod model;

pub use decomposition::{
    component_label, ExplainedVariance, FactorDecomposition, FactorLoadings, FactorSeries,
};
pub use model::{FactorModel, FactorModelConfig, EIGENVALUE_TOLERANCE, SIGN_TOLERANCE};
