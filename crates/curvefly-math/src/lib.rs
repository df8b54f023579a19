//! # Curvefly Math
//!
//! Numerical building blocks for the Curvefly analytics engines.
//!
//! This crate provides:
//!
//! - **Linear Algebra**: column standardisation, covariance and ordered
//!   symmetric eigen decomposition
//! - **Statistics**: sample/population moments and trailing-window moments
//!
//! Everything here is a pure function of its inputs; failures are reported
//! through [`MathError`] and never papered over with defaults.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]

pub mod error;
pub mod linear_algebra;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::linear_algebra::{
        covariance_matrix, standardize_columns, symmetric_eigen, EigenDecomposition,
        Standardized,
    };
    pub use crate::statistics::{
        mean, population_std_dev, rolling_moments, sample_std_dev, RollingMoments,
    };
}

pub use error::{MathError, MathResult};
