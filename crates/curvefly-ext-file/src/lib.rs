//! # Curvefly Ext File
//!
//! File-based yield data for the Curvefly pipeline.
//!
//! This crate provides a [`YieldSource`](curvefly_core::traits::YieldSource)
//! reading wide CSV exports such as the FRED `DGS*` constant-maturity
//! Treasury series: one date column plus one column per series.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod yields;

pub use yields::{CsvYieldSource, DATE_COLUMNS};
