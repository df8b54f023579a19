//! Shared input checks for the engines.

use curvefly_core::{Tenor, TenorFrame};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Column positions of `tenors` in `frame`, or the first missing maturity.
pub(crate) fn require_columns(frame: &TenorFrame, tenors: &[Tenor]) -> AnalyticsResult<Vec<usize>> {
    tenors
        .iter()
        .map(|&tenor| {
            frame
                .column_index(tenor)
                .ok_or(AnalyticsError::MissingMaturity { tenor })
        })
        .collect()
}

/// Fails on the first NaN or infinite cell anywhere in `frame`, including
/// columns the caller does not read.
pub(crate) fn ensure_finite(frame: &TenorFrame) -> AnalyticsResult<()> {
    match frame.first_non_finite() {
        Some((date, tenor, value)) => Err(AnalyticsError::degenerate(format!(
            "non-finite value {value} at {date} for {tenor}"
        ))),
        None => Ok(()),
    }
}
