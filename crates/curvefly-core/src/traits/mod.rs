//! Collaborator traits.
//!
//! - [`YieldSource`]: upstream provider of cleaned yield tables

use crate::error::CoreResult;
use crate::types::{Date, Tenor, YieldTable};

/// A request for yield levels over a date range.
#[derive(Debug, Clone, PartialEq)]
pub struct YieldRequest {
    /// First date to include (inclusive). `None` means from the start of the data.
    pub start: Option<Date>,
    /// Last date to include (inclusive). `None` means to the end of the data.
    pub end: Option<Date>,
    /// Maturities to return, in column order.
    pub tenors: Vec<Tenor>,
}

impl YieldRequest {
    /// Creates a request for the given tenors over the full history.
    pub fn new(tenors: impl Into<Vec<Tenor>>) -> Self {
        Self {
            start: None,
            end: None,
            tenors: tenors.into(),
        }
    }

    /// Restricts the request to `[start, end]`.
    pub fn with_range(mut self, start: Option<Date>, end: Option<Date>) -> Self {
        self.start = start;
        self.end = end;
        self
    }
}

/// Source of yield levels.
///
/// Implementations own gap handling: the returned table must be dense
/// (forward-filled, with rows that are still incomplete dropped). If the
/// underlying data cannot be reached, `fetch` returns
/// `CoreError::DataUnavailable`.
pub trait YieldSource: Send + Sync {
    /// Short name used in error messages and logs.
    fn name(&self) -> &str;

    /// Loads yield levels for the request.
    fn fetch(&self, request: &YieldRequest) -> CoreResult<YieldTable>;
}
