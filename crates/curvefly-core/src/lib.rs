//! # Curvefly Core
//!
//! Core types and abstractions shared by the Curvefly crates.
//!
//! - **Types**: `Date`, `Tenor`, and the dense date-by-tenor tables
//!   (`YieldTable`, `ChangeTable`) that every engine consumes
//! - **Traits**: the `YieldSource` boundary to upstream market data
//!
//! ## Example
//!
//! ```rust
//! use curvefly_core::prelude::*;
//!
//! let dates = vec![
//!     Date::from_ymd(2024, 1, 2).unwrap(),
//!     Date::from_ymd(2024, 1, 3).unwrap(),
//! ];
//! let tenors = vec![Tenor::Years(2), Tenor::Years(10)];
//! let yields = YieldTable::new(dates, tenors, vec![vec![4.30, 3.95], vec![4.33, 3.91]]).unwrap();
//!
//! let changes = yields.changes();
//! assert_eq!(changes.nrows(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::return_self_not_must_use)]

pub mod error;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::traits::{YieldRequest, YieldSource};
    pub use crate::types::{ChangeTable, Date, Tenor, TenorFrame, YieldTable};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{ChangeTable, Date, Tenor, TenorFrame, YieldTable};
