//! # Curvefly Analytics
//!
//! The two analytical engines of Curvefly:
//!
//! - **Factors**: principal components of standardised daily yield changes
//!   ([`FactorModel`]), yielding per-maturity loadings, factor score series
//!   and explained variance
//! - **Butterfly**: a duration-neutral short/belly/long composite yield
//!   ([`ButterflyEngine`]) and its rolling z-score trade signal
//!
//! Both engines are synchronous and deterministic. Configuration is passed
//! in explicitly at construction and every precondition failure surfaces as
//! an [`AnalyticsError`].
//!
//! ## Usage
//!
//! ```rust
//! use curvefly_analytics::prelude::*;
//! use curvefly_core::{Date, Tenor, YieldTable};
//!
//! let tenors = vec![Tenor::Years(2), Tenor::Years(5), Tenor::Years(10), Tenor::Years(30)];
//! let start = Date::from_ymd(2024, 1, 2).unwrap();
//! let dates: Vec<Date> = (0..40).map(|i| start.add_business_days(i)).collect();
//! let rows = (0..40)
//!     .map(|i| {
//!         let t = f64::from(i);
//!         vec![
//!             4.0 + 0.05 * (t * 0.9).sin(),
//!             3.9 + 0.04 * (t * 0.5).cos(),
//!             4.0 + 0.03 * (t * 0.3).sin(),
//!             4.2 + 0.02 * (t * 1.3).cos(),
//!         ]
//!     })
//!     .collect();
//! let yields = YieldTable::new(dates, tenors, rows).unwrap();
//!
//! let model = FactorModel::new(FactorModelConfig::default()).unwrap();
//! let fit = model.decompose(&yields.changes()).unwrap();
//! assert_eq!(fit.loadings().n_components(), 3);
//!
//! let engine = ButterflyEngine::new(ButterflyConfig::default().with_window(20)).unwrap();
//! let (fly, signal) = engine.run(&yields).unwrap();
//! assert_eq!(fly.len(), 40);
//! assert_eq!(signal.len(), 20);
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
#![allow(clippy::many_single_char_names)]

pub mod butterfly;
pub mod error;
pub mod factors;

mod validation;

pub use butterfly::{
    compute_signal, par_duration, ButterflyConfig, ButterflyEngine, ButterflySeries,
    SignalSeries, SignalThresholds, TradeSignal,
};
pub use error::{AnalyticsError, AnalyticsResult};
pub use factors::{FactorDecomposition, FactorModel, FactorModelConfig};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{AnalyticsError, AnalyticsResult};

    // Factors
    pub use crate::factors::{
        component_label, ExplainedVariance, FactorDecomposition, FactorLoadings, FactorModel,
        FactorModelConfig, FactorSeries,
    };

    // Butterfly
    pub use crate::butterfly::{
        compute_signal, par_duration, ButterflyConfig, ButterflyEngine, ButterflyPoint,
        ButterflySeries, ButterflyWeights, SignalPoint, SignalSeries, SignalThresholds,
        TradeSignal,
    };
}
