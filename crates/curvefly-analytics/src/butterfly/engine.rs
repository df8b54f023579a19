//! Duration-neutral butterfly construction.

use curvefly_core::{Date, Tenor, YieldTable};
use log::debug;
use serde::{Deserialize, Serialize};

use super::signal::{compute_signal, validate_window, SignalSeries, DEFAULT_WINDOW};
use super::weights::ButterflyWeights;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::validation::{ensure_finite, require_columns};

/// Legs and rolling window of a butterfly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ButterflyConfig {
    /// Short wing maturity.
    pub short: Tenor,
    /// Belly maturity.
    pub belly: Tenor,
    /// Long wing maturity.
    pub long: Tenor,
    /// Trailing window of the z-score, in observations.
    pub window: usize,
}

impl Default for ButterflyConfig {
    fn default() -> Self {
        Self {
            short: Tenor::Years(2),
            belly: Tenor::Years(5),
            long: Tenor::Years(10),
            window: DEFAULT_WINDOW,
        }
    }
}

impl ButterflyConfig {
    /// Creates a configuration with the default window.
    #[must_use]
    pub fn new(short: Tenor, belly: Tenor, long: Tenor) -> Self {
        Self {
            short,
            belly,
            long,
            window: DEFAULT_WINDOW,
        }
    }

    /// Sets the rolling window.
    #[must_use]
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Legs in short, belly, long order.
    #[must_use]
    pub fn legs(&self) -> [Tenor; 3] {
        [self.short, self.belly, self.long]
    }

    /// Checks the legs are strictly increasing in maturity and the window
    /// is usable.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if !(self.short.months() < self.belly.months() && self.belly.months() < self.long.months())
        {
            return Err(AnalyticsError::InvalidConfig(format!(
                "butterfly legs must be increasing in maturity, got {}/{}/{}",
                self.short, self.belly, self.long
            )));
        }
        validate_window(self.window)
    }
}

/// Composite yield and the weights that produced it on one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ButterflyPoint {
    /// Observation date.
    pub date: Date,
    /// `w_short * y_short + w_belly * y_belly + w_long * y_long`.
    pub composite_yield: f64,
    /// Weights recomputed from that date's yields.
    pub weights: ButterflyWeights,
}

/// Composite butterfly yield, one row per input date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButterflySeries {
    legs: [Tenor; 3],
    points: Vec<ButterflyPoint>,
}

impl ButterflySeries {
    /// Short, belly and long maturities.
    #[must_use]
    pub fn legs(&self) -> [Tenor; 3] {
        self.legs
    }

    /// Number of dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true for an empty series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All rows, oldest first.
    #[must_use]
    pub fn points(&self) -> &[ButterflyPoint] {
        &self.points
    }

    /// The composite yield column.
    #[must_use]
    pub fn composite_yields(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.composite_yield).collect()
    }

    /// The most recent row.
    #[must_use]
    pub fn latest(&self) -> Option<&ButterflyPoint> {
        self.points.last()
    }
}

/// Builds the duration-neutral butterfly and its rolling z-score signal.
///
/// Weights are recomputed on every date from that date's yields, since leg
/// durations drift with the level of rates.
///
/// # Example
///
/// ```rust
/// use curvefly_analytics::butterfly::{ButterflyConfig, ButterflyEngine};
/// use curvefly_core::{Date, Tenor, YieldTable};
///
/// let legs = vec![Tenor::Years(2), Tenor::Years(5), Tenor::Years(10)];
/// let dates = vec![Date::from_ymd(2024, 1, 2).unwrap()];
/// let yields = YieldTable::new(dates, legs, vec![vec![4.33, 3.93, 3.95]]).unwrap();
///
/// let engine = ButterflyEngine::new(ButterflyConfig::default()).unwrap();
/// let fly = engine.compute_butterfly(&yields).unwrap();
/// assert_eq!(fly.points()[0].weights.belly, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct ButterflyEngine {
    config: ButterflyConfig,
    maturities: [f64; 3],
}

impl ButterflyEngine {
    /// Creates an engine after validating the configuration.
    ///
    /// # Errors
    ///
    /// `AnalyticsError::InvalidConfig` for misordered legs,
    /// `AnalyticsError::InvalidWindow` for an unusable window.
    pub fn new(config: ButterflyConfig) -> AnalyticsResult<Self> {
        config.validate()?;
        let maturities = config.legs().map(|tenor| tenor.years());
        Ok(Self { config, maturities })
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &ButterflyConfig {
        &self.config
    }

    /// Composite yield for every date of `yields`.
    ///
    /// Every cell of `yields` is checked for NaN and infinite values, and the
    /// leg columns for sub -100% yields, before any weight is computed.
    ///
    /// # Errors
    ///
    /// - `AnalyticsError::MissingMaturity` if a leg column is absent
    /// - `AnalyticsError::DegenerateInput` for non-finite or out-of-domain yields
    pub fn compute_butterfly(&self, yields: &YieldTable) -> AnalyticsResult<ButterflySeries> {
        let legs = self.config.legs();
        let columns = require_columns(yields, &legs)?;
        ensure_finite(yields)?;

        for (date, row) in yields.rows() {
            if let Some(&col) = columns.iter().find(|&&col| row[col] <= -100.0) {
                return Err(AnalyticsError::degenerate(format!(
                    "yield {}% at {date} for {} is at or below -100%",
                    row[col],
                    yields.tenors()[col]
                )));
            }
        }

        let points = yields
            .rows()
            .map(|(date, row)| {
                let leg_yields = [row[columns[0]], row[columns[1]], row[columns[2]]];
                let weights = ButterflyWeights::from_yields(leg_yields, self.maturities)?;
                Ok(ButterflyPoint {
                    date,
                    composite_yield: weights.composite(leg_yields),
                    weights,
                })
            })
            .collect::<AnalyticsResult<Vec<_>>>()?;

        debug!(
            "{}/{}/{} butterfly computed over {} dates",
            legs[0],
            legs[1],
            legs[2],
            points.len()
        );

        Ok(ButterflySeries { legs, points })
    }

    /// Rolling z-score of `series` over the configured window.
    ///
    /// # Errors
    ///
    /// Propagates [`compute_signal`] errors.
    pub fn compute_signal(&self, series: &ButterflySeries) -> AnalyticsResult<SignalSeries> {
        compute_signal(series, self.config.window)
    }

    /// [`compute_butterfly`](Self::compute_butterfly) followed by
    /// [`compute_signal`](Self::compute_signal).
    ///
    /// # Errors
    ///
    /// Propagates errors from either step.
    pub fn run(&self, yields: &YieldTable) -> AnalyticsResult<(ButterflySeries, SignalSeries)> {
        let series = self.compute_butterfly(yields)?;
        let signal = self.compute_signal(&series)?;
        Ok((series, signal))
    }
}
