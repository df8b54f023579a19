//! Rolling z-score of the butterfly composite yield and trade flags.

use curvefly_core::Date;
use curvefly_math::statistics::rolling_moments;
use log::debug;
use serde::{Deserialize, Serialize};

use super::engine::ButterflySeries;
use crate::error::{AnalyticsError, AnalyticsResult};

/// One trading year of daily observations.
pub const DEFAULT_WINDOW: usize = 252;

/// One hundred trading years; anything longer is treated as a mistake.
pub const MAX_WINDOW: usize = 25_200;

/// Default z-score magnitude that flags a trade.
pub const DEFAULT_ENTRY_THRESHOLD: f64 = 2.0;

/// Checks a rolling window size.
///
/// # Errors
///
/// Returns `AnalyticsError::InvalidWindow` if `window < 2` or
/// `window > MAX_WINDOW`.
pub fn validate_window(window: usize) -> AnalyticsResult<()> {
    if window < 2 {
        return Err(AnalyticsError::invalid_window(
            window,
            "a sample standard deviation needs at least 2 observations",
        ));
    }
    if window > MAX_WINDOW {
        return Err(AnalyticsError::invalid_window(
            window,
            format!("exceeds the maximum of {MAX_WINDOW}"),
        ));
    }
    Ok(())
}

/// One fully populated rolling-window observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalPoint {
    /// Observation date.
    pub date: Date,
    /// Composite yield on `date`.
    pub composite_yield: f64,
    /// Mean of the trailing window ending on `date`.
    pub rolling_mean: f64,
    /// Sample standard deviation of the same window.
    pub rolling_std_dev: f64,
    /// `(composite_yield - rolling_mean) / rolling_std_dev`.
    pub z_score: f64,
}

/// Standardised butterfly signal.
///
/// Only dates with a full window of prior observations and a non-zero
/// window deviation appear.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalSeries {
    window: usize,
    points: Vec<SignalPoint>,
}

impl SignalSeries {
    /// Window size the series was computed with.
    #[must_use]
    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of signal rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if no date had a full window.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All signal rows, oldest first.
    #[must_use]
    pub fn points(&self) -> &[SignalPoint] {
        &self.points
    }

    /// The most recent row.
    #[must_use]
    pub fn latest(&self) -> Option<&SignalPoint> {
        self.points.last()
    }

    /// The z-score column.
    #[must_use]
    pub fn z_scores(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.z_score).collect()
    }

    /// Rows whose z-score crosses the entry threshold, with their flag.
    #[must_use]
    pub fn signals(&self, thresholds: &SignalThresholds) -> Vec<(SignalPoint, TradeSignal)> {
        self.points
            .iter()
            .filter_map(|p| match thresholds.classify(p.z_score) {
                TradeSignal::Flat => None,
                signal => Some((*p, signal)),
            })
            .collect()
    }
}

/// Rolling z-score of a butterfly series over a trailing `window`.
///
/// The row at index `t` uses observations `t - window + 1 ..= t` and is
/// emitted only when `t >= window`, so an `N`-row input yields at most
/// `N - window` rows and `window >= N` yields an empty series.
///
/// # Errors
///
/// Returns `AnalyticsError::InvalidWindow` for an unusable window size.
#[allow(clippy::float_cmp)]
pub fn compute_signal(series: &ButterflySeries, window: usize) -> AnalyticsResult<SignalSeries> {
    validate_window(window)?;

    let composite = series.composite_yields();
    let moments = rolling_moments(&composite, window)?;

    let points: Vec<SignalPoint> = series
        .points()
        .iter()
        .zip(moments)
        .skip(window)
        .filter_map(|(point, moments)| {
            let m = moments?;
            if m.std_dev == 0.0 || !m.std_dev.is_finite() {
                return None;
            }
            Some(SignalPoint {
                date: point.date,
                composite_yield: point.composite_yield,
                rolling_mean: m.mean,
                rolling_std_dev: m.std_dev,
                z_score: (point.composite_yield - m.mean) / m.std_dev,
            })
        })
        .collect();

    debug!(
        "rolling signal over {} rows with window {window}: {} rows emitted",
        series.len(),
        points.len()
    );

    Ok(SignalSeries { window, points })
}

/// Direction suggested by an extreme z-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeSignal {
    /// Fly is rich: sell the belly against the wings.
    ShortBelly,
    /// Fly is cheap: buy the belly against the wings.
    LongBelly,
    /// No signal.
    Flat,
}

impl std::fmt::Display for TradeSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TradeSignal::ShortBelly => "short belly",
            TradeSignal::LongBelly => "long belly",
            TradeSignal::Flat => "flat",
        };
        write!(f, "{label}")
    }
}

/// Symmetric z-score bands that flag trades.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignalThresholds {
    /// Absolute z-score at or beyond which a trade is flagged.
    pub entry: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            entry: DEFAULT_ENTRY_THRESHOLD,
        }
    }
}

impl SignalThresholds {
    /// Creates thresholds with the given entry level.
    #[must_use]
    pub fn new(entry: f64) -> Self {
        Self { entry }
    }

    /// Checks the entry level is finite and positive.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.entry.is_finite() && self.entry > 0.0 {
            Ok(())
        } else {
            Err(AnalyticsError::InvalidConfig(format!(
                "entry threshold must be finite and positive, got {}",
                self.entry
            )))
        }
    }

    /// Flag for one z-score.
    #[must_use]
    pub fn classify(&self, z_score: f64) -> TradeSignal {
        if z_score >= self.entry {
            TradeSignal::ShortBelly
        } else if z_score <= -self.entry {
            TradeSignal::LongBelly
        } else {
            TradeSignal::Flat
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::butterfly::{ButterflyConfig, ButterflyEngine};
    use approx::assert_relative_eq;
    use curvefly_core::{Tenor, YieldTable};

    fn curve(bellies: &[f64]) -> ButterflySeries {
        let start = Date::from_ymd(2020, 1, 2).unwrap();
        let dates = (0..bellies.len())
            .map(|i| start.add_business_days(i as i32))
            .collect();
        // Zero wings make the composite equal the belly yield
        let rows = bellies.iter().map(|b| vec![0.0, *b, 0.0]).collect();
        let table = YieldTable::new(
            dates,
            vec![Tenor::Years(2), Tenor::Years(5), Tenor::Years(10)],
            rows,
        )
        .unwrap();
        ButterflyEngine::new(ButterflyConfig::default())
            .unwrap()
            .compute_butterfly(&table)
            .unwrap()
    }

    #[test]
    fn test_row_count_is_n_minus_window() {
        let bellies: Vec<f64> = (0..300).map(|i| 3.0 + (f64::from(i) * 0.37).sin()).collect();
        let signal = compute_signal(&curve(&bellies), 252).unwrap();
        assert_eq!(signal.len(), 48);
        assert_eq!(signal.window(), 252);
    }

    #[test]
    fn test_first_row_uses_window_ending_on_its_date() {
        let series = curve(&[1.0, 2.0, 4.0, 8.0, 16.0]);
        let signal = compute_signal(&series, 3).unwrap();
        assert_eq!(signal.len(), 2);

        let first = signal.points()[0];
        assert_eq!(first.date, series.points()[3].date);
        // Window 2, 4, 8
        assert_relative_eq!(first.rolling_mean, 14.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(first.composite_yield, 8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_z_score_exactly_zero_at_mean() {
        let signal = compute_signal(&curve(&[5.0, 1.0, 3.0, 2.0]), 3).unwrap();
        assert_eq!(signal.len(), 1);
        assert_eq!(signal.points()[0].z_score, 0.0);
    }

    #[test]
    fn test_window_at_least_rows_is_empty() {
        let series = curve(&[1.0, 2.0, 3.0]);
        assert!(compute_signal(&series, 3).unwrap().is_empty());
        assert!(compute_signal(&series, 10).unwrap().is_empty());
    }

    #[test]
    fn test_zero_std_rows_are_excluded() {
        let signal = compute_signal(&curve(&[2.0, 2.0, 2.0, 2.0, 2.0, 3.0]), 3).unwrap();
        // Index 3 and 4 sit in flat windows; index 5 does not
        assert_eq!(signal.len(), 1);
        assert!(signal.latest().unwrap().z_score > 0.0);
    }

    #[test]
    fn test_invalid_windows() {
        let series = curve(&[1.0, 2.0, 3.0]);
        for window in [0, 1, MAX_WINDOW + 1] {
            assert!(matches!(
                compute_signal(&series, window),
                Err(AnalyticsError::InvalidWindow { .. })
            ));
        }
        assert!(validate_window(MAX_WINDOW).is_ok());
    }

    #[test]
    fn test_classify() {
        let t = SignalThresholds::default();
        assert_eq!(t.classify(2.0), TradeSignal::ShortBelly);
        assert_eq!(t.classify(-2.5), TradeSignal::LongBelly);
        assert_eq!(t.classify(1.99), TradeSignal::Flat);
        assert_eq!(t.classify(-1.0), TradeSignal::Flat);
    }

    #[test]
    fn test_thresholds_validate() {
        assert!(SignalThresholds::default().validate().is_ok());
        assert!(SignalThresholds::new(0.0).validate().is_err());
        assert!(SignalThresholds::new(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_signals_flags_extremes() {
        let mut bellies: Vec<f64> = (0..11).map(|i| if i % 2 == 0 { 1.0 } else { 1.1 }).collect();
        bellies.push(3.0);
        let signal = compute_signal(&curve(&bellies), 10).unwrap();
        assert_eq!(signal.len(), 2);
        let flagged = signal.signals(&SignalThresholds::default());

        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].1, TradeSignal::ShortBelly);
        assert_eq!(flagged[0].0.date, signal.latest().unwrap().date);
    }

    #[test]
    fn test_trade_signal_serde() {
        let json = serde_json::to_string(&TradeSignal::ShortBelly).unwrap();
        assert_eq!(json, "\"short_belly\"");
        assert_eq!(TradeSignal::LongBelly.to_string(), "long belly");
    }
}
