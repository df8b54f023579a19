//! Descriptive statistics.
//!
//! Thin wrappers over `statrs` moments plus a trailing-window variant used
//! for rolling z-scores.

use statrs::statistics::Statistics;

use crate::error::{MathError, MathResult};

/// Arithmetic mean. `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().mean()
}

/// Sample standard deviation (divisor `n - 1`). `NaN` for fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    values.iter().std_dev()
}

/// Population standard deviation (divisor `n`). `NaN` for an empty slice.
pub fn population_std_dev(values: &[f64]) -> f64 {
    values.iter().population_std_dev()
}

/// Mean and sample standard deviation of one trailing window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollingMoments {
    /// Window mean.
    pub mean: f64,
    /// Window sample standard deviation.
    pub std_dev: f64,
}

/// Trailing-window moments over `window` observations ending at each index.
///
/// Entry `i` is `None` until a full window is available (`i + 1 < window`).
///
/// # Errors
///
/// Returns `MathError::InvalidInput` if `window < 2` (the sample standard
/// deviation needs at least two points).
pub fn rolling_moments(values: &[f64], window: usize) -> MathResult<Vec<Option<RollingMoments>>> {
    if window < 2 {
        return Err(MathError::invalid_input(format!(
            "rolling window must be at least 2, got {window}"
        )));
    }

    let warmup = (window - 1).min(values.len());
    let mut out = vec![None; warmup];
    out.extend(values.windows(window).map(|w| {
        Some(RollingMoments {
            mean: mean(w),
            std_dev: sample_std_dev(w),
        })
    }));

    debug_assert_eq!(out.len(), values.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_moments() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&values), 5.0);
        assert_relative_eq!(population_std_dev(&values), 2.0, epsilon = 1e-12);
        assert_relative_eq!(sample_std_dev(&values), (32.0_f64 / 7.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_moments_are_nan() {
        assert!(mean(&[]).is_nan());
        assert!(sample_std_dev(&[1.0]).is_nan());
    }

    #[test]
    fn test_rolling_moments_warmup() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let rolled = rolling_moments(&values, 3).unwrap();

        assert_eq!(rolled.len(), 5);
        assert!(rolled[0].is_none());
        assert!(rolled[1].is_none());

        let last = rolled[4].unwrap();
        assert_relative_eq!(last.mean, 4.0, epsilon = 1e-12);
        assert_relative_eq!(last.std_dev, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rolling_window_longer_than_series() {
        let rolled = rolling_moments(&[1.0, 2.0], 5).unwrap();
        assert_eq!(rolled, vec![None, None]);
    }

    #[test]
    fn test_rolling_rejects_small_window() {
        assert!(rolling_moments(&[1.0, 2.0, 3.0], 1).is_err());
        assert!(rolling_moments(&[1.0, 2.0, 3.0], 0).is_err());
    }

    proptest! {
        #[test]
        fn prop_rolling_matches_direct(values in prop::collection::vec(-10.0f64..10.0, 2..60), window in 2usize..12) {
            let rolled = rolling_moments(&values, window).unwrap();
            prop_assert_eq!(rolled.len(), values.len());
            for (i, entry) in rolled.iter().enumerate() {
                match entry {
                    None => prop_assert!(i + 1 < window),
                    Some(m) => {
                        let slice = &values[i + 1 - window..=i];
                        let direct = slice.iter().sum::<f64>() / window as f64;
                        prop_assert!((m.mean - direct).abs() < 1e-9);
                        prop_assert!(m.std_dev >= 0.0);
                    }
                }
            }
        }
    }
}
