//! Duration-neutral butterfly weights.

use serde::{Deserialize, Serialize};

use super::duration::par_duration;
use crate::error::AnalyticsResult;

/// Weight of the belly leg; the wings are sized against it.
pub const BELLY_WEIGHT: f64 = 1.0;

/// Share of the belly duration each wing offsets.
pub const WING_SCALE: f64 = 0.5;

/// Leg weights of a short-belly-long fly on one date.
///
/// ```text
/// w_belly = 1
/// w_short = -0.5 * D_belly / D_short
/// w_long  = -0.5 * D_belly / D_long
/// ```
///
/// Each wing carries half of the belly's duration with the opposite sign,
/// so a parallel shift leaves the position's price sensitivity unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ButterflyWeights {
    /// Short wing weight (negative).
    pub short: f64,
    /// Belly weight, always [`BELLY_WEIGHT`].
    pub belly: f64,
    /// Long wing weight (negative).
    pub long: f64,
}

impl ButterflyWeights {
    /// Builds weights from leg durations.
    #[must_use]
    pub fn from_durations(short: f64, belly: f64, long: f64) -> Self {
        Self {
            short: -WING_SCALE * belly / short,
            belly: BELLY_WEIGHT,
            long: -WING_SCALE * belly / long,
        }
    }

    /// Builds weights from leg yields (percent) and maturities (years).
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::DegenerateInput` if any leg is outside the
    /// [`par_duration`] domain.
    pub fn from_yields(yields: [f64; 3], maturities: [f64; 3]) -> AnalyticsResult<Self> {
        let short = par_duration(yields[0], maturities[0])?;
        let belly = par_duration(yields[1], maturities[1])?;
        let long = par_duration(yields[2], maturities[2])?;
        Ok(Self::from_durations(short, belly, long))
    }

    /// Weighted sum of the three leg yields.
    #[must_use]
    pub fn composite(&self, yields: [f64; 3]) -> f64 {
        self.short * yields[0] + self.belly * yields[1] + self.long * yields[2]
    }

    /// Sum of the three weights.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.short + self.belly + self.long
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    const MATURITIES: [f64; 3] = [2.0, 5.0, 10.0];

    #[test]
    fn test_zero_yields_use_maturity_ratios() {
        let w = ButterflyWeights::from_yields([0.0, 0.0, 0.0], MATURITIES).unwrap();
        assert_relative_eq!(w.short, -1.25);
        assert_relative_eq!(w.belly, 1.0);
        assert_relative_eq!(w.long, -0.25);
    }

    #[test]
    fn test_wing_durations_offset_belly() {
        let w = ButterflyWeights::from_yields([4.1, 4.3, 4.5], MATURITIES).unwrap();
        let d_short = par_duration(4.1, 2.0).unwrap();
        let d_belly = par_duration(4.3, 5.0).unwrap();
        let d_long = par_duration(4.5, 10.0).unwrap();

        assert_relative_eq!(w.short * d_short, -0.5 * d_belly, epsilon = 1e-12);
        assert_relative_eq!(w.long * d_long, -0.5 * d_belly, epsilon = 1e-12);
        // Duration-weighted sum is zero
        assert_relative_eq!(
            w.short * d_short + w.belly * d_belly + w.long * d_long,
            0.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_constant_yields_composite() {
        let c = 3.75;
        let w = ButterflyWeights::from_yields([c, c, c], MATURITIES).unwrap();
        assert_relative_eq!(w.composite([c, c, c]), w.sum() * c, epsilon = 1e-12);
    }

    #[test]
    fn test_out_of_domain_leg() {
        assert!(ButterflyWeights::from_yields([4.0, -100.0, 4.0], MATURITIES).is_err());
    }

    proptest! {
        #[test]
        fn prop_weight_signs(
            y_short in 0.01f64..15.0,
            y_belly in 0.01f64..15.0,
            y_long in 0.01f64..15.0,
        ) {
            let w = ButterflyWeights::from_yields([y_short, y_belly, y_long], MATURITIES).unwrap();
            prop_assert_eq!(w.belly, 1.0);
            prop_assert!(w.short < 0.0);
            prop_assert!(w.long < 0.0);
        }
    }
}
