//! Annuity-style duration proxy for a par bond.
//!
//! ## Formula
//!
//! ```text
//! D(y, n) = (1 - (1 + r)^-n) / r      r = y / 100
//! D(0, n) = n
//! ```
//!
//! where:
//! - y = par yield in percent
//! - n = maturity in years (annual compounding)

use crate::error::{AnalyticsError, AnalyticsResult};

/// Duration proxy of a par bond with annual compounding.
///
/// # Arguments
///
/// * `yield_pct` - Par yield in percent (e.g. `4.25`)
/// * `maturity_years` - Maturity in years
///
/// # Errors
///
/// Returns `AnalyticsError::DegenerateInput` if the yield is not finite or
/// at or below -100%, or if the maturity is not positive.
#[allow(clippy::float_cmp)]
pub fn par_duration(yield_pct: f64, maturity_years: f64) -> AnalyticsResult<f64> {
    if !yield_pct.is_finite() || yield_pct <= -100.0 {
        return Err(AnalyticsError::degenerate(format!(
            "yield {yield_pct}% is outside the duration domain"
        )));
    }
    if !maturity_years.is_finite() || maturity_years <= 0.0 {
        return Err(AnalyticsError::degenerate(format!(
            "maturity {maturity_years} years must be positive"
        )));
    }

    let r = yield_pct / 100.0;
    if r == 0.0 {
        return Ok(maturity_years);
    }
    Ok((1.0 - (1.0 + r).powf(-maturity_years)) / r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_yield_is_maturity() {
        assert_eq!(par_duration(0.0, 5.0).unwrap(), 5.0);
        assert_eq!(par_duration(0.0, 30.0).unwrap(), 30.0);
    }

    #[test]
    fn test_five_year_at_five_percent() {
        // Annuity factor a(5, 5%) = 4.329477
        assert_relative_eq!(par_duration(5.0, 5.0).unwrap(), 4.329_476_670_6, epsilon = 1e-9);
    }

    #[test]
    fn test_near_zero_yield_is_continuous() {
        let d = par_duration(1e-9, 10.0).unwrap();
        assert_relative_eq!(d, 10.0, epsilon = 1e-6);
    }

    #[test]
    fn test_duration_falls_with_yield() {
        let low = par_duration(1.0, 10.0).unwrap();
        let high = par_duration(6.0, 10.0).unwrap();
        assert!(low > high);
        assert!(high < 10.0);
    }

    #[test]
    fn test_negative_yield_above_floor() {
        let d = par_duration(-0.5, 2.0).unwrap();
        assert!(d > 2.0);
    }

    #[test]
    fn test_domain_errors() {
        assert!(matches!(
            par_duration(-100.0, 5.0),
            Err(AnalyticsError::DegenerateInput { .. })
        ));
        assert!(par_duration(-150.0, 5.0).is_err());
        assert!(par_duration(f64::NAN, 5.0).is_err());
        assert!(par_duration(3.0, 0.0).is_err());
    }
}
