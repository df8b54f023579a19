//! Curve maturity points.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// A constant-maturity point on the curve (e.g., 6M, 2Y, 10Y).
///
/// Tenors order by their length, so `Tenor::Months(24) == Tenor::Years(2)`
/// compare equal in ordering but are distinct values; tables reject both
/// forms appearing together.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Tenor {
    /// Months
    Months(u32),
    /// Years
    Years(u32),
}

impl Tenor {
    /// Parse tenor from string (e.g., "3M", "2Y", "10y").
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTenor` for empty, zero-length or unknown
    /// unit strings.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let upper = s.trim().to_uppercase();
        if upper.len() < 2 {
            return Err(CoreError::invalid_tenor(s, "expected <number><M|Y>"));
        }

        let (num_str, unit) = upper.split_at(upper.len() - 1);
        let num: u32 = num_str
            .parse()
            .map_err(|_| CoreError::invalid_tenor(s, format!("invalid number: {num_str}")))?;
        if num == 0 {
            return Err(CoreError::invalid_tenor(s, "tenor must be positive"));
        }

        match unit {
            "M" => Ok(Tenor::Months(num)),
            "Y" => Ok(Tenor::Years(num)),
            _ => Err(CoreError::invalid_tenor(s, format!("unknown unit: {unit}"))),
        }
    }

    /// Total length in months.
    #[must_use]
    pub fn months(&self) -> u32 {
        match self {
            Tenor::Months(m) => *m,
            Tenor::Years(y) => y * 12,
        }
    }

    /// Length in years, as used by the par-duration approximation.
    #[must_use]
    pub fn years(&self) -> f64 {
        f64::from(self.months()) / 12.0
    }
}

impl PartialOrd for Tenor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tenor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.months()
            .cmp(&other.months())
            .then_with(|| matches!(self, Tenor::Years(_)).cmp(&matches!(other, Tenor::Years(_))))
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tenor::Months(m) => write!(f, "{m}M"),
            Tenor::Years(y) => write!(f, "{y}Y"),
        }
    }
}

impl FromStr for Tenor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Tenor {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Tenor> for String {
    fn from(tenor: Tenor) -> Self {
        tenor.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse() {
        assert_eq!(Tenor::parse("2Y").unwrap(), Tenor::Years(2));
        assert_eq!(Tenor::parse(" 6m ").unwrap(), Tenor::Months(6));
        assert!(Tenor::parse("").is_err());
        assert!(Tenor::parse("Y").is_err());
        assert!(Tenor::parse("0Y").is_err());
        assert!(Tenor::parse("5W").is_err());
    }

    #[test]
    fn test_years() {
        assert_relative_eq!(Tenor::Years(10).years(), 10.0);
        assert_relative_eq!(Tenor::Months(6).years(), 0.5);
    }

    #[test]
    fn test_ordering() {
        let mut tenors = vec![Tenor::Years(30), Tenor::Months(3), Tenor::Years(2)];
        tenors.sort();
        assert_eq!(tenors, vec![Tenor::Months(3), Tenor::Years(2), Tenor::Years(30)]);
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Tenor::Years(5)).unwrap();
        assert_eq!(json, "\"5Y\"");
        let back: Tenor = serde_json::from_str("\"18M\"").unwrap();
        assert_eq!(back, Tenor::Months(18));
        assert!(serde_json::from_str::<Tenor>("\"abc\"").is_err());
    }
}
