//! Pipeline configuration: data selection plus the settings of both engines.
//!
//! Every field has a default, so an empty file (or no file at all) gives the
//! standard 2s5s10s30s factor model and 2s5s10s fly over the last twenty
//! years of `DGS*` constant-maturity series.
//!
//! ```toml
//! [data]
//! path = "data/treasury.csv"
//! start = "2010-01-04"
//! lookback_years = 20
//!
//! [data.series]
//! DGS2 = "2Y"
//! DGS5 = "5Y"
//! DGS10 = "10Y"
//! DGS30 = "30Y"
//!
//! [factors]
//! maturities = ["2Y", "5Y", "10Y", "30Y"]
//! n_components = 3
//!
//! [butterfly]
//! short = "2Y"
//! belly = "5Y"
//! long = "10Y"
//! window = 252
//!
//! [signal]
//! entry = 2.0
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use curvefly_analytics::{ButterflyConfig, FactorModelConfig, SignalThresholds};
use curvefly_core::{Date, Tenor};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Longest lookback accepted, in years.
pub const MAX_LOOKBACK_YEARS: u32 = 100;

// =============================================================================
// DATA CONFIGURATION
// =============================================================================

/// Where yields come from and which dates to load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    /// CSV file with one date column and one column per series.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// First date to load. Defaults to `end` minus `lookback_years`.
    #[serde(default)]
    pub start: Option<Date>,

    /// Last date to load. Defaults to today.
    #[serde(default)]
    pub end: Option<Date>,

    /// Length of history when no start date is given.
    #[serde(default = "default_lookback_years")]
    pub lookback_years: u32,

    /// Series id to maturity mapping.
    #[serde(default = "default_series")]
    pub series: BTreeMap<String, Tenor>,
}

fn default_lookback_years() -> u32 {
    20
}

fn default_series() -> BTreeMap<String, Tenor> {
    [
        ("DGS2", Tenor::Years(2)),
        ("DGS5", Tenor::Years(5)),
        ("DGS10", Tenor::Years(10)),
        ("DGS30", Tenor::Years(30)),
    ]
    .into_iter()
    .map(|(id, tenor)| (id.to_string(), tenor))
    .collect()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: None,
            start: None,
            end: None,
            lookback_years: default_lookback_years(),
            series: default_series(),
        }
    }
}

impl DataConfig {
    /// Resolves the `[start, end]` range to load, relative to `today`.
    pub fn date_range(&self, today: Date) -> ConfigResult<(Date, Date)> {
        let end = self.end.unwrap_or(today);
        let start = match self.start {
            Some(start) => start,
            None => {
                let years = i32::try_from(self.lookback_years).map_err(|_| {
                    ConfigError::Validation {
                        field: "data.lookback_years".to_string(),
                        message: format!("{} is out of range", self.lookback_years),
                    }
                })?;
                end.add_years(-years).map_err(|err| ConfigError::Validation {
                    field: "data.lookback_years".to_string(),
                    message: err.to_string(),
                })?
            }
        };
        Ok((start, end))
    }

    /// Series id carrying `tenor`, if mapped.
    pub fn series_for(&self, tenor: Tenor) -> Option<&str> {
        self.series
            .iter()
            .find(|(_, t)| **t == tenor)
            .map(|(id, _)| id.as_str())
    }
}

impl Validate for DataConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                errors.push(ValidationError::with_rule(
                    "data.start",
                    format!("start {start} is after end {end}"),
                    "ordered_range",
                ));
            }
        }

        if self.lookback_years == 0 || self.lookback_years > MAX_LOOKBACK_YEARS {
            errors.push(ValidationError::with_rule(
                "data.lookback_years",
                format!("Lookback must be between 1 and {MAX_LOOKBACK_YEARS} years"),
                "valid_lookback",
            ));
        }

        if self.series.is_empty() {
            errors.push(ValidationError::new("data.series", "At least one series is required"));
        }

        let mut seen: BTreeMap<u32, &str> = BTreeMap::new();
        for (id, tenor) in &self.series {
            if id.trim().is_empty() {
                errors.push(ValidationError::new("data.series", "Series id cannot be empty"));
            }
            if let Some(other) = seen.insert(tenor.months(), id) {
                errors.push(ValidationError::with_rule(
                    "data.series",
                    format!("{other} and {id} both map to {tenor}"),
                    "unique_tenor",
                ));
            }
        }

        errors
    }
}

// =============================================================================
// PIPELINE CONFIGURATION
// =============================================================================

/// Complete configuration of a Curvefly run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Data source and date range.
    pub data: DataConfig,
    /// Factor model settings.
    pub factors: FactorModelConfig,
    /// Butterfly legs and rolling window.
    pub butterfly: ButterflyConfig,
    /// Trade signal thresholds.
    pub signal: SignalThresholds,
}

impl PipelineConfig {
    /// Parses a TOML document. Missing sections and fields take defaults.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Every maturity either engine needs, shortest first.
    pub fn required_tenors(&self) -> Vec<Tenor> {
        let mut tenors: Vec<Tenor> = self
            .factors
            .maturities
            .iter()
            .copied()
            .chain(self.butterfly.legs())
            .collect();
        tenors.sort();
        tenors.dedup_by_key(|t| t.months());
        tenors
    }
}

impl Validate for PipelineConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = self.data.validate();

        if let Err(err) = self.factors.validate() {
            errors.push(ValidationError::new("factors", err.to_string()));
        }
        if let Err(err) = self.butterfly.validate() {
            errors.push(ValidationError::new("butterfly", err.to_string()));
        }
        if let Err(err) = self.signal.validate() {
            errors.push(ValidationError::new("signal.entry", err.to_string()));
        }

        for tenor in self.required_tenors() {
            if self.data.series_for(tenor).is_none() {
                errors.push(ValidationError::with_rule(
                    "data.series",
                    format!("No series is mapped to {tenor}"),
                    "covers_tenors",
                ));
            }
        }

        errors
    }
}
