//! CLI command implementations.

pub mod config;
pub mod factors;
pub mod fly;
pub mod run;

pub use config::ConfigArgs;
pub use factors::FactorsArgs;
pub use fly::FlyArgs;
pub use run::RunArgs;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use tracing::info;

use curvefly_config::{PipelineConfig, Validate};
use curvefly_core::traits::{YieldRequest, YieldSource};
use curvefly_core::{Date, YieldTable};
use curvefly_ext_file::CsvYieldSource;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Global options shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output format.
    pub format: OutputFormat,
    /// Suppress headers and notes.
    pub quiet: bool,
    /// Configuration file, if any.
    pub config_path: Option<PathBuf>,
}

/// Data selection flags.
#[derive(Args, Debug, Clone, Default)]
pub struct DataArgs {
    /// CSV file of yield levels (overrides data.path)
    #[arg(short, long, env = "CURVEFLY_DATA")]
    pub data: Option<PathBuf>,

    /// First date to load, YYYY-MM-DD (overrides data.start)
    #[arg(long)]
    pub start: Option<Date>,

    /// Last date to load, YYYY-MM-DD (overrides data.end)
    #[arg(long)]
    pub end: Option<Date>,
}

/// Factor model flags.
#[derive(Args, Debug, Clone, Default)]
pub struct FactorArgs {
    /// Number of principal components to keep (overrides factors.n_components)
    #[arg(short = 'k', long)]
    pub components: Option<usize>,
}

/// Butterfly signal flags.
#[derive(Args, Debug, Clone, Default)]
pub struct SignalArgs {
    /// Rolling z-score window in observations (overrides butterfly.window)
    #[arg(short, long)]
    pub window: Option<usize>,

    /// Absolute z-score that flags a trade (overrides signal.entry)
    #[arg(short, long)]
    pub threshold: Option<f64>,
}

impl DataArgs {
    fn apply(&self, config: &mut PipelineConfig) {
        if let Some(path) = &self.data {
            config.data.path = Some(path.clone());
        }
        if self.start.is_some() {
            config.data.start = self.start;
        }
        if self.end.is_some() {
            config.data.end = self.end;
        }
    }
}

impl FactorArgs {
    fn apply(&self, config: &mut PipelineConfig) {
        if let Some(k) = self.components {
            config.factors.n_components = k;
        }
    }
}

impl SignalArgs {
    fn apply(&self, config: &mut PipelineConfig) {
        if let Some(window) = self.window {
            config.butterfly.window = window;
        }
        if let Some(entry) = self.threshold {
            config.signal.entry = entry;
        }
    }
}

/// Loads the configuration file (or defaults), applies command-line
/// overrides and validates the result.
pub fn resolve_config(
    ctx: &Context,
    data: &DataArgs,
    factors: Option<&FactorArgs>,
    signal: Option<&SignalArgs>,
) -> Result<PipelineConfig> {
    let mut config = match &ctx.config_path {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    data.apply(&mut config);
    if let Some(factors) = factors {
        factors.apply(&mut config);
    }
    if let Some(signal) = signal {
        signal.apply(&mut config);
    }

    config.validate_or_error()?;
    Ok(config)
}

/// Reads the yields every configured engine needs.
pub fn load_yields(config: &PipelineConfig) -> Result<YieldTable> {
    let path = config.data.path.as_ref().ok_or(CliError::MissingDataPath)?;
    let (start, end) = config.data.date_range(Date::today())?;

    let source = CsvYieldSource::new(path, config.data.series.clone());
    let request =
        YieldRequest::new(config.required_tenors()).with_range(Some(start), Some(end));
    let yields = source.fetch(&request)?;

    info!(
        source = source.name(),
        rows = yields.nrows(),
        %start,
        %end,
        "loaded yield history"
    );
    Ok(yields)
}
