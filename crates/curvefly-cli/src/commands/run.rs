//! Run command implementation.
//!
//! Loads the yield history once and runs both engines over it.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::cli::OutputFormat;
use crate::commands::factors::{fit_factors, FactorReport};
use crate::commands::fly::{compute_fly, FlyReport};
use crate::commands::{load_yields, resolve_config, Context, DataArgs, FactorArgs, SignalArgs};
use crate::output::print_json;

/// Arguments for the run command.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub factors: FactorArgs,

    #[command(flatten)]
    pub signal: SignalArgs,

    /// Number of most recent signal rows to show
    #[arg(short, long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..))]
    pub rows: u32,
}

#[derive(Debug, Serialize)]
struct PipelineReport {
    factors: FactorReport,
    butterfly: FlyReport,
}

/// Execute the run command.
pub fn execute(args: &RunArgs, ctx: &Context) -> Result<()> {
    let config = resolve_config(ctx, &args.data, Some(&args.factors), Some(&args.signal))?;
    info!(
        components = config.factors.n_components,
        window = config.butterfly.window,
        "starting pipeline"
    );

    let yields = load_yields(&config)?;
    let fit = fit_factors(&config, &yields)?;
    let (series, signal) = compute_fly(&config, &yields)?;

    let report = PipelineReport {
        factors: FactorReport::from_fit(&fit),
        butterfly: FlyReport::new(&series, &signal, &config.signal, args.rows as usize),
    };

    match ctx.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => {
            report.factors.render(ctx)?;
            report.butterfly.render(ctx)?;
        }
        OutputFormat::Csv => {
            report.factors.render(ctx)?;
            println!();
            report.butterfly.render(ctx)?;
        }
    }

    info!("pipeline finished");
    Ok(())
}
