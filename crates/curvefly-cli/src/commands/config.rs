//! Config command implementation.

use anyhow::Result;
use clap::Args;

use crate::cli::OutputFormat;
use crate::commands::{resolve_config, Context, DataArgs, FactorArgs, SignalArgs};
use crate::output::{print_info, print_json};

/// Arguments for the config command. The same overrides as `run` are accepted
/// so their effect can be inspected before a run.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub factors: FactorArgs,

    #[command(flatten)]
    pub signal: SignalArgs,
}

/// Execute the config command.
pub fn execute(args: &ConfigArgs, ctx: &Context) -> Result<()> {
    let config = resolve_config(ctx, &args.data, Some(&args.factors), Some(&args.signal))?;

    match ctx.format {
        OutputFormat::Json => print_json(&config)?,
        OutputFormat::Table | OutputFormat::Csv => {
            if !ctx.quiet {
                let source = ctx
                    .config_path
                    .as_ref()
                    .map_or_else(|| "built-in defaults".to_string(), |p| p.display().to_string());
                print_info(&format!("Configuration from {source}"));
            }
            print!("{}", config.to_toml_string()?);
        }
    }
    Ok(())
}
