//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{ConfigArgs, FactorsArgs, FlyArgs, RunArgs};

/// Curvefly - yield curve factor decomposition and butterfly signals
#[derive(Parser)]
#[command(name = "curvefly")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress headers, notes and info logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Pipeline configuration file (TOML)
    #[arg(short, long, global = true, env = "CURVEFLY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Fit the factor model to daily yield changes
    Factors(FactorsArgs),

    /// Compute the duration-neutral butterfly and its z-score signal
    Fly(FlyArgs),

    /// Run the full pipeline: factors, then butterfly signal
    Run(RunArgs),

    /// Print the effective configuration as TOML
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::try_parse_from([
            "curvefly",
            "--format",
            "json",
            "fly",
            "--data",
            "fred.csv",
            "--window",
            "63",
            "--start",
            "2010-01-04",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Fly(args) => {
                assert_eq!(args.signal.window, Some(63));
                assert_eq!(args.data.data, Some(PathBuf::from("fred.csv")));
                assert_eq!(args.data.start.map(|d| d.to_string()).as_deref(), Some("2010-01-04"));
            }
            _ => panic!("expected fly"),
        }
    }

    #[test]
    fn test_rejects_bad_date() {
        assert!(Cli::try_parse_from(["curvefly", "factors", "--start", "04/01/2010"]).is_err());
    }
}
