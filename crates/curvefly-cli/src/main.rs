//! Curvefly CLI - yield curve factors and butterfly relative value.
//!
//! # Usage
//!
//! ```bash
//! # Level/slope/curvature loadings over the last twenty years
//! curvefly factors --data fred.csv
//!
//! # 2s5s10s butterfly z-score with a six month window
//! curvefly fly --data fred.csv --window 126
//!
//! # Both, from a configuration file, as JSON
//! curvefly --config curvefly.toml --format json run
//!
//! # Effective configuration after overrides
//! curvefly config --window 63
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let ctx = Context {
        format: cli.format,
        quiet: cli.quiet,
        config_path: cli.config,
    };

    match cli.command {
        Commands::Factors(args) => commands::factors::execute(&args, &ctx)?,
        Commands::Fly(args) => commands::fly::execute(&args, &ctx)?,
        Commands::Run(args) => commands::run::execute(&args, &ctx)?,
        Commands::Config(args) => commands::config::execute(&args, &ctx)?,
    }

    Ok(())
}
