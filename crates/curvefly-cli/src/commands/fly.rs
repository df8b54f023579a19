//! Fly command implementation.
//!
//! Builds the duration-neutral butterfly from yield levels and reports the
//! most recent z-scores with any active trade signal.

use std::collections::HashMap;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use curvefly_analytics::butterfly::{
    ButterflyEngine, ButterflySeries, ButterflyWeights, SignalSeries, SignalThresholds,
    TradeSignal,
};
use curvefly_config::PipelineConfig;
use curvefly_core::{Date, Tenor, YieldTable};

use crate::cli::OutputFormat;
use crate::commands::{load_yields, resolve_config, Context, DataArgs, SignalArgs};
use crate::output::{
    fmt4, fmt_z, print_header, print_info, print_json, print_output, print_warning, KeyValue,
};

/// Arguments for the fly command.
#[derive(Args, Debug)]
pub struct FlyArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub signal: SignalArgs,

    /// Number of most recent signal rows to show
    #[arg(short, long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..))]
    pub rows: u32,
}

/// One signal date.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct SignalRow {
    #[tabled(rename = "Date")]
    pub date: Date,
    #[tabled(rename = "w short", display_with = "fmt4")]
    pub weight_short: f64,
    #[tabled(rename = "w belly", display_with = "fmt4")]
    pub weight_belly: f64,
    #[tabled(rename = "w long", display_with = "fmt4")]
    pub weight_long: f64,
    #[tabled(rename = "Composite", display_with = "fmt4")]
    pub composite_yield: f64,
    #[tabled(rename = "Mean", display_with = "fmt4")]
    pub rolling_mean: f64,
    #[tabled(rename = "Std Dev", display_with = "fmt4")]
    pub rolling_std_dev: f64,
    #[tabled(rename = "Z", display_with = "fmt_z")]
    pub z_score: f64,
    #[tabled(rename = "Signal")]
    pub signal: TradeSignal,
}

/// Everything the fly command prints.
#[derive(Debug, Clone, Serialize)]
pub struct FlyReport {
    pub legs: [Tenor; 3],
    pub window: usize,
    pub entry_threshold: f64,
    pub observations: usize,
    pub signal_rows: usize,
    pub active_signal: Option<TradeSignal>,
    pub recent: Vec<SignalRow>,
}

impl FlyReport {
    /// Summarises a butterfly run, keeping the last `rows` signal dates.
    pub fn new(
        series: &ButterflySeries,
        signal: &SignalSeries,
        thresholds: &SignalThresholds,
        rows: usize,
    ) -> Self {
        let weights: HashMap<Date, ButterflyWeights> =
            series.points().iter().map(|p| (p.date, p.weights)).collect();

        let skip = signal.len().saturating_sub(rows);
        let recent = signal
            .points()
            .iter()
            .skip(skip)
            .filter_map(|p| {
                let w = weights.get(&p.date)?;
                Some(SignalRow {
                    date: p.date,
                    weight_short: w.short,
                    weight_belly: w.belly,
                    weight_long: w.long,
                    composite_yield: p.composite_yield,
                    rolling_mean: p.rolling_mean,
                    rolling_std_dev: p.rolling_std_dev,
                    z_score: p.z_score,
                    signal: thresholds.classify(p.z_score),
                })
            })
            .collect();

        Self {
            legs: series.legs(),
            window: signal.window(),
            entry_threshold: thresholds.entry,
            observations: series.len(),
            signal_rows: signal.len(),
            active_signal: signal.latest().map(|p| thresholds.classify(p.z_score)),
            recent,
        }
    }

    fn title(&self) -> String {
        format!(
            "{}/{}/{} Butterfly (window {}, entry ±{:.2})",
            self.legs[0], self.legs[1], self.legs[2], self.window, self.entry_threshold
        )
    }

    /// Prints the report in the requested format.
    pub fn render(&self, ctx: &Context) -> Result<()> {
        match ctx.format {
            OutputFormat::Json => print_json(self)?,
            OutputFormat::Csv => print_output(&self.recent, OutputFormat::Csv)?,
            OutputFormat::Table => {
                if !ctx.quiet {
                    print_header(&self.title());
                }
                if self.recent.is_empty() {
                    print_info(&format!(
                        "Not enough history for a {}-observation window ({} observations)",
                        self.window, self.observations
                    ));
                    return Ok(());
                }
                print_output(&self.recent, OutputFormat::Table)?;

                let summary = vec![
                    KeyValue::new("Observations", self.observations.to_string()),
                    KeyValue::new("Signal rows", self.signal_rows.to_string()),
                ];
                if !ctx.quiet {
                    print_output(&summary, OutputFormat::Table)?;
                }
                self.print_active_signal();
            }
        }
        Ok(())
    }

    fn print_active_signal(&self) {
        let Some(latest) = self.recent.last() else {
            return;
        };
        match latest.signal {
            TradeSignal::Flat => println!(
                "{} no signal (z = {})",
                latest.date,
                fmt_z(&latest.z_score)
            ),
            signal => {
                let line = format!(
                    "{} {} (z = {})",
                    latest.date,
                    signal.to_string().to_uppercase(),
                    fmt_z(&latest.z_score)
                );
                println!("{}", line.bold());
            }
        }
    }
}

/// Computes the configured butterfly and its rolling signal.
pub fn compute_fly(
    config: &PipelineConfig,
    yields: &YieldTable,
) -> Result<(ButterflySeries, SignalSeries)> {
    let engine = ButterflyEngine::new(config.butterfly)?;
    let (series, signal) = engine.run(yields)?;

    if signal.is_empty() {
        print_warning(&format!(
            "{} observations do not fill a {}-observation window; no signal rows",
            series.len(),
            config.butterfly.window
        ));
    }
    info!(
        "butterfly computed over {} dates, {} signal rows",
        series.len(),
        signal.len()
    );
    Ok((series, signal))
}

/// Execute the fly command.
pub fn execute(args: &FlyArgs, ctx: &Context) -> Result<()> {
    let config = resolve_config(ctx, &args.data, None, Some(&args.signal))?;
    let yields = load_yields(&config)?;
    let (series, signal) = compute_fly(&config, &yields)?;
    FlyReport::new(&series, &signal, &config.signal, args.rows as usize).render(ctx)
}
