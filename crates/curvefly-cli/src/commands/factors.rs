//! Factors command implementation.
//!
//! Fits the principal component model to daily yield changes and reports
//! loadings and explained variance.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use curvefly_analytics::factors::{component_label, FactorDecomposition, FactorModel};
use curvefly_config::PipelineConfig;
use curvefly_core::{Date, Tenor, YieldTable};

use crate::cli::OutputFormat;
use crate::commands::{load_yields, resolve_config, Context, DataArgs, FactorArgs};
use crate::output::{fmt4, fmt_percent, print_header, print_json, print_output, Grid};

/// Arguments for the factors command.
#[derive(Args, Debug)]
pub struct FactorsArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub factors: FactorArgs,
}

/// One retained component.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentReport {
    pub name: String,
    pub eigenvalue: f64,
    pub explained_variance: f64,
    pub cumulative_variance: f64,
    pub loadings: Vec<f64>,
}

/// Everything the factors command prints.
#[derive(Debug, Clone, Serialize)]
pub struct FactorReport {
    pub observations: usize,
    pub first_date: Option<Date>,
    pub last_date: Option<Date>,
    pub tenors: Vec<Tenor>,
    pub components: Vec<ComponentReport>,
}

#[derive(Debug, Serialize, Tabled)]
struct VarianceRow {
    #[tabled(rename = "Component")]
    component: String,
    #[tabled(rename = "Eigenvalue", display_with = "fmt4")]
    eigenvalue: f64,
    #[tabled(rename = "Explained", display_with = "fmt_percent")]
    explained: f64,
    #[tabled(rename = "Cumulative", display_with = "fmt_percent")]
    cumulative: f64,
}

impl FactorReport {
    /// Summarises a fit.
    pub fn from_fit(fit: &FactorDecomposition) -> Self {
        let variance = fit.explained_variance();
        let cumulative = variance.cumulative();
        let components = (0..fit.loadings().n_components())
            .map(|k| ComponentReport {
                name: component_label(k),
                eigenvalue: variance.eigenvalues()[k],
                explained_variance: variance.ratios()[k],
                cumulative_variance: cumulative[k],
                loadings: fit.loadings().component(k),
            })
            .collect();

        let dates = fit.series().dates();
        Self {
            observations: dates.len(),
            first_date: dates.first().copied(),
            last_date: dates.last().copied(),
            tenors: fit.loadings().tenors().to_vec(),
            components,
        }
    }

    fn loadings_grid(&self) -> Grid {
        let mut grid = Grid::new(
            std::iter::once("Tenor".to_string()).chain(self.components.iter().map(|c| c.name.clone())),
        );
        for (j, tenor) in self.tenors.iter().enumerate() {
            grid.push(
                std::iter::once(tenor.to_string())
                    .chain(self.components.iter().map(|c| fmt4(&c.loadings[j]))),
            );
        }
        grid
    }

    fn variance_rows(&self) -> Vec<VarianceRow> {
        self.components
            .iter()
            .map(|c| VarianceRow {
                component: c.name.clone(),
                eigenvalue: c.eigenvalue,
                explained: c.explained_variance,
                cumulative: c.cumulative_variance,
            })
            .collect()
    }

    /// Prints the report in the requested format.
    pub fn render(&self, ctx: &Context) -> Result<()> {
        match ctx.format {
            OutputFormat::Json => print_json(self)?,
            OutputFormat::Csv => {
                self.loadings_grid().print(OutputFormat::Csv)?;
                println!();
                print_output(&self.variance_rows(), OutputFormat::Csv)?;
            }
            OutputFormat::Table => {
                if !ctx.quiet {
                    print_header(&format!(
                        "Factor Loadings ({} daily changes, {} to {})",
                        self.observations,
                        display_date(self.first_date),
                        display_date(self.last_date)
                    ));
                }
                self.loadings_grid().print(OutputFormat::Table)?;
                if !ctx.quiet {
                    print_header("Explained Variance");
                }
                print_output(&self.variance_rows(), OutputFormat::Table)?;
            }
        }
        Ok(())
    }
}

fn display_date(date: Option<Date>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.to_string())
}

/// Fits the configured factor model to the day-over-day changes of `yields`.
pub fn fit_factors(config: &PipelineConfig, yields: &YieldTable) -> Result<FactorDecomposition> {
    let changes = yields.changes();
    let model = FactorModel::new(config.factors.clone())?;
    let fit = model.decompose(&changes)?;

    info!(
        "factor model fitted on {} changes: {} components explain {:.2}% of variance",
        changes.nrows(),
        model.n_components(),
        fit.explained_variance().total() * 100.0
    );
    Ok(fit)
}

/// Execute the factors command.
pub fn execute(args: &FactorsArgs, ctx: &Context) -> Result<()> {
    let config = resolve_config(ctx, &args.data, Some(&args.factors), None)?;
    let yields = load_yields(&config)?;
    let fit = fit_factors(&config, &yields)?;
    FactorReport::from_fit(&fit).render(ctx)
}
