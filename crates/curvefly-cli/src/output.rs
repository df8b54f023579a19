//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;
use crate::error::CliResult;

/// Formats and prints rows based on the specified format.
///
/// JSON callers normally serialise a whole report instead; this prints the
/// rows alone as a JSON array.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(&data),
        OutputFormat::Csv => print_csv(data),
    }
}

/// Prints any serialisable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> CliResult<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> CliResult<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// A table whose columns are only known at runtime.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Creates an empty grid with the given header row.
    pub fn new(headers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    pub fn push(&mut self, row: impl IntoIterator<Item = impl Into<String>>) {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Prints the grid as a table or CSV. JSON is not handled here.
    pub fn print(&self, format: OutputFormat) -> CliResult<()> {
        match format {
            OutputFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(std::io::stdout());
                wtr.write_record(&self.headers)?;
                for row in &self.rows {
                    wtr.write_record(row)?;
                }
                wtr.flush()?;
            }
            OutputFormat::Table | OutputFormat::Json => {
                let mut builder = Builder::default();
                builder.push_record(self.headers.clone());
                for row in &self.rows {
                    builder.push_record(row.clone());
                }
                let table = builder
                    .build()
                    .with(Style::rounded())
                    .with(Modify::new(Columns::first()).with(Alignment::left()))
                    .to_string();
                println!("{table}");
            }
        }
        Ok(())
    }
}

/// Formats a value with four decimals.
pub fn fmt4(value: &f64) -> String {
    format!("{value:.4}")
}

/// Formats a ratio as a percentage with two decimals.
pub fn fmt_percent(value: &f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Formats a z-score with a sign.
pub fn fmt_z(value: &f64) -> String {
    format!("{value:+.2}")
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_formats() {
        assert_eq!(fmt4(&0.123_456), "0.1235");
        assert_eq!(fmt_percent(&0.8512), "85.12%");
        assert_eq!(fmt_z(&2.0), "+2.00");
        assert_eq!(fmt_z(&-1.234), "-1.23");
    }

    #[test]
    fn test_grid_rows() {
        let mut grid = Grid::new(["Tenor", "PC1"]);
        grid.push(["2Y".to_string(), fmt4(&0.5)]);
        assert_eq!(grid.rows.len(), 1);
        assert_eq!(grid.headers, vec!["Tenor", "PC1"]);
    }
}
