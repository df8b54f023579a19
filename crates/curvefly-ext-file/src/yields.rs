//! CSV yield source.

use std::path::{Path, PathBuf};

use log::debug;

use curvefly_core::error::{CoreError, CoreResult};
use curvefly_core::traits::{YieldRequest, YieldSource};
use curvefly_core::types::{Date, Tenor, YieldTable};

/// Header names accepted for the date column, compared case-insensitively.
pub const DATE_COLUMNS: [&str; 2] = ["date", "observation_date"];

/// Marker FRED writes for a missing observation.
const MISSING_MARKER: &str = ".";

// =============================================================================
// CSV YIELD SOURCE
// =============================================================================

/// Wide CSV file of yield levels in percent.
///
/// ```text
/// DATE,DGS2,DGS5,DGS10,DGS30
/// 2024-01-02,4.33,3.93,3.95,4.08
/// 2024-01-03,.,3.90,3.91,4.05
/// ```
///
/// Each fetch re-reads the file and cleans it the same way: rows are sorted
/// by date and restricted to the requested range, gaps (`.` or empty cells)
/// are forward-filled per column, and rows that are still incomplete are
/// dropped.
#[derive(Debug, Clone)]
pub struct CsvYieldSource {
    file_path: PathBuf,
    name: String,
    series: Vec<(String, Tenor)>,
}

impl CsvYieldSource {
    /// Creates a source over `file_path` with a series id to maturity mapping.
    pub fn new(
        file_path: impl AsRef<Path>,
        series: impl IntoIterator<Item = (String, Tenor)>,
    ) -> Self {
        let file_path = file_path.as_ref().to_path_buf();
        let name = file_path.display().to_string();
        Self {
            file_path,
            name,
            series: series.into_iter().collect(),
        }
    }

    /// Path of the backing file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Series id mapped to `tenor`.
    pub fn series_for(&self, tenor: Tenor) -> Option<&str> {
        self.series
            .iter()
            .find(|(_, t)| *t == tenor)
            .map(|(id, _)| id.as_str())
    }

    fn unavailable(&self, reason: impl Into<String>) -> CoreError {
        CoreError::data_unavailable(&self.name, reason)
    }

    /// Reads the requested columns as `(date, cells)` rows, file order.
    fn read_rows(&self, series_ids: &[&str]) -> CoreResult<Vec<(Date, Vec<Option<f64>>)>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.file_path)
            .map_err(|e| self.unavailable(e.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|e| self.unavailable(e.to_string()))?
            .clone();

        let date_col = headers
            .iter()
            .position(|h| DATE_COLUMNS.iter().any(|d| h.eq_ignore_ascii_case(d)))
            .ok_or_else(|| self.unavailable("no date column in header"))?;

        let columns = series_ids
            .iter()
            .map(|id| {
                headers
                    .iter()
                    .position(|h| h == *id)
                    .ok_or_else(|| self.unavailable(format!("series {id} not found in header")))
            })
            .collect::<CoreResult<Vec<usize>>>()?;

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(|e| self.unavailable(e.to_string()))?;
            // Header is line 1
            let line = line + 2;

            let raw_date = record.get(date_col).unwrap_or_default();
            let date = Date::parse(raw_date)
                .map_err(|_| self.unavailable(format!("line {line}: invalid date '{raw_date}'")))?;

            let cells = columns
                .iter()
                .zip(series_ids)
                .map(|(&col, id)| parse_cell(record.get(col).unwrap_or_default()).ok_or_else(|| {
                    self.unavailable(format!("line {line}: invalid value for {id}"))
                }))
                .collect::<CoreResult<Vec<Option<f64>>>>()?;

            rows.push((date, cells));
        }

        Ok(rows)
    }
}

/// `Some(None)` for a missing cell, `None` if the cell is not a number.
fn parse_cell(raw: &str) -> Option<Option<f64>> {
    if raw.is_empty() || raw == MISSING_MARKER {
        return Some(None);
    }
    raw.parse::<f64>().ok().map(Some)
}

/// Carries the last seen value of each column into later gaps.
fn forward_fill(rows: &mut [(Date, Vec<Option<f64>>)]) {
    let Some(width) = rows.first().map(|(_, cells)| cells.len()) else {
        return;
    };
    let mut last: Vec<Option<f64>> = vec![None; width];
    for (_, cells) in rows.iter_mut() {
        for (cell, prev) in cells.iter_mut().zip(last.iter_mut()) {
            if let Some(value) = *cell {
                *prev = Some(value);
            } else {
                *cell = *prev;
            }
        }
    }
}

impl YieldSource for CsvYieldSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self, request: &YieldRequest) -> CoreResult<YieldTable> {
        let series_ids = request
            .tenors
            .iter()
            .map(|&tenor| {
                self.series_for(tenor)
                    .ok_or_else(|| self.unavailable(format!("no series mapped to {tenor}")))
            })
            .collect::<CoreResult<Vec<&str>>>()?;

        let mut rows = self.read_rows(&series_ids)?;
        let read = rows.len();

        rows.sort_by_key(|(date, _)| *date);
        if let Some(pair) = rows.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(self.unavailable(format!("duplicate date {}", pair[0].0)));
        }

        rows.retain(|(date, _)| {
            request.start.map_or(true, |start| *date >= start)
                && request.end.map_or(true, |end| *date <= end)
        });
        forward_fill(&mut rows);

        let (dates, values): (Vec<Date>, Vec<Vec<f64>>) = rows
            .into_iter()
            .filter_map(|(date, cells)| {
                let complete: Option<Vec<f64>> = cells.into_iter().collect();
                complete.map(|values| (date, values))
            })
            .unzip();

        if dates.is_empty() {
            return Err(self.unavailable(format!(
                "no complete observations between {} and {}",
                request
                    .start
                    .map_or_else(|| "the first date".to_string(), |d| d.to_string()),
                request
                    .end
                    .map_or_else(|| "the last date".to_string(), |d| d.to_string()),
            )));
        }

        debug!(
            "{}: {} of {} rows kept for {}",
            self.name,
            dates.len(),
            read,
            series_ids.join(",")
        );

        YieldTable::new(dates, request.tenors.clone(), values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("4.25"), Some(Some(4.25)));
        assert_eq!(parse_cell("."), Some(None));
        assert_eq!(parse_cell(""), Some(None));
        assert_eq!(parse_cell("n/a"), None);
    }

    #[test]
    fn test_forward_fill() {
        let d = Date::from_ymd(2024, 1, 2).unwrap();
        let mut rows = vec![
            (d, vec![None, Some(1.0)]),
            (d.add_days(1), vec![Some(2.0), None]),
            (d.add_days(2), vec![None, None]),
            (d.add_days(3), vec![Some(3.0), Some(4.0)]),
        ];
        forward_fill(&mut rows);

        assert_eq!(rows[0].1, vec![None, Some(1.0)]);
        assert_eq!(rows[1].1, vec![Some(2.0), Some(1.0)]);
        assert_eq!(rows[2].1, vec![Some(2.0), Some(1.0)]);
        assert_eq!(rows[3].1, vec![Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_forward_fill_empty() {
        let mut rows: Vec<(Date, Vec<Option<f64>>)> = Vec::new();
        forward_fill(&mut rows);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_series_lookup() {
        let source = CsvYieldSource::new(
            "unused.csv",
            vec![("DGS2".to_string(), Tenor::Years(2))],
        );
        assert_eq!(source.series_for(Tenor::Years(2)), Some("DGS2"));
        assert_eq!(source.series_for(Tenor::Years(5)), None);
        assert_eq!(source.name(), "unused.csv");
    }
}
