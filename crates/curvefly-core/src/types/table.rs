//! Dense date-by-tenor tables.
//!
//! A [`TenorFrame`] is a row-major matrix whose rows are keyed by strictly
//! increasing dates and whose columns are keyed by distinct tenors. Cell
//! values are not checked on construction: consumers that need a dense,
//! finite matrix call [`TenorFrame::first_non_finite`] and fail on their own
//! terms.
//!
//! [`YieldTable`] (yield levels, percent) and [`ChangeTable`] (day-over-day
//! differences of a yield table) wrap a frame so the two cannot be confused
//! at an API boundary.

use std::collections::HashSet;
use std::ops::Deref;

use super::{Date, Tenor};
use crate::error::{CoreError, CoreResult};

/// A dense table of `f64` values keyed by date (rows) and tenor (columns).
#[derive(Debug, Clone, PartialEq)]
pub struct TenorFrame {
    dates: Vec<Date>,
    tenors: Vec<Tenor>,
    values: Vec<f64>,
}

impl TenorFrame {
    /// Creates a frame from dates, column tenors and one value row per date.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTable` if there are no columns, tenors
    /// repeat, dates are not strictly increasing, or a row has the wrong
    /// width.
    pub fn new(dates: Vec<Date>, tenors: Vec<Tenor>, rows: Vec<Vec<f64>>) -> CoreResult<Self> {
        if tenors.is_empty() {
            return Err(CoreError::invalid_table("table must have at least one tenor"));
        }

        let mut seen = HashSet::with_capacity(tenors.len());
        for tenor in &tenors {
            if !seen.insert(tenor.months()) {
                return Err(CoreError::invalid_table(format!("duplicate tenor {tenor}")));
            }
        }

        if dates.len() != rows.len() {
            return Err(CoreError::invalid_table(format!(
                "{} dates but {} rows",
                dates.len(),
                rows.len()
            )));
        }

        if let Some(pair) = dates.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(CoreError::invalid_table(format!(
                "dates must be strictly increasing: {} followed by {}",
                pair[0], pair[1]
            )));
        }

        let width = tenors.len();
        let mut values = Vec::with_capacity(rows.len() * width);
        for (date, row) in dates.iter().zip(rows) {
            if row.len() != width {
                return Err(CoreError::invalid_table(format!(
                    "row {date} has {} values, expected {width}",
                    row.len()
                )));
            }
            values.extend(row);
        }

        Ok(Self {
            dates,
            tenors,
            values,
        })
    }

    /// Number of rows (dates).
    #[must_use]
    pub fn nrows(&self) -> usize {
        self.dates.len()
    }

    /// Number of columns (tenors).
    #[must_use]
    pub fn ncols(&self) -> usize {
        self.tenors.len()
    }

    /// Returns true if the frame has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Row dates in ascending order.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Column tenors in table order.
    #[must_use]
    pub fn tenors(&self) -> &[Tenor] {
        &self.tenors
    }

    /// Position of a tenor's column, if present.
    #[must_use]
    pub fn column_index(&self, tenor: Tenor) -> Option<usize> {
        self.tenors.iter().position(|t| *t == tenor)
    }

    /// Returns true if the tenor is one of the columns.
    #[must_use]
    pub fn contains(&self, tenor: Tenor) -> bool {
        self.column_index(tenor).is_some()
    }

    /// The values of row `index`, in column order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= nrows()`.
    #[must_use]
    pub fn row(&self, index: usize) -> &[f64] {
        let width = self.ncols();
        &self.values[index * width..(index + 1) * width]
    }

    /// Iterates over `(date, row)` pairs.
    pub fn rows(&self) -> impl Iterator<Item = (Date, &[f64])> + '_ {
        self.dates
            .iter()
            .copied()
            .zip(self.values.chunks_exact(self.ncols()))
    }

    /// Copies a tenor's column out of the frame.
    #[must_use]
    pub fn column(&self, tenor: Tenor) -> Option<Vec<f64>> {
        let col = self.column_index(tenor)?;
        Some(self.rows().map(|(_, row)| row[col]).collect())
    }

    /// Single cell lookup.
    #[must_use]
    pub fn get(&self, index: usize, tenor: Tenor) -> Option<f64> {
        let col = self.column_index(tenor)?;
        (index < self.nrows()).then(|| self.values[index * self.ncols() + col])
    }

    /// Row-major view of all values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// First NaN or infinite cell in row-major order.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<(Date, Tenor, f64)> {
        let width = self.ncols();
        self.values
            .iter()
            .position(|v| !v.is_finite())
            .map(|pos| (self.dates[pos / width], self.tenors[pos % width], self.values[pos]))
    }

    /// Projects the frame onto a subset of its columns, in the given order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTable` if a tenor is missing or repeated.
    pub fn select(&self, tenors: &[Tenor]) -> CoreResult<Self> {
        let indices = tenors
            .iter()
            .map(|t| {
                self.column_index(*t)
                    .ok_or_else(|| CoreError::invalid_table(format!("missing tenor {t}")))
            })
            .collect::<CoreResult<Vec<_>>>()?;

        let rows = self
            .rows()
            .map(|(_, row)| indices.iter().map(|&i| row[i]).collect())
            .collect();
        Self::new(self.dates.clone(), tenors.to_vec(), rows)
    }

    /// Keeps rows whose date falls in `[start, end]` (either bound optional).
    #[must_use]
    pub fn between(&self, start: Option<Date>, end: Option<Date>) -> Self {
        self.filter_rows(|date| {
            start.map_or(true, |s| date >= s) && end.map_or(true, |e| date <= e)
        })
    }

    /// Keeps the last `n` rows.
    #[must_use]
    pub fn tail(&self, n: usize) -> Self {
        let skip = self.nrows().saturating_sub(n);
        let width = self.ncols();
        Self {
            dates: self.dates[skip..].to_vec(),
            tenors: self.tenors.clone(),
            values: self.values[skip * width..].to_vec(),
        }
    }

    fn filter_rows(&self, keep: impl Fn(Date) -> bool) -> Self {
        let mut dates = Vec::new();
        let mut values = Vec::new();
        for (date, row) in self.rows() {
            if keep(date) {
                dates.push(date);
                values.extend_from_slice(row);
            }
        }
        Self {
            dates,
            tenors: self.tenors.clone(),
            values,
        }
    }
}

/// Yield levels in percent, one column per maturity.
#[derive(Debug, Clone, PartialEq)]
pub struct YieldTable(TenorFrame);

impl YieldTable {
    /// Creates a yield table. See [`TenorFrame::new`] for the shape checks.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTable` on inconsistent shape or dates.
    pub fn new(dates: Vec<Date>, tenors: Vec<Tenor>, rows: Vec<Vec<f64>>) -> CoreResult<Self> {
        TenorFrame::new(dates, tenors, rows).map(Self)
    }

    /// Day-over-day changes; the row dated `t` holds `y[t] - y[t-1]`.
    ///
    /// The first date has no predecessor and is dropped, so an `N`-row table
    /// yields `N - 1` change rows (zero for tables with fewer than two rows).
    #[must_use]
    pub fn changes(&self) -> ChangeTable {
        let frame = &self.0;
        let width = frame.ncols();
        let dates = frame.dates.iter().skip(1).copied().collect();
        let values = frame
            .values
            .chunks_exact(width)
            .zip(frame.values.chunks_exact(width).skip(1))
            .flat_map(|(prev, curr)| curr.iter().zip(prev).map(|(c, p)| c - p))
            .collect();

        ChangeTable(TenorFrame {
            dates,
            tenors: frame.tenors.clone(),
            values,
        })
    }

    /// Column subset of this table.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTable` if a tenor is missing or repeated.
    pub fn select(&self, tenors: &[Tenor]) -> CoreResult<Self> {
        self.0.select(tenors).map(Self)
    }

    /// Rows within `[start, end]`.
    #[must_use]
    pub fn between(&self, start: Option<Date>, end: Option<Date>) -> Self {
        Self(self.0.between(start, end))
    }
}

impl Deref for YieldTable {
    type Target = TenorFrame;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<TenorFrame> for YieldTable {
    fn from(frame: TenorFrame) -> Self {
        Self(frame)
    }
}

/// Day-over-day yield changes (percentage points), derived from a [`YieldTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeTable(TenorFrame);

impl ChangeTable {
    /// Creates a change table directly, e.g. for changes computed elsewhere.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTable` on inconsistent shape or dates.
    pub fn new(dates: Vec<Date>, tenors: Vec<Tenor>, rows: Vec<Vec<f64>>) -> CoreResult<Self> {
        TenorFrame::new(dates, tenors, rows).map(Self)
    }

    /// Column subset of this table.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTable` if a tenor is missing or repeated.
    pub fn select(&self, tenors: &[Tenor]) -> CoreResult<Self> {
        self.0.select(tenors).map(Self)
    }
}

impl Deref for ChangeTable {
    type Target = TenorFrame;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dates(n: usize) -> Vec<Date> {
        let start = Date::from_ymd(2024, 1, 2).unwrap();
        (0..n).map(|i| start.add_business_days(i as i32)).collect()
    }

    fn sample() -> YieldTable {
        YieldTable::new(
            dates(3),
            vec![Tenor::Years(2), Tenor::Years(10)],
            vec![vec![4.30, 3.95], vec![4.35, 3.90], vec![4.20, 4.00]],
        )
        .unwrap()
    }

    #[test]
    fn test_shape_checks() {
        let tenors = vec![Tenor::Years(2)];
        assert!(YieldTable::new(dates(2), vec![], vec![vec![], vec![]]).is_err());
        assert!(YieldTable::new(dates(2), tenors.clone(), vec![vec![1.0]]).is_err());
        assert!(YieldTable::new(dates(2), tenors.clone(), vec![vec![1.0], vec![1.0, 2.0]]).is_err());

        let mut backwards = dates(2);
        backwards.reverse();
        assert!(YieldTable::new(backwards, tenors.clone(), vec![vec![1.0], vec![2.0]]).is_err());

        let dup = vec![dates(1)[0], dates(1)[0]];
        assert!(YieldTable::new(dup, tenors, vec![vec![1.0], vec![2.0]]).is_err());

        assert!(YieldTable::new(
            dates(1),
            vec![Tenor::Years(2), Tenor::Months(24)],
            vec![vec![1.0, 1.0]]
        )
        .is_err());
    }

    #[test]
    fn test_changes() {
        let table = sample();
        let changes = table.changes();

        assert_eq!(changes.nrows(), 2);
        assert_eq!(changes.dates(), &table.dates()[1..]);
        assert_relative_eq!(changes.row(0)[0], 0.05, epsilon = 1e-12);
        assert_relative_eq!(changes.row(0)[1], -0.05, epsilon = 1e-12);
        assert_relative_eq!(changes.row(1)[0], -0.15, epsilon = 1e-12);
        assert_relative_eq!(changes.row(1)[1], 0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_changes_of_single_row_is_empty() {
        let table = sample().tail(1);
        let changes = YieldTable::from(table).changes();
        assert!(changes.is_empty());
        assert_eq!(changes.ncols(), 2);
    }

    #[test]
    fn test_column_access() {
        let table = sample();
        assert_eq!(table.column(Tenor::Years(10)).unwrap(), vec![3.95, 3.90, 4.00]);
        assert!(table.column(Tenor::Years(30)).is_none());
        assert_eq!(table.get(1, Tenor::Years(2)), Some(4.35));
        assert_eq!(table.get(3, Tenor::Years(2)), None);
    }

    #[test]
    fn test_select_reorders() {
        let selected = sample().select(&[Tenor::Years(10), Tenor::Years(2)]).unwrap();
        assert_eq!(selected.tenors(), &[Tenor::Years(10), Tenor::Years(2)]);
        assert_eq!(selected.row(0), &[3.95, 4.30]);
        assert!(sample().select(&[Tenor::Years(5)]).is_err());
    }

    #[test]
    fn test_first_non_finite() {
        let table = YieldTable::new(
            dates(2),
            vec![Tenor::Years(2), Tenor::Years(5)],
            vec![vec![4.0, 4.1], vec![4.2, f64::NAN]],
        )
        .unwrap();
        let (date, tenor, value) = table.first_non_finite().unwrap();
        assert_eq!(date, dates(2)[1]);
        assert_eq!(tenor, Tenor::Years(5));
        assert!(value.is_nan());
        assert!(sample().first_non_finite().is_none());
    }

    #[test]
    fn test_between_and_tail() {
        let table = sample();
        let d = dates(3);
        let middle = table.between(Some(d[1]), Some(d[1]));
        assert_eq!(middle.dates(), &[d[1]]);
        assert_eq!(table.between(None, None), table);
        assert_eq!(table.tail(2).dates(), &d[1..]);
        assert_eq!(table.tail(10).nrows(), 3);
    }
}
