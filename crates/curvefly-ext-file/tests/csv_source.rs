//! Reading FRED-style CSV files through the `YieldSource` trait.

use std::fs;
use std::path::PathBuf;

use approx::assert_relative_eq;
use curvefly_core::prelude::*;
use curvefly_ext_file::CsvYieldSource;
use tempfile::TempDir;

const FRED_CSV: &str = "\
DATE,DGS2,DGS5,DGS10,DGS30
2024-01-05,4.40,4.00,4.05,4.21
2024-01-02,4.33,3.93,3.95,4.08
2024-01-03,4.33,3.90,3.91,4.05
2024-01-04,.,3.97,3.99,4.15
2024-01-08,4.36,3.96,4.01,4.17
2024-01-09,,3.97,4.02,4.18
";

fn series() -> Vec<(String, Tenor)> {
    vec![
        ("DGS2".to_string(), Tenor::Years(2)),
        ("DGS5".to_string(), Tenor::Years(5)),
        ("DGS10".to_string(), Tenor::Years(10)),
        ("DGS30".to_string(), Tenor::Years(30)),
    ]
}

fn tenors() -> Vec<Tenor> {
    series().into_iter().map(|(_, t)| t).collect()
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn date(s: &str) -> Date {
    Date::parse(s).unwrap()
}

#[test]
fn test_fetch_sorts_and_forward_fills() {
    let dir = TempDir::new().unwrap();
    let source = CsvYieldSource::new(write(&dir, "fred.csv", FRED_CSV), series());

    let table = source.fetch(&YieldRequest::new(tenors())).unwrap();

    assert_eq!(table.nrows(), 6);
    assert_eq!(table.dates()[0], date("2024-01-02"));
    assert_eq!(table.dates()[5], date("2024-01-09"));
    // 2024-01-04 and 2024-01-09 2Y gaps are carried forward
    assert_relative_eq!(table.get(2, Tenor::Years(2)).unwrap(), 4.33);
    assert_relative_eq!(table.get(5, Tenor::Years(2)).unwrap(), 4.36);
    assert_relative_eq!(table.get(4, Tenor::Years(30)).unwrap(), 4.17);
}

#[test]
fn test_fetch_respects_range_and_column_order() {
    let dir = TempDir::new().unwrap();
    let source = CsvYieldSource::new(write(&dir, "fred.csv", FRED_CSV), series());

    let request = YieldRequest::new(vec![Tenor::Years(10), Tenor::Years(2)])
        .with_range(Some(date("2024-01-03")), Some(date("2024-01-05")));
    let table = source.fetch(&request).unwrap();

    assert_eq!(table.tenors(), &[Tenor::Years(10), Tenor::Years(2)]);
    assert_eq!(table.nrows(), 3);
    assert_relative_eq!(table.row(0)[0], 3.91);
    assert_relative_eq!(table.row(1)[1], 4.33);
}

#[test]
fn test_leading_gap_is_dropped() {
    let dir = TempDir::new().unwrap();
    let csv = "\
observation_date,DGS2,DGS10
2024-01-02,.,3.95
2024-01-03,4.33,3.91
";
    let source = CsvYieldSource::new(write(&dir, "obs.csv", csv), series());
    let request = YieldRequest::new(vec![Tenor::Years(2), Tenor::Years(10)]);
    let table = source.fetch(&request).unwrap();

    assert_eq!(table.nrows(), 1);
    assert_eq!(table.dates()[0], date("2024-01-03"));
}

#[test]
fn test_range_start_is_not_filled_from_earlier_rows() {
    let dir = TempDir::new().unwrap();
    let source = CsvYieldSource::new(write(&dir, "fred.csv", FRED_CSV), series());

    let request =
        YieldRequest::new(tenors()).with_range(Some(date("2024-01-04")), None);
    let table = source.fetch(&request).unwrap();

    // 2024-01-04 has no 2Y print inside the range
    assert_eq!(table.dates()[0], date("2024-01-05"));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let source = CsvYieldSource::new(dir.path().join("absent.csv"), series());
    assert!(matches!(
        source.fetch(&YieldRequest::new(tenors())),
        Err(CoreError::DataUnavailable { .. })
    ));
}

#[test]
fn test_missing_series_column() {
    let dir = TempDir::new().unwrap();
    let csv = "DATE,DGS2,DGS10\n2024-01-02,4.33,3.95\n";
    let source = CsvYieldSource::new(write(&dir, "narrow.csv", csv), series());

    let err = source.fetch(&YieldRequest::new(tenors())).unwrap_err();
    assert!(matches!(err, CoreError::DataUnavailable { .. }));
    assert!(err.to_string().contains("DGS5"));
}

#[test]
fn test_unmapped_tenor() {
    let dir = TempDir::new().unwrap();
    let source = CsvYieldSource::new(write(&dir, "fred.csv", FRED_CSV), series());
    let err = source
        .fetch(&YieldRequest::new(vec![Tenor::Months(3)]))
        .unwrap_err();
    assert!(err.to_string().contains("3M"));
}

#[test]
fn test_empty_range() {
    let dir = TempDir::new().unwrap();
    let source = CsvYieldSource::new(write(&dir, "fred.csv", FRED_CSV), series());
    let request = YieldRequest::new(tenors())
        .with_range(Some(date("2023-01-01")), Some(date("2023-12-31")));
    assert!(matches!(
        source.fetch(&request),
        Err(CoreError::DataUnavailable { .. })
    ));
}

#[test]
fn test_bad_cells() {
    let dir = TempDir::new().unwrap();

    let bad_value = "DATE,DGS2\n2024-01-02,abc\n";
    let source = CsvYieldSource::new(write(&dir, "value.csv", bad_value), series());
    let err = source
        .fetch(&YieldRequest::new(vec![Tenor::Years(2)]))
        .unwrap_err();
    assert!(err.to_string().contains("line 2"));

    let bad_date = "DATE,DGS2\n01/02/2024,4.33\n";
    let source = CsvYieldSource::new(write(&dir, "date.csv", bad_date), series());
    assert!(source.fetch(&YieldRequest::new(vec![Tenor::Years(2)])).is_err());

    let duplicate = "DATE,DGS2\n2024-01-02,4.33\n2024-01-02,4.34\n";
    let source = CsvYieldSource::new(write(&dir, "dup.csv", duplicate), series());
    let err = source
        .fetch(&YieldRequest::new(vec![Tenor::Years(2)]))
        .unwrap_err();
    assert!(err.to_string().contains("duplicate"));
}

#[test]
fn test_usable_as_trait_object() {
    let dir = TempDir::new().unwrap();
    let source: Box<dyn YieldSource> =
        Box::new(CsvYieldSource::new(write(&dir, "fred.csv", FRED_CSV), series()));
    assert!(source.name().ends_with("fred.csv"));
    assert_eq!(source.fetch(&YieldRequest::new(tenors())).unwrap().ncols(), 4);
}
