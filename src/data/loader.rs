//! CSV Data Loader Module
//! Loads the borough crime CSV with Polars and normalizes it into a wide table.

use crate::data::records::{RawRecord, WideTable, YearMonth, YearMonthParseError};
use polars::prelude::*;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const BOROUGH_COL: &str = "BoroughName";
pub const MAJOR_COL: &str = "MajorText";
pub const MINOR_COL: &str = "MinorText";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Input file not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error(transparent)]
    BadDateColumn(#[from] YearMonthParseError),
    #[error("No date columns found")]
    NoDateColumns,
    #[error("Date column {0} appears more than once")]
    DuplicateDate(YearMonth),
    #[error("Count in column '{column}' at row {row} is not a whole number")]
    BadCount { column: String, row: usize },
    #[error("Negative count {count} in column '{column}' at row {row}")]
    NegativeCount {
        column: String,
        row: usize,
        count: i64,
    },
}

/// Handles CSV loading and text/date normalization.
pub struct DataLoader;

impl DataLoader {
    /// Load and normalize the crime CSV. Any error here is fatal for startup.
    pub fn load_csv(file_path: &Path) -> Result<WideTable, LoaderError> {
        if !file_path.is_file() {
            return Err(LoaderError::MissingFile(file_path.to_path_buf()));
        }

        log::info!("Reading {}", file_path.display());
        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;
        log::debug!("Read {} rows, {} columns", df.height(), df.width());

        Self::normalize(&df)
    }

    /// Normalize a raw frame: drop `MajorText`, uppercase boroughs, lowercase
    /// categories, and parse every remaining column header as `YYYYMM`.
    pub fn normalize(df: &DataFrame) -> Result<WideTable, LoaderError> {
        let boroughs = Self::string_values(df, BOROUGH_COL)?;
        let categories = Self::string_values(df, MINOR_COL)?;

        let date_cols: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .filter(|name| name != BOROUGH_COL && name != MAJOR_COL && name != MINOR_COL)
            .collect();
        if date_cols.is_empty() {
            return Err(LoaderError::NoDateColumns);
        }

        let dates = date_cols
            .iter()
            .map(|name| YearMonth::parse_compact(name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashSet::with_capacity(dates.len());
        if let Some(dup) = dates.iter().find(|d| !seen.insert(**d)) {
            return Err(LoaderError::DuplicateDate(*dup));
        }

        let mut counts_by_date: Vec<Vec<u64>> = Vec::with_capacity(date_cols.len());
        for name in &date_cols {
            counts_by_date.push(Self::count_values(df, name)?);
        }

        let mut rows: Vec<RawRecord> = Vec::with_capacity(df.height());
        let mut row_index: HashMap<(String, String), usize> = HashMap::new();

        for i in 0..df.height() {
            let borough = boroughs[i].to_uppercase();
            let category = categories[i].to_lowercase();
            let counts: Vec<u64> = counts_by_date.iter().map(|col| col[i]).collect();

            match row_index.get(&(borough.clone(), category.clone())) {
                Some(&existing) => {
                    log::warn!(
                        "Duplicate row for {} / {} merged into row {}",
                        borough,
                        category,
                        existing
                    );
                    for (acc, v) in rows[existing].counts.iter_mut().zip(counts) {
                        *acc += v;
                    }
                }
                None => {
                    row_index.insert((borough.clone(), category.clone()), rows.len());
                    rows.push(RawRecord {
                        borough,
                        category,
                        counts,
                    });
                }
            }
        }

        log::info!(
            "Normalized {} borough/category rows over {} months",
            rows.len(),
            dates.len()
        );
        Ok(WideTable { dates, rows })
    }

    fn string_values(df: &DataFrame, name: &'static str) -> Result<Vec<String>, LoaderError> {
        let column = df
            .column(name)
            .map_err(|_| LoaderError::MissingColumn(name))?
            .cast(&DataType::String)?;

        let values = column
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or_default().trim().to_string())
            .collect();
        Ok(values)
    }

    /// Empty cells count as zero. Text, fractional and negative cells are rejected.
    fn count_values(df: &DataFrame, name: &str) -> Result<Vec<u64>, LoaderError> {
        let column = df.column(name)?;
        let bad = |row: usize| LoaderError::BadCount {
            column: name.to_string(),
            row,
        };

        let cells: Vec<Option<i64>> = match column.dtype() {
            dt if dt.is_integer() || dt == &DataType::Null => column
                .as_materialized_series()
                .strict_cast(&DataType::Int64)?
                .i64()?
                .into_iter()
                .collect(),
            DataType::Float32 | DataType::Float64 => column
                .cast(&DataType::Float64)?
                .as_materialized_series()
                .f64()?
                .into_iter()
                .enumerate()
                .map(|(row, v)| match v {
                    None => Ok(None),
                    Some(x) if x.is_finite() && x.fract() == 0.0 => Ok(Some(x as i64)),
                    Some(_) => Err(bad(row)),
                })
                .collect::<Result<_, _>>()?,
            _ => column
                .cast(&DataType::String)?
                .as_materialized_series()
                .str()?
                .into_iter()
                .enumerate()
                .map(|(row, v)| match v.map(str::trim) {
                    None | Some("") => Ok(None),
                    Some(text) => text.parse::<i64>().map(Some).map_err(|_| bad(row)),
                })
                .collect::<Result<_, _>>()?,
        };

        cells
            .into_iter()
            .enumerate()
            .map(|(row, v)| match v {
                None => Ok(0),
                Some(count) => u64::try_from(count).map_err(|_| LoaderError::NegativeCount {
                    column: name.to_string(),
                    row,
                    count,
                }),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("crime.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn normalizes_case_and_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "BoroughName,MajorText,MinorText,201912,202001\n\
             Barnet,Arson and Criminal Damage,Arson,3,0\n\
             hackney,Drug Offences,Trafficking of Drugs,7,11\n",
        );

        let table = DataLoader::load_csv(&path).unwrap();
        assert_eq!(
            table.dates,
            vec![
                YearMonth::new(2019, 12).unwrap(),
                YearMonth::new(2020, 1).unwrap()
            ]
        );
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].borough, "BARNET");
        assert_eq!(table.rows[0].category, "arson");
        assert_eq!(table.rows[0].counts, vec![3, 0]);
        assert_eq!(table.rows[1].borough, "HACKNEY");
        assert_eq!(table.rows[1].category, "trafficking of drugs");
        assert_eq!(table.rows[1].counts, vec![7, 11]);
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = DataLoader::load_csv(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::MissingFile(_)));
    }

    #[test]
    fn unparsable_date_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "BoroughName,MajorText,MinorText,201912,Total\n\
             Barnet,Theft,Shoplifting,3,3\n",
        );

        let err = DataLoader::load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::BadDateColumn(_)));
    }

    #[test]
    fn missing_borough_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "Area,MajorText,MinorText,201912\nBarnet,Theft,Shoplifting,3\n");

        let err = DataLoader::load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(BOROUGH_COL)));
    }

    #[test]
    fn empty_cells_read_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "BoroughName,MajorText,MinorText,201912,202001\n\
             Barnet,Theft,Shoplifting,,4\n",
        );

        let table = DataLoader::load_csv(&path).unwrap();
        assert_eq!(table.rows[0].counts, vec![0, 4]);
    }

    #[test]
    fn negative_count_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "BoroughName,MajorText,MinorText,201912\n\
             Barnet,Theft,Shoplifting,-2\n",
        );

        let err = DataLoader::load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::NegativeCount { count: -2, .. }));
    }

    #[test]
    fn rows_equal_after_case_folding_are_merged() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "BoroughName,MajorText,MinorText,201912\n\
             Barnet,Theft,Shoplifting,2\n\
             BARNET,Theft,SHOPLIFTING,5\n",
        );

        let table = DataLoader::load_csv(&path).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].counts, vec![7]);
    }

    #[test]
    fn text_count_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "BoroughName,MajorText,MinorText,201912\n\
             Barnet,Theft,Shoplifting,abc\n\
             Camden,Theft,Shoplifting,5\n",
        );

        let err = DataLoader::load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::BadCount { row: 0, .. }));
    }

    #[test]
    fn fractional_count_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "BoroughName,MajorText,MinorText,201912\n\
             Barnet,Theft,Shoplifting,4\n\
             Camden,Theft,Shoplifting,3.9\n",
        );

        let err = DataLoader::load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::BadCount { row: 1, .. }));
    }

    #[test]
    fn repeated_date_header_is_rejected() {
        let df = DataFrame::new(vec![
            Column::new(BOROUGH_COL.into(), vec!["Barnet"]),
            Column::new(MAJOR_COL.into(), vec!["Theft"]),
            Column::new(MINOR_COL.into(), vec!["Shoplifting"]),
            Column::new("201912".into(), vec![1i64]),
            Column::new(" 201912".into(), vec![2i64]),
        ])
        .unwrap();

        let err = DataLoader::normalize(&df).unwrap_err();
        assert!(matches!(err, LoaderError::DuplicateDate(d) if d.year == 2019 && d.month == 12));
    }
}
