//! Aggregator Module
//! Grouped summations over the long table: by calendar year, then by borough.

use crate::data::processor::{
    DataProcessor, BOROUGH_COL, CATEGORY_COL, COUNT_COL, YEAR_COL,
};
use crate::data::records::{BoroughYearRecord, CrimeTables, LongRecord, YearlyRecord};
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Unexpected null in aggregated column '{0}'")]
    NullValue(&'static str),
}

pub struct Aggregator;

impl Aggregator {
    /// Compute every derived table from the long records.
    pub fn build(long: Vec<LongRecord>) -> Result<CrimeTables, AggregateError> {
        let long_df = DataProcessor::to_frame(&long)?;

        let yearly_df = Self::sum_by(&long_df, &[YEAR_COL, BOROUGH_COL, CATEGORY_COL])?;
        let borough_year_df = Self::sum_by(&yearly_df, &[YEAR_COL, BOROUGH_COL])?;

        let mut yearly = Self::yearly_records(&yearly_df)?;
        yearly.sort_by(|a, b| {
            (a.year, &a.borough, &a.category).cmp(&(b.year, &b.borough, &b.category))
        });

        let mut borough_years = Self::borough_year_records(&borough_year_df)?;
        borough_years.sort_by(|a, b| (a.year, &a.borough).cmp(&(b.year, &b.borough)));

        log::info!(
            "Aggregated {} yearly rows, {} borough-year rows",
            yearly.len(),
            borough_years.len()
        );

        Ok(CrimeTables {
            long,
            yearly,
            borough_years,
        })
    }

    /// Sum the count column grouped by `keys`.
    pub fn sum_by(df: &DataFrame, keys: &[&str]) -> PolarsResult<DataFrame> {
        let key_exprs: Vec<Expr> = keys.iter().map(|k| col(*k)).collect();
        df.clone()
            .lazy()
            .group_by(key_exprs)
            .agg([col(COUNT_COL).sum()])
            .collect()
    }

    fn yearly_records(df: &DataFrame) -> Result<Vec<YearlyRecord>, AggregateError> {
        let years = Self::years(df)?;
        let boroughs = Self::strings(df, BOROUGH_COL)?;
        let categories = Self::strings(df, CATEGORY_COL)?;
        let counts = Self::counts(df)?;

        Ok(years
            .into_iter()
            .zip(boroughs)
            .zip(categories)
            .zip(counts)
            .map(|(((year, borough), category), count)| YearlyRecord {
                year,
                borough,
                category,
                count,
            })
            .collect())
    }

    fn borough_year_records(df: &DataFrame) -> Result<Vec<BoroughYearRecord>, AggregateError> {
        let years = Self::years(df)?;
        let boroughs = Self::strings(df, BOROUGH_COL)?;
        let counts = Self::counts(df)?;

        Ok(years
            .into_iter()
            .zip(boroughs)
            .zip(counts)
            .map(|((year, borough), count)| BoroughYearRecord {
                year,
                borough,
                count,
            })
            .collect())
    }

    fn years(df: &DataFrame) -> Result<Vec<i32>, AggregateError> {
        let column = df.column(YEAR_COL)?.cast(&DataType::Int32)?;
        column
            .as_materialized_series()
            .i32()?
            .into_iter()
            .map(|v| v.ok_or(AggregateError::NullValue(YEAR_COL)))
            .collect()
    }

    fn strings(df: &DataFrame, name: &'static str) -> Result<Vec<String>, AggregateError> {
        let column = df.column(name)?;
        column
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string).ok_or(AggregateError::NullValue(name)))
            .collect()
    }

    fn counts(df: &DataFrame) -> Result<Vec<u64>, AggregateError> {
        let column = df.column(COUNT_COL)?.cast(&DataType::UInt64)?;
        column
            .as_materialized_series()
            .u64()?
            .into_iter()
            .map(|v| v.ok_or(AggregateError::NullValue(COUNT_COL)))
            .collect()
    }
}
