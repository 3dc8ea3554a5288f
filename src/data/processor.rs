//! Data Processor Module
//! Unpivots the normalized wide table into long format (melt operation).

use crate::data::records::{LongRecord, WideTable};
use polars::prelude::*;

/// Column names of the long-format frame handed to the aggregator.
pub const DATE_COL: &str = "date";
pub const YEAR_COL: &str = "year";
pub const MONTH_COL: &str = "month";
pub const BOROUGH_COL: &str = "borough";
pub const CATEGORY_COL: &str = "category";
pub const COUNT_COL: &str = "count";

/// Handles wide-to-long reshaping.
pub struct DataProcessor;

impl DataProcessor {
    /// Transform the wide table to long format.
    ///
    /// Every cell becomes exactly one record, zero counts included. Output is
    /// ordered by date column, then by input row.
    pub fn melt(table: &WideTable) -> Vec<LongRecord> {
        let mut records = Vec::with_capacity(table.dates.len() * table.rows.len());

        for (col_idx, date) in table.dates.iter().enumerate() {
            for row in &table.rows {
                records.push(LongRecord {
                    date: *date,
                    borough: row.borough.clone(),
                    category: row.category.clone(),
                    count: row.counts.get(col_idx).copied().unwrap_or(0),
                });
            }
        }

        log::debug!("Melted {} long records", records.len());
        records
    }

    /// Build a Polars frame from long records.
    ///
    /// Output columns: ["date", "year", "month", "borough", "category", "count"]
    pub fn to_frame(records: &[LongRecord]) -> PolarsResult<DataFrame> {
        let mut dates: Vec<String> = Vec::with_capacity(records.len());
        let mut years: Vec<i32> = Vec::with_capacity(records.len());
        let mut months: Vec<u32> = Vec::with_capacity(records.len());
        let mut boroughs: Vec<String> = Vec::with_capacity(records.len());
        let mut categories: Vec<String> = Vec::with_capacity(records.len());
        let mut counts: Vec<u64> = Vec::with_capacity(records.len());

        for r in records {
            dates.push(r.date.to_string());
            years.push(r.date.year);
            months.push(r.date.month);
            boroughs.push(r.borough.clone());
            categories.push(r.category.clone());
            counts.push(r.count);
        }

        DataFrame::new(vec![
            Column::new(DATE_COL.into(), dates),
            Column::new(YEAR_COL.into(), years),
            Column::new(MONTH_COL.into(), months),
            Column::new(BOROUGH_COL.into(), boroughs),
            Column::new(CATEGORY_COL.into(), categories),
            Column::new(COUNT_COL.into(), counts),
        ])
    }
}
