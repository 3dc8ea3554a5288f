//! Record Types
//! Row types for the wide input table and the derived long/yearly tables.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid date column '{0}': expected YYYYMM")]
pub struct YearMonthParseError(pub String);

/// Calendar month, ordered chronologically and displayed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Parse a raw `YYYYMM` column header.
    pub fn parse_compact(label: &str) -> Result<Self, YearMonthParseError> {
        let label = label.trim();
        let err = || YearMonthParseError(label.to_string());

        if label.len() != 6 || !label.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }

        let year: i32 = label[..4].parse().map_err(|_| err())?;
        let month: u32 = label[4..].parse().map_err(|_| err())?;
        Self::new(year, month).ok_or_else(err)
    }

    /// Months since year 0, used as a continuous chart axis.
    pub fn ordinal(&self) -> i32 {
        self.year * 12 + self.month as i32 - 1
    }

    pub fn from_ordinal(ordinal: i32) -> Self {
        Self {
            year: ordinal.div_euclid(12),
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }

    /// Two-digit month, as the search table shows it.
    pub fn month_label(&self) -> String {
        format!("{:02}", self.month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One row of the normalized wide table: counts line up with `WideTable::dates`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub borough: String,
    pub category: String,
    pub counts: Vec<u64>,
}

/// Normalized wide table as produced by the loader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WideTable {
    pub dates: Vec<YearMonth>,
    pub rows: Vec<RawRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LongRecord {
    pub date: YearMonth,
    pub borough: String,
    pub category: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearlyRecord {
    pub year: i32,
    pub borough: String,
    pub category: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoroughYearRecord {
    pub year: i32,
    pub borough: String,
    pub count: u64,
}

/// The derived tables, built once at startup and only ever read afterwards.
#[derive(Debug, Clone, Default)]
pub struct CrimeTables {
    pub long: Vec<LongRecord>,
    pub yearly: Vec<YearlyRecord>,
    pub borough_years: Vec<BoroughYearRecord>,
}
