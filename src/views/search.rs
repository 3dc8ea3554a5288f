//! Search view: free-text filters over the long table, returned as a paged table.

use crate::data::LongRecord;
use serde::Serialize;

pub const NO_DATA_MESSAGE: &str = "No data found.";

pub const COLUMNS: [&str; 5] = [
    "Year",
    "Month",
    "BoroughName",
    "Type of Crimes",
    "Number of Crimes",
];

/// Search inputs. Every field is optional; blank text and a zero year or
/// month count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub borough: Option<String>,
    pub category: Option<String>,
}

impl SearchQuery {
    fn year_key(&self) -> Option<i32> {
        self.year.filter(|&y| y != 0)
    }

    fn month_key(&self) -> Option<u32> {
        self.month.filter(|&m| m != 0)
    }

    fn borough_key(&self) -> Option<String> {
        non_blank(self.borough.as_deref()).map(str::to_uppercase)
    }

    fn category_key(&self) -> Option<String> {
        non_blank(self.category.as_deref()).map(str::to_lowercase)
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRow {
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "BoroughName")]
    pub borough: String,
    #[serde(rename = "Type of Crimes")]
    pub category: String,
    #[serde(rename = "Number of Crimes")]
    pub count: u64,
}

impl From<&LongRecord> for SearchRow {
    fn from(r: &LongRecord) -> Self {
        Self {
            year: r.date.year.to_string(),
            month: r.date.month_label(),
            borough: r.borough.clone(),
            category: r.category.clone(),
            count: r.count,
        }
    }
}

/// Matching rows split into fixed-size pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchTable {
    pub columns: [&'static str; 5],
    pub rows: Vec<SearchRow>,
    pub page_size: usize,
}

impl SearchTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_size.max(1))
    }

    /// Zero-based page; out-of-range pages are empty.
    pub fn page(&self, index: usize) -> &[SearchRow] {
        let size = self.page_size.max(1);
        let start = index.saturating_mul(size).min(self.rows.len());
        let end = start.saturating_add(size).min(self.rows.len());
        &self.rows[start..end]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchOutcome {
    NoData { message: &'static str },
    Table(SearchTable),
}

impl SearchOutcome {
    pub fn table(&self) -> Option<&SearchTable> {
        match self {
            SearchOutcome::Table(t) => Some(t),
            SearchOutcome::NoData { .. } => None,
        }
    }
}

/// Filter the long table. Each given filter must match (logical AND); with no
/// filters every record is returned.
pub fn search(long: &[LongRecord], query: &SearchQuery, page_size: usize) -> SearchOutcome {
    let borough = query.borough_key();
    let category = query.category_key();

    let rows: Vec<SearchRow> = long
        .iter()
        .filter(|r| query.year_key().map_or(true, |y| r.date.year == y))
        // Month labels are zero-padded, so comparing the number is equivalent.
        .filter(|r| query.month_key().map_or(true, |m| r.date.month == m))
        .filter(|r| borough.as_deref().map_or(true, |b| r.borough == b))
        .filter(|r| category.as_deref().map_or(true, |c| r.category == c))
        .map(SearchRow::from)
        .collect();

    log::debug!("search {:?} matched {} rows", query, rows.len());

    if rows.is_empty() {
        return SearchOutcome::NoData {
            message: NO_DATA_MESSAGE,
        };
    }

    SearchOutcome::Table(SearchTable {
        columns: COLUMNS,
        rows,
        page_size,
    })
}
