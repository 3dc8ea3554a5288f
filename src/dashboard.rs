//! Dashboard
//! Owns the tables built at startup and the control options derived from them,
//! and routes control values to the view functions.

use crate::charts::ChartSpec;
use crate::config::DashboardConfig;
use crate::data::{
    AggregateError, Aggregator, CrimeTables, DataLoader, DataProcessor, LoaderError, WideTable,
};
use crate::views::{self, SearchOutcome, SearchQuery};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

/// Option lists for the dashboard controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    /// Sorted; the proportion view's borough index points into this list.
    pub boroughs: Vec<String>,
    pub categories: Vec<String>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub default_year: i32,
}

impl Catalog {
    pub fn from_tables(tables: &CrimeTables, start_year: i32) -> Self {
        let boroughs: BTreeSet<&str> = tables.yearly.iter().map(|r| r.borough.as_str()).collect();
        let categories: BTreeSet<&str> =
            tables.yearly.iter().map(|r| r.category.as_str()).collect();
        let min_year = tables.yearly.iter().map(|r| r.year).min();
        let max_year = tables.yearly.iter().map(|r| r.year).max();

        let default_year = match (min_year, max_year) {
            (Some(lo), Some(hi)) => start_year.clamp(lo, hi),
            _ => start_year,
        };

        Self {
            boroughs: boroughs.into_iter().map(str::to_string).collect(),
            categories: categories.into_iter().map(str::to_string).collect(),
            min_year,
            max_year,
            default_year,
        }
    }

    /// Years the year controls offer, oldest first.
    pub fn years(&self) -> Vec<i32> {
        match (self.min_year, self.max_year) {
            (Some(lo), Some(hi)) => (lo..=hi).collect(),
            _ => Vec::new(),
        }
    }

    /// 1-based serial numbers shown under the borough slider.
    pub fn borough_serials(&self) -> Vec<(usize, &str)> {
        self.boroughs
            .iter()
            .enumerate()
            .map(|(i, b)| (i + 1, b.as_str()))
            .collect()
    }
}

/// Read-only dashboard state. Safe to share between concurrent viewers.
pub struct Dashboard {
    tables: CrimeTables,
    catalog: Catalog,
    page_size: usize,
}

impl Dashboard {
    /// Load, reshape and aggregate the CSV. Any failure here is fatal.
    pub fn load(csv_path: &Path, config: &DashboardConfig) -> Result<Self, DashboardError> {
        let wide = DataLoader::load_csv(csv_path)?;
        Ok(Self::from_wide(&wide, config)?)
    }

    pub fn from_wide(wide: &WideTable, config: &DashboardConfig) -> Result<Self, AggregateError> {
        let long = DataProcessor::melt(wide);
        let tables = Aggregator::build(long)?;
        let catalog = Catalog::from_tables(&tables, config.start_year);

        Ok(Self {
            tables,
            catalog,
            page_size: config.page_size,
        })
    }

    pub fn tables(&self) -> &CrimeTables {
        &self.tables
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn time_series(&self, boroughs: &[String], category: Option<&str>) -> ChartSpec {
        views::time_series(&self.tables.long, boroughs, category)
    }

    pub fn proportion(&self, year: i32, borough_index: usize) -> ChartSpec {
        views::proportion(&self.tables.yearly, &self.catalog.boroughs, year, borough_index)
    }

    pub fn comparison(&self, year: i32) -> ChartSpec {
        views::comparison(&self.tables.borough_years, year)
    }

    pub fn search(&self, query: &SearchQuery) -> SearchOutcome {
        views::search(&self.tables.long, query, self.page_size)
    }
}
