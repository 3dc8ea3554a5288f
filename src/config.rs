//! Dashboard Configuration
//! Optional JSON settings file; every field has a default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CSV_ENV_VAR: &str = "CRIME_DASHBOARD_CSV";
pub const DEFAULT_CSV: &str = "MPS Borough Level Crime (Historical).csv";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub csv_path: Option<PathBuf>,
    /// Rows per page in the search table.
    pub page_size: usize,
    /// Preferred initial year for the year controls.
    pub start_year: i32,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            csv_path: None,
            page_size: 10,
            start_year: 2010,
            chart_width: 1200,
            chart_height: 700,
        }
    }
}

impl DashboardConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Resolve the input CSV: explicit flag, then environment, then config
    /// file, then the conventional file name in the working directory.
    pub fn resolve_csv(&self, cli: Option<&Path>, env: Option<&str>) -> PathBuf {
        cli.map(Path::to_path_buf)
            .or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
            .or_else(|| self.csv_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV))
    }
}
