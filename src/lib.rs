//! Crime Dashboard - borough crime CSV reshaping & chart views
//!
//! Loads a wide borough × month crime-count CSV once, derives long, yearly and
//! borough-year tables from it, and maps dashboard control values to chart
//! specifications or search tables.

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod views;

pub use config::DashboardConfig;
pub use dashboard::{Catalog, Dashboard, DashboardError};
