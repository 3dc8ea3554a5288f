//! Time-series view: one line per selected borough for a single crime category.

use crate::charts::{ChartSpec, LineChart, LinePoint, LineSeries};
use crate::data::LongRecord;
use std::collections::BTreeMap;

pub const NO_SELECTION_TITLE: &str = "No Data Selected";

/// Build the crime-over-time line chart.
///
/// Returns a placeholder when no borough or no category is selected.
pub fn time_series(long: &[LongRecord], boroughs: &[String], category: Option<&str>) -> ChartSpec {
    let category = match category {
        Some(c) if !c.is_empty() => c,
        _ => return ChartSpec::placeholder(NO_SELECTION_TITLE),
    };
    if boroughs.is_empty() {
        return ChartSpec::placeholder(NO_SELECTION_TITLE);
    }

    let mut by_borough: BTreeMap<&str, Vec<LinePoint>> = BTreeMap::new();
    for r in long
        .iter()
        .filter(|r| r.category == category && boroughs.contains(&r.borough))
    {
        by_borough.entry(r.borough.as_str()).or_default().push(LinePoint {
            date: r.date,
            value: r.count,
        });
    }

    let series: Vec<LineSeries> = by_borough
        .into_iter()
        .map(|(name, mut points)| {
            points.sort_by_key(|p| p.date);
            LineSeries {
                name: name.to_string(),
                points,
            }
        })
        .collect();

    log::debug!(
        "time series for '{}': {} of {} boroughs matched",
        category,
        series.len(),
        boroughs.len()
    );

    ChartSpec::Line(LineChart {
        title: category.to_string(),
        x_label: "Date".to_string(),
        y_label: "Amount".to_string(),
        legend_title: "Borough".to_string(),
        log_y: true,
        series,
    })
}
