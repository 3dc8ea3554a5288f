//! Comparison view: total crimes per borough for one year, largest first.

use crate::charts::{Bar, BarChart, ChartSpec};
use crate::data::BoroughYearRecord;

pub fn comparison(borough_years: &[BoroughYearRecord], year: i32) -> ChartSpec {
    let mut rows: Vec<&BoroughYearRecord> =
        borough_years.iter().filter(|r| r.year == year).collect();
    // Ties fall back to name order so output is stable.
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.borough.cmp(&b.borough)));

    log::debug!("comparison for {}: {} boroughs", year, rows.len());

    ChartSpec::Bar(BarChart {
        title: format!("Total Crimes per Borough in {}", year),
        x_label: "Boroughs".to_string(),
        y_label: "Total Crimes".to_string(),
        bars: rows
            .into_iter()
            .map(|r| Bar {
                label: r.borough.clone(),
                value: r.count,
            })
            .collect(),
    })
}
