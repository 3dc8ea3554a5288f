//! Proportion view: category shares for one borough in one year.

use crate::charts::{ChartSpec, PieChart, PieSlice};
use crate::data::YearlyRecord;

/// Build the crime-distribution pie chart.
///
/// `borough_index` points into the sorted borough list (the borough slider).
/// Slices keep table order rather than being sorted by size.
pub fn proportion(
    yearly: &[YearlyRecord],
    boroughs: &[String],
    year: i32,
    borough_index: usize,
) -> ChartSpec {
    let Some(borough) = boroughs.get(borough_index) else {
        return ChartSpec::placeholder(format!(
            "No borough at position {}",
            borough_index.saturating_add(1)
        ));
    };

    let rows: Vec<&YearlyRecord> = yearly
        .iter()
        .filter(|r| r.year == year && &r.borough == borough)
        .collect();

    if rows.is_empty() {
        return ChartSpec::placeholder(format!("No data available for {} in {}", borough, year));
    }

    let total: u64 = rows.iter().map(|r| r.count).sum();
    let slices = rows
        .iter()
        .map(|r| PieSlice {
            label: r.category.clone(),
            value: r.count,
            percent: if total == 0 {
                0.0
            } else {
                r.count as f64 * 100.0 / total as f64
            },
        })
        .collect();

    ChartSpec::Pie(PieChart {
        title: format!("Crime Distribution in {} for {}", borough, year),
        slices,
    })
}
