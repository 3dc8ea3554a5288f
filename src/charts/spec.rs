//! Chart Specifications
//! Renderer-independent descriptions of what each view should draw.

use crate::data::YearMonth;
use serde::Serialize;

/// A chart ready to hand to a renderer, or a titled placeholder when the
/// current selection has nothing to show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Placeholder { title: String },
    Line(LineChart),
    Pie(PieChart),
    Bar(BarChart),
}

impl ChartSpec {
    pub fn placeholder(title: impl Into<String>) -> Self {
        ChartSpec::Placeholder {
            title: title.into(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Placeholder { title } => title,
            ChartSpec::Line(c) => &c.title,
            ChartSpec::Pie(c) => &c.title,
            ChartSpec::Bar(c) => &c.title,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ChartSpec::Placeholder { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePoint {
    pub date: YearMonth,
    pub value: u64,
}

/// One line per borough.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<LinePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub log_y: bool,
    pub series: Vec<LineSeries>,
}

impl LineChart {
    /// Date span across all series.
    pub fn date_range(&self) -> Option<(YearMonth, YearMonth)> {
        let mut dates = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.date));
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    pub fn max_value(&self) -> u64 {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.value))
            .max()
            .unwrap_or(0)
    }
}

/// A pie slice annotated with its label and share of the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: u64,
}

/// Bars are drawn in the order given; the x axis is categorical.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn max_value(&self) -> u64 {
        self.bars.iter().map(|b| b.value).max().unwrap_or(0)
    }
}
