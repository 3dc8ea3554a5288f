//! Charts module - Chart specifications and rendering

mod renderer;
mod spec;

pub use renderer::{RenderError, StaticChartRenderer, PALETTE};
pub use spec::{Bar, BarChart, ChartSpec, LineChart, LinePoint, LineSeries, PieChart, PieSlice};
