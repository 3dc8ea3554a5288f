//! Static Chart Renderer
//! Draws chart specifications to PNG with plotters.
//!
//! Layout per chart kind:
//! 1. Line: one colored series per borough, dates on x, optional log10 y axis
//! 2. Pie: wedges in slice order, "label pct%" annotation inside each wedge
//! 3. Bar: categorical x axis in the given order, rotated borough labels
//! 4. Placeholder: title only

use crate::charts::{BarChart, ChartSpec, LineChart, PieChart};
use crate::data::YearMonth;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::Path;
use thiserror::Error;

const FONT: &str = "sans-serif";
const LIGHT_SALMON: RGBColor = RGBColor(255, 160, 122);

pub const PALETTE: [RGBColor; 10] = [
    RGBColor(231, 76, 60),  // Red
    RGBColor(46, 204, 113), // Green
    RGBColor(155, 89, 182), // Purple
    RGBColor(243, 156, 18), // Orange
    RGBColor(26, 188, 156), // Teal
    RGBColor(233, 30, 99),  // Pink
    RGBColor(0, 188, 212),  // Cyan
    RGBColor(255, 87, 34),  // Deep Orange
    RGBColor(121, 85, 72),  // Brown
    RGBColor(96, 125, 139), // Blue Grey
];

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw chart: {0}")]
    Draw(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Draw(e.to_string())
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render a chart specification to a PNG file.
    pub fn render_png(
        spec: &ChartSpec,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        Self::draw(&root, spec)?;
        root.present()?;
        log::info!("Rendered '{}' to {}", spec.title(), path.display());
        Ok(())
    }

    /// Draw onto any plotters backend.
    pub fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        spec: &ChartSpec,
    ) -> Result<(), RenderError> {
        root.fill(&WHITE)?;
        match spec {
            ChartSpec::Placeholder { title } => Self::draw_placeholder(root, title),
            ChartSpec::Line(chart) => Self::draw_line(root, chart),
            ChartSpec::Pie(chart) => Self::draw_pie(root, chart),
            ChartSpec::Bar(chart) => Self::draw_bar(root, chart),
        }
    }

    fn draw_placeholder<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        title: &str,
    ) -> Result<(), RenderError> {
        let (w, _) = root.dim_in_pixel();
        let style = (FONT, 24)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        root.draw(&Text::new(title.to_string(), (w as i32 / 2, 20), style))?;
        Ok(())
    }

    fn draw_line<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        chart: &LineChart,
    ) -> Result<(), RenderError> {
        let Some((first, last)) = chart.date_range() else {
            return Self::draw_placeholder(root, &chart.title);
        };

        let log_y = chart.log_y;
        // Log axis is drawn as log10 on a linear axis; zero counts have no position.
        let to_y = move |v: u64| if log_y { (v as f64).log10() } else { v as f64 };
        let y_top = to_y(chart.max_value().max(1)) * 1.1 + if log_y { 0.1 } else { 1.0 };

        let mut ctx = ChartBuilder::on(root)
            .caption(&chart.title, (FONT, 24))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(first.ordinal()..last.ordinal() + 1, 0f64..y_top)?;

        let y_label = |y: &f64| {
            if log_y {
                format!("{:.0}", 10f64.powf(*y))
            } else {
                format!("{:.0}", y)
            }
        };
        ctx.configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_labels(10)
            .x_label_formatter(&|x: &i32| YearMonth::from_ordinal(*x).to_string())
            .y_label_formatter(&y_label)
            .draw()?;

        for (idx, series) in chart.series.iter().enumerate() {
            let color = PALETTE[idx % PALETTE.len()];
            let points: Vec<(i32, f64)> = series
                .points
                .iter()
                .filter(|p| !log_y || p.value > 0)
                .map(|p| (p.date.ordinal(), to_y(p.value)))
                .collect();

            ctx.draw_series(LineSeries::new(points, color.stroke_width(2)))?
                .label(series.name.clone())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
        }

        ctx.configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(&BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
        Ok(())
    }

    fn draw_pie<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        chart: &PieChart,
    ) -> Result<(), RenderError> {
        let area = root.titled(&chart.title, (FONT, 24))?;
        let (w, h) = area.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);
        let radius = f64::from(w.min(h)) * 0.42;

        let total: u64 = chart.slices.iter().map(|s| s.value).sum();
        if total == 0 {
            return Ok(());
        }

        let label_style = (FONT, 13)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));

        let mut start = -FRAC_PI_2;
        for (idx, slice) in chart.slices.iter().enumerate() {
            let sweep = slice.value as f64 / total as f64 * TAU;
            if sweep <= 0.0 {
                continue;
            }

            let color = PALETTE[idx % PALETTE.len()];
            area.draw(&Polygon::new(
                wedge_points(center, radius, start, sweep),
                color.filled(),
            ))?;

            let mid = start + sweep / 2.0;
            let anchor = (
                center.0 + (radius * 0.65 * mid.cos()).round() as i32,
                center.1 + (radius * 0.65 * mid.sin()).round() as i32,
            );
            area.draw(&Text::new(
                format!("{} {:.1}%", slice.label, slice.percent),
                anchor,
                label_style.clone(),
            ))?;

            start += sweep;
        }
        Ok(())
    }

    fn draw_bar<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        chart: &BarChart,
    ) -> Result<(), RenderError> {
        if chart.bars.is_empty() {
            return Self::draw_placeholder(root, &chart.title);
        }

        let labels: Vec<&str> = chart.bars.iter().map(|b| b.label.as_str()).collect();
        let y_top = chart.max_value() + chart.max_value() / 10 + 1;

        let mut ctx = ChartBuilder::on(root)
            .caption(&chart.title, (FONT, 24))
            .margin(15)
            .x_label_area_size(140)
            .y_label_area_size(80)
            .build_cartesian_2d((0..labels.len()).into_segmented(), 0u64..y_top)?;

        ctx.configure_mesh()
            .disable_x_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_labels(labels.len())
            .x_label_style(
                (FONT, 11)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .x_label_formatter(&|v: &SegmentValue<usize>| match v {
                SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                    labels.get(*i).map(|s| s.to_string()).unwrap_or_default()
                }
                SegmentValue::Last => String::new(),
            })
            .draw()?;

        ctx.draw_series(
            Histogram::vertical(&ctx)
                .style(LIGHT_SALMON.filled())
                .margin(4)
                .data(chart.bars.iter().enumerate().map(|(i, b)| (i, b.value))),
        )?;
        Ok(())
    }
}

/// Polygon outline of a pie wedge: the center followed by points along the arc.
pub fn wedge_points(center: (i32, i32), radius: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = ((sweep / TAU) * 180.0).ceil().max(2.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for k in 0..=steps {
        let angle = start + sweep * k as f64 / steps as f64;
        points.push((
            center.0 + (radius * angle.cos()).round() as i32,
            center.1 + (radius * angle.sin()).round() as i32,
        ));
    }
    points
}
