//! Crime Dashboard - command line front end
//!
//! Loads the crime CSV once at startup and answers one dashboard view per run.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, Command};
use crime_dashboard::charts::{ChartSpec, StaticChartRenderer};
use crime_dashboard::config::CSV_ENV_VAR;
use crime_dashboard::views::{SearchOutcome, SearchQuery};
use crime_dashboard::{Dashboard, DashboardConfig};
use serde::Serialize;
use std::path::Path;

fn main() -> Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::default(),
    };
    let env_csv = std::env::var(CSV_ENV_VAR).ok();
    let csv_path = config.resolve_csv(args.csv.as_deref(), env_csv.as_deref());

    let dashboard = Dashboard::load(&csv_path, &config)
        .with_context(|| format!("Failed to start dashboard from {}", csv_path.display()))?;
    let catalog = dashboard.catalog();

    match args.command {
        Command::Summary => {
            if args.json {
                print_json(catalog)?;
            } else {
                println!(
                    "{} long records, {} boroughs, {} crime types",
                    dashboard.tables().long.len(),
                    catalog.boroughs.len(),
                    catalog.categories.len()
                );
                if let (Some(lo), Some(hi)) = (catalog.min_year, catalog.max_year) {
                    println!("Years {}-{} (default {})", lo, hi, catalog.default_year);
                }
                println!();
                println!("{:>6}  Borough", "Serial");
                for (serial, borough) in catalog.borough_serials() {
                    println!("{:>6}  {}", serial, borough);
                }
                println!();
                println!("Crime types:");
                for category in &catalog.categories {
                    println!("  {}", category);
                }
            }
        }
        Command::Trend {
            boroughs,
            category,
            png,
        } => {
            let boroughs: Vec<String> = boroughs.iter().map(|b| b.trim().to_uppercase()).collect();
            let category = category.map(|c| c.trim().to_lowercase());
            let spec = dashboard.time_series(&boroughs, category.as_deref());
            emit_chart(&spec, args.json, png.as_deref(), &config)?;
        }
        Command::Share {
            year,
            borough_index,
            png,
        } => {
            let spec = dashboard.proportion(year.unwrap_or(catalog.default_year), borough_index);
            emit_chart(&spec, args.json, png.as_deref(), &config)?;
        }
        Command::Compare { year, png } => {
            let spec = dashboard.comparison(year.unwrap_or(catalog.default_year));
            emit_chart(&spec, args.json, png.as_deref(), &config)?;
        }
        Command::Search {
            year,
            month,
            borough,
            crime,
            page,
        } => {
            let query = SearchQuery {
                year,
                month,
                borough,
                category: crime,
            };
            let outcome = dashboard.search(&query);
            if args.json {
                print_json(&outcome)?;
            } else {
                print_search(&outcome, page.max(1) - 1);
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn emit_chart(
    spec: &ChartSpec,
    json: bool,
    png: Option<&Path>,
    config: &DashboardConfig,
) -> Result<()> {
    if json {
        print_json(spec)?;
    } else {
        print_chart(spec);
    }

    if let Some(path) = png {
        StaticChartRenderer::render_png(spec, path, config.chart_width, config.chart_height)
            .with_context(|| format!("Failed to render {}", path.display()))?;
        println!("Saved {}", path.display());
    }
    Ok(())
}

fn print_chart(spec: &ChartSpec) {
    println!("{}", spec.title());
    match spec {
        ChartSpec::Placeholder { .. } => {}
        ChartSpec::Line(chart) => {
            for series in &chart.series {
                let total: u64 = series.points.iter().map(|p| p.value).sum();
                println!(
                    "  {:<24} {:>4} months, {:>8} total",
                    series.name,
                    series.points.len(),
                    total
                );
            }
        }
        ChartSpec::Pie(chart) => {
            for slice in &chart.slices {
                println!(
                    "  {:<40} {:>8} {:>6.1}%",
                    slice.label, slice.value, slice.percent
                );
            }
        }
        ChartSpec::Bar(chart) => {
            for (rank, bar) in chart.bars.iter().enumerate() {
                println!("  {:>3}. {:<24} {:>8}", rank + 1, bar.label, bar.value);
            }
        }
    }
}

fn print_search(outcome: &SearchOutcome, page: usize) {
    let table = match outcome {
        SearchOutcome::NoData { message } => {
            println!("{}", message);
            return;
        }
        SearchOutcome::Table(table) => table,
    };

    let [year, month, borough, crime, count] = table.columns;
    println!(
        "{:<6} {:<6} {:<24} {:<40} {:>8}",
        year, month, borough, crime, count
    );
    for row in table.page(page) {
        println!(
            "{:<6} {:<6} {:<24} {:<40} {:>8}",
            row.year, row.month, row.borough, row.category, row.count
        );
    }
    println!(
        "Page {} of {} ({} rows)",
        page + 1,
        table.page_count(),
        table.len()
    );
}
