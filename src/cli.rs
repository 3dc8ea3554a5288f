use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Crime CSV to load (otherwise $CRIME_DASHBOARD_CSV, then the config file)
    #[arg(long, global = true)]
    pub csv: Option<PathBuf>,

    /// JSON settings file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print chart specifications and tables as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the control options: boroughs (with serial numbers), crimes, years
    Summary,

    /// Crime count over time for selected boroughs and one crime type
    Trend {
        /// Borough to include; repeat for several
        #[arg(long = "borough")]
        boroughs: Vec<String>,

        /// Crime type (MinorText)
        #[arg(long)]
        category: Option<String>,

        /// Render the chart to this PNG file
        #[arg(long)]
        png: Option<PathBuf>,
    },

    /// Share of each crime type in one borough for one year
    Share {
        #[arg(long)]
        year: Option<i32>,

        /// Position in the sorted borough list, starting at 0
        #[arg(long, default_value_t = 0)]
        borough_index: usize,

        #[arg(long)]
        png: Option<PathBuf>,
    },

    /// Total crimes per borough for one year, largest first
    Compare {
        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        png: Option<PathBuf>,
    },

    /// Filter monthly records by year, month, borough and crime type
    Search {
        #[arg(long)]
        year: Option<i32>,

        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        #[arg(long)]
        borough: Option<String>,

        #[arg(long)]
        crime: Option<String>,

        /// Page of results to show, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
}
