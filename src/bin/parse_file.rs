use anyhow::{Context, Result};
use clap::Parser;
use flightsched::parse::{self, ParseOptions, DEFAULT_MONTH};
use flightsched::Grid;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Parse a flight schedule CSV export into the flight report"
)]
struct Args {
    /// Path to the schedule CSV export
    input: PathBuf,

    /// Month abbreviation applied to the "day N" header cells
    #[arg(long, default_value = DEFAULT_MONTH)]
    month: String,

    /// Calendar year applied to the header dates (defaults to this year)
    #[arg(long)]
    year: Option<i32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let defaults = ParseOptions::default();
    let opts = ParseOptions {
        month: args.month,
        year: args.year.unwrap_or(defaults.year),
    };

    let grid = Grid::from_path(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    let report = parse::parse_grid(&grid, &opts)?;
    println!("{}", report);

    Ok(())
}
