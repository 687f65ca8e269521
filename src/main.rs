mod analysis;
mod report;

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use analysis::run_analysis;
use clap::Parser;
use report::render_summary;
use tracing_subscriber::EnvFilter;

/// Size a tubular wing spar along the half-span.
#[derive(Parser)]
#[command(name = "sparx")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Parameter file (.yaml, .yml or .json)
    #[arg(name = "CONFIG")]
    config: PathBuf,

    /// Write renderer-ready chart series as JSON to this file
    #[arg(long)]
    charts: Option<PathBuf>,

    /// Write the per-station table as CSV to this file
    #[arg(long)]
    table: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Configuration errors abort here, before any station is integrated.
    let (summary, profiles) = run_analysis(&cli.config)?;

    if let Some(path) = &cli.charts {
        fs::write(path, profiles.charts_json()?)?;
    }
    if let Some(path) = &cli.table {
        fs::write(path, profiles.to_csv())?;
    }

    println!("{}", render_summary(&summary));

    Ok(())
}
