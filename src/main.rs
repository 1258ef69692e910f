//! covchart: stacked coverage-depth charts for genome model summaries
//!
//! Reads a coverage summary JSON (per model: subject name, lane, id, and
//! cumulative % of target space covered per depth threshold), converts the
//! cumulative percentages to stacked depth bands, and renders one horizontal
//! stacked bar per model as SVG.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

mod chart;
mod stack;
mod style;
mod summary;
mod svg;
#[cfg(feature = "serve")]
mod serve;

use crate::style::ChartStyle;
use crate::summary::CoverageSummary;

/// Render a stacked coverage-depth chart from a coverage summary JSON
#[derive(Parser, Debug)]
#[command(name = "covchart")]
#[command(version)]
#[command(about = "Render per-model coverage summaries as stacked bar charts")]
struct Cli {
    /// Coverage summary JSON file (model id -> subject/lane/id/coverage map)
    input: PathBuf,

    /// Output SVG file
    #[arg(short, long, default_value = "coverage_chart.svg")]
    output: PathBuf,

    /// YAML file overriding chart style (geometry, palette, highlight)
    #[arg(long)]
    style: Option<PathBuf>,

    /// Start a web server to view the chart in a browser
    #[cfg(feature = "serve")]
    #[arg(long)]
    serve: bool,

    /// Port for the web server
    #[cfg(feature = "serve")]
    #[arg(long, default_value_t = 8765)]
    port: u16,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("covchart v{}", env!("CARGO_PKG_VERSION"));
    info!("Loading coverage summary: {}", cli.input.display());

    // Keep the raw text around: the serve feature republishes it as-is
    let summary_json = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read summary file: {}", cli.input.display()))?;
    let summary = CoverageSummary::from_json_str(&summary_json)?;
    let validated = summary.validate()?;

    info!(
        "Summary loaded: {} models, {} depth thresholds ({:?})",
        validated.models.len(),
        validated.depths.len(),
        validated.depths
    );

    let chart_style = match cli.style {
        Some(ref path) => {
            info!("Loading chart style: {}", path.display());
            ChartStyle::from_yaml(path)?
        }
        None => ChartStyle::default(),
    };

    let stacked = stack::stack_coverage(&validated);
    let scene = chart::build_scene(&stacked, &chart_style)?;
    let rendered = svg::render_svg(&scene);

    std::fs::write(&cli.output, &rendered)
        .with_context(|| format!("Failed to write chart: {}", cli.output.display()))?;
    info!(
        "Chart written to: {} ({}x{} px)",
        cli.output.display(),
        scene.total_width(),
        scene.total_height()
    );

    #[cfg(feature = "serve")]
    if cli.serve {
        info!("Starting chart viewer...");
        serve::start_server(&rendered, &summary_json, cli.port)?;
    }

    Ok(())
}
