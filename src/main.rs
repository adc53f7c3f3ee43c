//! rustlitreview - merge and deduplicate literature database exports
//!
//! ## Usage
//!
//! ```bash
//! rustlitreview dedup --wos wos.csv --scopus scopus.csv --dimensions dimensions.xlsx
//! rustlitreview dedup --config review.toml --export deduplicated.csv
//! rustlitreview profiles > review.toml
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rustlitreview::{
    config::PipelineConfig,
    export::{self, JsonReport},
    pipeline, report,
};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Merge Web of Science, Scopus and Dimensions exports and remove duplicates
#[derive(Parser)]
#[command(name = "rustlitreview")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load, merge and deduplicate the exports, then print the report
    Dedup {
        /// Web of Science export (CSV or spreadsheet)
        #[arg(long, required_unless_present = "config", conflicts_with = "config")]
        wos: Option<PathBuf>,

        /// Scopus export (CSV or spreadsheet)
        #[arg(long, required_unless_present = "config", conflicts_with = "config")]
        scopus: Option<PathBuf>,

        /// Dimensions export (CSV or spreadsheet)
        #[arg(long, required_unless_present = "config", conflicts_with = "config")]
        dimensions: Option<PathBuf>,

        /// TOML pipeline config with custom sources and profiles
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Also write the deduplicated table to this CSV file
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Print summary and records as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the built-in source profiles as a TOML config template
    Profiles,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Dedup {
            wos,
            scopus,
            dimensions,
            config,
            export,
            json,
        } => {
            let config = build_config(wos, scopus, dimensions, config)?;
            run_dedup(&config, export, json)
        }
        Commands::Profiles => print_profiles(),
    }
}

// ============================================================================
// Commands
// ============================================================================

fn build_config(
    wos: Option<PathBuf>,
    scopus: Option<PathBuf>,
    dimensions: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<PipelineConfig> {
    if let Some(path) = config {
        return PipelineConfig::load(&path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    match (wos, scopus, dimensions) {
        (Some(wos), Some(scopus), Some(dimensions)) => {
            Ok(PipelineConfig::builtin(wos, scopus, dimensions))
        }
        _ => anyhow::bail!("--wos, --scopus and --dimensions are all required without --config"),
    }
}

fn run_dedup(config: &PipelineConfig, export_path: Option<PathBuf>, json: bool) -> Result<()> {
    let outcome = pipeline::run(config).context("Deduplication run aborted")?;

    if json {
        let doc = JsonReport::new(&outcome.summary, &outcome.dedup).to_json()?;
        println!("{}", doc);
    } else {
        println!("{}", outcome.summary);
        println!("{}", report::render_table(&outcome.dedup.table));
    }

    if let Some(path) = export_path {
        export::save_csv(&path, &outcome.dedup.table)
            .with_context(|| format!("Failed to export to {}", path.display()))?;
    }

    Ok(())
}

fn print_profiles() -> Result<()> {
    let template = PipelineConfig::builtin(
        PathBuf::from("wos.csv"),
        PathBuf::from("scopus.csv"),
        PathBuf::from("dimensions.xlsx"),
    );
    print!("{}", template.to_toml_string()?);
    Ok(())
}
