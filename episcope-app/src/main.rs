//! Episcope
//!
//! Command line front end for chromatin structure ensembles.
//!
//! Features:
//! - Listing of experiments, timesteps, chromosomes and tracks
//! - Curve fitting and resampling of one selection's structure and tracks
//! - Summary of the produced geometry (counts, scalar ranges, bounds)

mod app;

use clap::Parser;
use std::path::PathBuf;

/// Episcope - Chromatin Structure Ensemble Browser
#[derive(Parser, Debug)]
#[command(name = "episcope")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Dataset root directory (holds meta.yaml and experiments/)
    #[arg(short, long)]
    data: PathBuf,

    /// Chromosome to resample
    #[arg(short, long)]
    chromosome: Option<String>,

    /// Experiment to resample
    #[arg(short, long)]
    experiment: Option<String>,

    /// Timestep to resample
    #[arg(short, long)]
    timestep: Option<String>,

    /// Subdivision step in genomic coordinates (<= 0 disables subdivision)
    #[arg(short, long, default_value_t = 10_000, allow_negative_numbers = true)]
    max_distance: i64,

    /// Cardinal spline tension in [0, 1] (0 is Catmull-Rom)
    #[arg(long, default_value_t = 0.0)]
    tension: f64,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = app::run(args) {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}
