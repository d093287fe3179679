//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Fleet lifecycle metrics.
///
/// Reconstructs rented, maintenance, idle and incident days per vehicle from
/// exported contract, maintenance and lifecycle records.
#[derive(Debug, Parser)]
#[command(name = "fleet", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Per-vehicle day totals.
    Metrics(ReportArgs),

    /// Merged rental intervals per vehicle.
    Intervals(ReportArgs),

    /// Maintenance arrival/departure pairs per vehicle.
    Pairs(ReportArgs),

    /// Show how raw date values are read.
    ResolveDate {
        /// Raw values, e.g. "03/12/2025 10:18" or 1733221080000.
        #[arg(required = true)]
        values: Vec<String>,
    },
}

/// Input and output options shared by the report commands.
#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    /// JSON document with `vehicles`, `contracts`, `maintenance` and
    /// `events` arrays. Reads stdin when omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Reference instant for open intervals (defaults to config, then the
    /// current time).
    #[arg(long)]
    pub now: Option<String>,

    /// Only report this vehicle (any spelling of the plate).
    #[arg(long)]
    pub plate: Option<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}
