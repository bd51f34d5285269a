//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Caregiver activity timeline.
///
/// Lays out feed, sleep and diaper logs as day columns and predicts the next
/// feed.
#[derive(Debug, Parser)]
#[command(name = "hl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Use UTC calendar days instead of the local time zone.
    #[arg(long, global = true)]
    pub utc: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the wide layout of one day.
    Day(ViewArgs),

    /// Show the week containing a day, with that day selected.
    Week(ViewArgs),

    /// Show predicted feeds for a day.
    Ghosts {
        #[command(flatten)]
        view: ViewArgs,

        /// Override the configured prediction mode.
        #[arg(long, value_enum)]
        mode: Option<GhostModeArg>,

        /// Override the configured feed interval, in hours.
        #[arg(long)]
        interval: Option<f64>,
    },

    /// Show daily totals.
    Summary(ViewArgs),
}

/// Arguments shared by every view command.
#[derive(Debug, Clone, Args)]
pub struct ViewArgs {
    /// Event file (JSON array or JSON Lines).
    #[arg(short, long)]
    pub events: PathBuf,

    /// Subject (profile) ID. Defaults to the configured subject, or the only
    /// subject present in the file.
    #[arg(short, long)]
    pub subject: Option<String>,

    /// Day to show (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub date: Option<String>,

    /// Reference time (ISO 8601 or e.g. "2 hours ago"). Defaults to now.
    #[arg(long)]
    pub now: Option<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Prediction modes selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GhostModeArg {
    NextOccurrence,
    HistoricalAverage,
}

impl From<GhostModeArg> for hl_core::GhostMode {
    fn from(mode: GhostModeArg) -> Self {
        match mode {
            GhostModeArg::NextOccurrence => Self::NextOccurrence,
            GhostModeArg::HistoricalAverage => Self::HistoricalAverage,
        }
    }
}
