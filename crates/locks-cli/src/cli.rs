//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use locks_core::{Locale, Style};

use crate::config::Overrides;

/// Screen lock session reporter.
///
/// Reads macOS `log show` output, reconstructs the periods the screen was
/// unlocked and prints the session boundaries of each day.
#[derive(Debug, Parser)]
#[command(name = "locks", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log file to read. Reads standard input when omitted.
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub format: FormatArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Rendering and merging options that override the configuration.
#[derive(Debug, Clone, Default, Args)]
pub struct FormatArgs {
    /// Locale for dates and times (de-CH, en-US, iso).
    #[arg(long, global = true)]
    pub locale: Option<Locale>,

    /// Date style (short, medium).
    #[arg(long, global = true)]
    pub date_style: Option<Style>,

    /// Time style (short, medium).
    #[arg(long, global = true)]
    pub time_style: Option<Style>,

    /// Merge sessions separated by less than this many minutes.
    #[arg(long, global = true, value_name = "MINUTES")]
    pub gap_threshold: Option<i64>,
}

impl From<&FormatArgs> for Overrides {
    fn from(args: &FormatArgs) -> Self {
        Self {
            locale: args.locale,
            date_style: args.date_style,
            time_style: args.time_style,
            gap_threshold_minutes: args.gap_threshold,
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print session boundaries per day (default).
    Report {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print every recognized lock state event as JSON lines.
    Events,

    /// Print reconstructed sessions as JSON lines.
    Sessions,
}
