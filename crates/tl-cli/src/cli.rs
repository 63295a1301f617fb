//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tl_core::TrackStrategy;

/// Interaction timelines.
///
/// Reads pairwise interaction events from a delimited file or a published
/// spreadsheet and turns them into one track per significant participant.
#[derive(Debug, Parser)]
#[command(name = "tl", version, about, long_about = None)]
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
    /// List tracks and their interactions.
    Tracks {
        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the computed layout for a viewport.
    Layout {
        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Viewport width in pixels (overrides config).
        #[arg(long)]
        width: Option<f64>,

        /// Viewport height in pixels (overrides config).
        #[arg(long)]
        height: Option<f64>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Draw tracks as a terminal chart.
    Chart {
        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Total chart width in columns.
        #[arg(long, default_value_t = 80)]
        columns: usize,
    },
}

/// Input location and track options shared by every command.
#[derive(Debug, Clone, Args)]
pub struct PipelineArgs {
    /// Delimited file path or http(s) URL of a published spreadsheet.
    pub source: String,

    /// Field delimiter (defaults to tab for .tsv files, comma otherwise).
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Minimum distinct partners for a participant to get a track.
    #[arg(long)]
    pub min_count: Option<u32>,

    /// Prune mirrored interactions from the less connected side.
    #[arg(long)]
    pub remove_duplicates: bool,

    /// Track assignment strategy (count-filter-sort, greedy-peel).
    #[arg(long)]
    pub strategy: Option<TrackStrategy>,
}
