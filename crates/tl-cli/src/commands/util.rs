//! Shared utilities for CLI commands.

use anyhow::{Context, Result};
use tl_core::{DrawContext, Frame, RowSet, TimelineError, TimelineOptions, TrackSet, Viewport};
use tl_source::Source;

use crate::{Config, PipelineArgs};

/// Config options with command-line overrides applied.
pub fn timeline_options(args: &PipelineArgs, config: &Config) -> TimelineOptions {
    let mut options = config.timeline.clone();
    if let Some(minimum) = args.min_count {
        options.minimum_interaction_count = minimum;
    }
    if args.remove_duplicates {
        options.remove_duplicate_interactions = true;
    }
    if let Some(strategy) = args.strategy {
        options.track_strategy = strategy;
    }
    options
}

/// Fetches rows for `args.source`, blocking on the async fetch.
pub fn load_rows(args: &PipelineArgs, config: &Config) -> Result<RowSet> {
    let delimiter = args
        .delimiter
        .or(config.delimiter)
        .map(|c| u8::try_from(c).with_context(|| format!("delimiter {c:?} is not ASCII")))
        .transpose()?;
    let source = Source::parse(&args.source, delimiter);
    tracing::debug!(?source, "fetching rows");

    let runtime = tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
    runtime
        .block_on(source.fetch())
        .with_context(|| format!("failed to load {}", args.source))
}

/// Builds a validated context for one draw cycle.
pub fn draw_context(args: &PipelineArgs, config: &Config) -> Result<DrawContext> {
    DrawContext::new(timeline_options(args, config)).map_err(describe)
}

/// Loads rows and builds tracks.
pub fn load_tracks(args: &PipelineArgs, config: &Config) -> Result<TrackSet> {
    let context = draw_context(args, config)?;
    let rows = load_rows(args, config)?;
    context.tracks(&rows).map_err(describe)
}

/// Loads rows and runs a full draw cycle. Missing viewport sides come from
/// the config.
pub fn load_frame(
    args: &PipelineArgs,
    viewport: (Option<f64>, Option<f64>),
    config: &Config,
) -> Result<Frame> {
    let viewport = Viewport::new(
        viewport.0.unwrap_or(config.viewport_width),
        viewport.1.unwrap_or(config.viewport_height),
    );
    let context = draw_context(args, config)?;
    let rows = load_rows(args, config)?;
    context.draw(&rows, viewport).map_err(describe)
}

/// Attaches a user-facing summary to pipeline errors.
pub fn describe(err: TimelineError) -> anyhow::Error {
    let summary = match &err {
        TimelineError::ConfigValidation(_) => "invalid configuration",
        TimelineError::DataShape(_) => "input rows have the wrong shape",
        TimelineError::EmptyResult(_) => "no qualifying data",
        TimelineError::DegenerateLayout(_) => "timeline cannot be laid out",
    };
    anyhow::Error::new(err).context(summary)
}
