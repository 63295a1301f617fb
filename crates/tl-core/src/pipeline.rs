//! One draw cycle: rows in, tracks and layout out.
//!
//! A [`DrawContext`] carries validated options through every stage. Nothing is
//! cached between cycles; each call to [`DrawContext::draw`] rebuilds from rows.

use serde::Serialize;

use crate::error::{DataShapeError, TimelineError};
use crate::event::{RowSet, ingest, order_extent, sort_by_order};
use crate::layout::{LayoutSettings, Viewport, compute_settings};
use crate::options::{ColumnMap, TimelineOptions, TrackStrategy};
use crate::track::{Track, build, build_greedy};

/// Everything the renderer needs for one cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub tracks: Vec<Track>,
    pub layout: LayoutSettings,
    pub event_count: usize,
    pub order_extent: (u32, u32),
}

impl Frame {
    /// Length of the longest participant name, in characters.
    pub fn max_name_length(&self) -> usize {
        longest_name(&self.tracks)
    }
}

/// Tracks without geometry, for callers that do not draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackSet {
    pub tracks: Vec<Track>,
    pub event_count: usize,
    pub order_extent: (u32, u32),
}

impl TrackSet {
    /// Length of the longest participant name, in characters.
    pub fn max_name_length(&self) -> usize {
        longest_name(&self.tracks)
    }
}

fn longest_name(tracks: &[Track]) -> usize {
    tracks
        .iter()
        .map(|track| track.participant.chars().count())
        .max()
        .unwrap_or(0)
}

/// Validated options for a draw cycle.
#[derive(Debug, Clone)]
pub struct DrawContext {
    options: TimelineOptions,
    columns: ColumnMap,
}

impl DrawContext {
    /// Validates `options`; nothing runs if they are out of range.
    pub fn new(options: TimelineOptions) -> Result<Self, TimelineError> {
        options.validate()?;
        let columns = options.columns();
        Ok(Self { options, columns })
    }

    /// Ingests, sorts and groups `rows` into tracks.
    pub fn tracks(&self, rows: &RowSet) -> Result<TrackSet, TimelineError> {
        let events = sort_by_order(ingest(rows, &self.columns)?);
        let extent = order_extent(&events).ok_or(DataShapeError::NoRows)?;

        let minimum = self.options.minimum_interaction_count;
        let tracks = match self.options.track_strategy {
            TrackStrategy::CountFilterSort => {
                build(&events, minimum, self.options.remove_duplicate_interactions)?
            }
            TrackStrategy::GreedyPeel => {
                if self.options.remove_duplicate_interactions {
                    tracing::warn!("duplicate removal does not apply to greedy-peel tracks");
                }
                build_greedy(&events, minimum)?
            }
        };

        Ok(TrackSet {
            tracks,
            event_count: events.len(),
            order_extent: extent,
        })
    }

    /// Runs the full cycle for a viewport.
    pub fn draw(&self, rows: &RowSet, viewport: Viewport) -> Result<Frame, TimelineError> {
        let track_set = self.tracks(rows)?;
        let layout = compute_settings(
            track_set.tracks.len(),
            track_set.order_extent,
            track_set.max_name_length(),
            viewport,
            &self.options,
        )?;

        Ok(Frame {
            tracks: track_set.tracks,
            layout,
            event_count: track_set.event_count,
            order_extent: track_set.order_extent,
        })
    }
}
