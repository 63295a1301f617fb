//! Core logic for interaction timelines.
//!
//! This crate turns time-ordered pairwise interaction events into tracks and
//! derives the geometry needed to draw them:
//! - Event store: reading rows into events and ordering them
//! - Track construction: grouping, counting, duplicate pruning and filtering
//! - Layout: scales, radii and margins for a viewport

mod dedup;
pub mod error;
pub mod event;
pub mod layout;
pub mod options;
mod pipeline;
pub mod track;

pub use dedup::resolve_duplicates;
pub use error::{
    ConfigValidationError, DataShapeError, DegenerateLayoutError, EmptyResultError,
    TimelineError,
};
pub use event::{InteractionEvent, RowSet, ingest, sort_by_order};
pub use layout::{LayoutSettings, LinearScale, Margins, Viewport, compute_settings};
pub use options::{ColumnMap, TimelineOptions, TrackStrategy, UnknownTrackStrategy};
pub use pipeline::{DrawContext, Frame, TrackSet};
pub use track::{Interaction, Track, build, build_greedy};
