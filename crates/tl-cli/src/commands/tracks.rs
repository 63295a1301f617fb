//! Tracks command: lists each track with its interactions in order.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use tl_core::TrackSet;

use super::util::load_tracks;
use crate::{Config, PipelineArgs};

pub fn run<W: Write>(
    writer: &mut W,
    args: &PipelineArgs,
    json: bool,
    config: &Config,
) -> Result<()> {
    let track_set = load_tracks(args, config)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&track_set)?)?;
    } else {
        write!(writer, "{}", format_tracks(&track_set))?;
    }
    Ok(())
}

/// Formats tracks for terminal output, busiest first.
pub fn format_tracks(track_set: &TrackSet) -> String {
    let mut output = String::new();
    let (first, last) = track_set.order_extent;
    let _ = writeln!(
        output,
        "Tracks: {} (from {} events, orders {first}..{last})",
        track_set.tracks.len(),
        track_set.event_count,
    );
    let _ = writeln!(output);

    for track in &track_set.tracks {
        let interactions = track
            .interactions
            .iter()
            .map(|i| format!("{}@{}", i.partner, i.order))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            output,
            "- {} [{}]: {interactions}",
            track.participant,
            track.interactions.len()
        );
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use tl_core::{DrawContext, RowSet, TimelineOptions};

    fn sample_rows() -> RowSet {
        RowSet::new(
            vec!["source".to_string(), "target".to_string(), "order".to_string()],
            [("P1", "P2", "1"), ("P1", "P3", "2"), ("P1", "P4", "3"), ("P2", "P3", "3")]
                .iter()
                .map(|(a, b, o)| vec![a.to_string(), b.to_string(), o.to_string()])
                .collect(),
        )
    }

    #[test]
    fn test_format_all_tracks() {
        let context = DrawContext::new(TimelineOptions::default()).unwrap();
        let track_set = context.tracks(&sample_rows()).unwrap();
        assert_snapshot!(format_tracks(&track_set), @r"
        Tracks: 4 (from 4 events, orders 1..3)

        - P1 [3]: P2@1, P3@2, P4@3
        - P2 [2]: P1@1, P3@3
        - P3 [2]: P1@2, P2@3
        - P4 [1]: P1@3
        ");
    }

    #[test]
    fn test_format_thresholded_tracks() {
        let context = DrawContext::new(TimelineOptions {
            minimum_interaction_count: 3,
            ..Default::default()
        })
        .unwrap();
        let track_set = context.tracks(&sample_rows()).unwrap();
        assert_snapshot!(format_tracks(&track_set), @r"
        Tracks: 1 (from 4 events, orders 1..3)

        - P1 [3]: P2@1, P3@2, P4@3
        ");
    }

    #[test]
    fn test_json_output_is_structured() {
        let context = DrawContext::new(TimelineOptions::default()).unwrap();
        let track_set = context.tracks(&sample_rows()).unwrap();
        let json = serde_json::to_value(&track_set).unwrap();
        assert_eq!(json["tracks"][0]["participant"], "P1");
        assert_eq!(json["tracks"][0]["interactions"][2]["partner"], "P4");
        assert_eq!(json["order_extent"], serde_json::json!([1, 3]));
    }
}
