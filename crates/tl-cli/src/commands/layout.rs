//! Layout command: shows the geometry a renderer would draw with.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use tl_core::Frame;

use super::util::load_frame;
use crate::{Config, PipelineArgs};

pub fn run<W: Write>(
    writer: &mut W,
    args: &PipelineArgs,
    viewport: (Option<f64>, Option<f64>),
    json: bool,
    config: &Config,
) -> Result<()> {
    let frame = load_frame(args, viewport, config)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&frame.layout)?)?;
    } else {
        write!(writer, "{}", format_layout(&frame))?;
    }
    Ok(())
}

/// Formats layout settings for terminal output.
pub fn format_layout(frame: &Frame) -> String {
    let layout = &frame.layout;
    let mut output = String::new();

    let _ = writeln!(
        output,
        "Canvas: {} x {} (ratios {} x {})",
        layout.outer_width, layout.outer_height, layout.x_ratio, layout.y_ratio
    );
    let _ = writeln!(
        output,
        "Drawing area: {} x {}",
        layout.inner_width, layout.inner_height
    );
    let _ = writeln!(
        output,
        "Point radius: {} (stroke {})",
        layout.radius, layout.stroke_width
    );
    let _ = writeln!(
        output,
        "Labels: {} x {}",
        layout.label_width, layout.label_height
    );
    let margins = &layout.margins;
    let _ = writeln!(
        output,
        "Margins: top {}, right {}, bottom {}, left {}",
        margins.top, margins.right, margins.bottom, margins.left
    );
    let (first, last) = frame.order_extent;
    let _ = writeln!(
        output,
        "Tracks: {} over orders {first}..{last}",
        frame.tracks.len()
    );

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use tl_core::{DrawContext, RowSet, TimelineOptions, Viewport};

    #[test]
    fn test_format_layout() {
        let options = TimelineOptions {
            outer_width: Some(640.0),
            outer_height: Some(480.0),
            ..Default::default()
        };
        let rows = RowSet::new(
            vec!["source".to_string(), "target".to_string(), "order".to_string()],
            vec![
                vec!["Ann".to_string(), "Bo".to_string(), "1".to_string()],
                vec!["Bo".to_string(), "Cy".to_string(), "9".to_string()],
                vec!["Cy".to_string(), "Ann".to_string(), "5".to_string()],
            ],
        );
        let frame = DrawContext::new(options)
            .unwrap()
            .draw(&rows, Viewport::new(1000.0, 800.0))
            .unwrap();

        assert_snapshot!(format_layout(&frame), @r"
        Canvas: 640 x 480 (ratios 0.325 x 0.1125)
        Drawing area: 508 x 368
        Point radius: 16 (stroke 16)
        Labels: 36 x 24
        Margins: top 32, right 32, bottom 80, left 100
        Tracks: 3 over orders 1..9
        ");
    }
}
