//! Chart command: draws tracks as rows of text.
//!
//! One row per track, labelled with the participant. Each interaction is a
//! mark at the column its order maps to through the frame's layout.

use std::io::Write;

use anyhow::{Result, bail};
use tl_core::{Frame, LinearScale};

use super::util::load_frame;
use crate::{Config, PipelineArgs};

const TRACK_CHAR: char = '-';
const POINT_CHAR: char = 'o';

/// Narrowest plot area worth drawing.
const MIN_PLOT_COLUMNS: usize = 10;

pub fn run<W: Write>(
    writer: &mut W,
    args: &PipelineArgs,
    columns: usize,
    config: &Config,
) -> Result<()> {
    let frame = load_frame(args, (None, None), config)?;
    write!(writer, "{}", render_chart(&frame, columns)?)?;
    Ok(())
}

/// Renders `frame` into at most `columns` characters per line.
///
/// Horizontal positions come from the layout's drawing area, squeezed into
/// the columns left after the labels.
pub fn render_chart(frame: &Frame, columns: usize) -> Result<String> {
    let label_width = frame.max_name_length();
    // label + " |" + plot
    let plot_width = columns.saturating_sub(label_width + 2);
    if plot_width < MIN_PLOT_COLUMNS {
        bail!("{columns} columns is too narrow; names need {label_width}");
    }

    let layout = &frame.layout;
    let to_column = LinearScale {
        domain: layout.x_scale.range,
        range: (0.0, column_as_f64(plot_width - 1)),
    };

    let mut lines = Vec::with_capacity(frame.tracks.len() + 1);
    for track in &frame.tracks {
        let mut row = vec![TRACK_CHAR; plot_width];
        for interaction in &track.interactions {
            let column = plot_column(to_column.scale(layout.order_x(interaction.order)));
            if let Some(cell) = row.get_mut(column) {
                *cell = POINT_CHAR;
            }
        }
        let row: String = row.into_iter().collect();
        lines.push(format!("{:>label_width$} |{row}", track.participant));
    }

    let (first, last) = frame.order_extent;
    let first_label = first.to_string();
    let last_label = last.to_string();
    let gap = plot_width.saturating_sub(first_label.len() + last_label.len());
    lines.push(format!(
        "{:>label_width$}  {first_label}{}{last_label}",
        "",
        " ".repeat(gap)
    ));

    let mut output = lines.join("\n");
    output.push('\n');
    Ok(output)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "terminal widths are small"
)]
const fn column_as_f64(column: usize) -> f64 {
    column as f64
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "scaled positions are within 0..plot width"
)]
fn plot_column(position: f64) -> usize {
    position.round() as usize
}
