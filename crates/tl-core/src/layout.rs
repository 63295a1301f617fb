//! Geometry for drawing tracks.
//!
//! [`compute_settings`] is a pure function of its arguments. It validates the
//! options and guards every division so that no non-finite value reaches the
//! renderer.

use serde::{Deserialize, Serialize};

use crate::error::{DegenerateLayoutError, TimelineError};
use crate::options::{TimelineOptions, check_positive};

/// Horizontal pixels per order step when no ratio is configured.
const NATURAL_ORDER_SPACING: f64 = 20.0;

/// Vertical pixels per track when no ratio is configured.
const NATURAL_TRACK_SPACING: f64 = 30.0;

/// Radius heuristics: at most one point per five radii horizontally, and
/// one track per eight radii vertically.
const ORDER_DENSITY: f64 = 5.0;
const TRACK_DENSITY: f64 = 8.0;

const LABEL_HEIGHT_PER_RADIUS: f64 = 1.5;

/// Size of the area the canvas is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Linear map from a data domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    /// Maps `value` from the domain into the range.
    #[must_use]
    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    /// Two radii of padding on every side, the label column on the left and
    /// the axis label below.
    fn around(radius: f64, max_name_length: usize, options: &TimelineOptions) -> Self {
        let (label_width, label_height) = label_size(radius, max_name_length, options);
        let padding = 2.0 * radius;
        Self {
            top: padding,
            right: padding,
            bottom: padding + 2.0 * label_height,
            left: padding + label_width + padding,
        }
    }
}

/// Concrete geometry for one draw cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    pub x_ratio: f64,
    pub y_ratio: f64,
    pub outer_width: f64,
    pub outer_height: f64,
    /// Point radius; also the track stroke width.
    pub radius: f64,
    pub stroke_width: f64,
    pub label_height: f64,
    pub label_width: f64,
    pub margins: Margins,
    pub inner_width: f64,
    pub inner_height: f64,
    /// Order to horizontal offset inside the margins.
    pub x_scale: LinearScale,
    /// Track slot to vertical offset inside the margins.
    pub y_scale: LinearScale,
}

impl LayoutSettings {
    /// Vertical center of the track at `index`.
    #[must_use]
    pub fn track_y(&self, index: usize) -> f64 {
        self.y_scale.scale(count_as_f64(index) + 0.5)
    }

    /// Horizontal position of `order`.
    #[must_use]
    pub fn order_x(&self, order: u32) -> f64 {
        self.x_scale.scale(f64::from(order))
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "track counts and name lengths are far below 2^52"
)]
const fn count_as_f64(count: usize) -> f64 {
    count as f64
}

/// Natural size over available size, never above `proportion`.
fn fit_ratio(natural: f64, available: f64, proportion: f64) -> f64 {
    (natural / available).min(proportion)
}

/// Label width and height for a radius.
fn label_size(radius: f64, max_name_length: usize, options: &TimelineOptions) -> (f64, f64) {
    let height = radius * LABEL_HEIGHT_PER_RADIUS;
    let width = height * count_as_f64(max_name_length) / options.font_height_width_ratio;
    (width, height)
}

fn has_area(width: f64, height: f64) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}

/// Derives layout settings from track/order extents and the viewport.
///
/// # Steps
///
/// 1. Fit ratios: explicit ratios scaled by the screen proportion, otherwise
///    natural size over viewport size, capped at the screen proportion. The
///    natural width covers the order span plus the label and padding margins
///    at the largest radius the canvas height allows
/// 2. Outer size: explicit override, else viewport times ratio
/// 3. Radius: the tighter of the horizontal and vertical density limits
/// 4. Label size from radius and the longest name
/// 5. Margins around the drawing area, wider on the left for labels
pub fn compute_settings(
    track_count: usize,
    order_extent: (u32, u32),
    max_name_length: usize,
    viewport: Viewport,
    options: &TimelineOptions,
) -> Result<LayoutSettings, TimelineError> {
    options.validate()?;
    check_positive("viewport width", viewport.width)?;
    check_positive("viewport height", viewport.height)?;

    if track_count == 0 {
        return Err(DegenerateLayoutError::ZeroTrackCount.into());
    }
    let (first_order, last_order) = order_extent;
    let order_span = last_order.saturating_sub(first_order);
    if order_span == 0 {
        return Err(DegenerateLayoutError::ZeroOrderSpan.into());
    }
    let order_span = f64::from(order_span);
    let tracks = count_as_f64(track_count);
    let proportion = options.screen_proportion;

    let y_ratio = options.y_ratio.map_or_else(
        || fit_ratio(tracks * NATURAL_TRACK_SPACING, viewport.height, proportion),
        |ratio| ratio * proportion,
    );
    let outer_height = options.outer_height.unwrap_or(viewport.height * y_ratio);

    // Upper bound on the final radius.
    let vertical_radius = (outer_height / (tracks * TRACK_DENSITY)).round().max(1.0);

    let x_ratio = options.x_ratio.map_or_else(
        || {
            let widest = Margins::around(vertical_radius, max_name_length, options);
            let natural = order_span * NATURAL_ORDER_SPACING + widest.left + widest.right;
            fit_ratio(natural, viewport.width, proportion)
        },
        |ratio| ratio * proportion,
    );
    let outer_width = options.outer_width.unwrap_or(viewport.width * x_ratio);

    let radius = (outer_width / (order_span * ORDER_DENSITY))
        .round()
        .min(vertical_radius)
        .max(1.0);

    let (label_width, label_height) = label_size(radius, max_name_length, options);
    let margins = Margins::around(radius, max_name_length, options);

    let inner_width = outer_width - margins.left - margins.right;
    let inner_height = outer_height - margins.top - margins.bottom;
    if !has_area(inner_width, inner_height) {
        return Err(DegenerateLayoutError::NoDrawingArea {
            width: inner_width,
            height: inner_height,
        }
        .into());
    }

    tracing::debug!(
        outer_width,
        outer_height,
        radius,
        inner_width,
        inner_height,
        "computed layout"
    );

    Ok(LayoutSettings {
        x_ratio,
        y_ratio,
        outer_width,
        outer_height,
        radius,
        stroke_width: radius,
        label_height,
        label_width,
        margins,
        inner_width,
        inner_height,
        x_scale: LinearScale {
            domain: (f64::from(first_order), f64::from(last_order)),
            range: (0.0, inner_width),
        },
        y_scale: LinearScale {
            domain: (0.0, tracks),
            range: (0.0, inner_height),
        },
    })
}

#[cfg(test)]
#[expect(
    clippy::float_cmp,
    reason = "inputs are chosen so every value is exact"
)]
mod tests {
    use super::*;
    use crate::error::ConfigValidationError;

    fn viewport() -> Viewport {
        Viewport::new(1000.0, 800.0)
    }

    #[test]
    fn derives_geometry_from_natural_size() {
        let settings =
            compute_settings(4, (1, 41), 6, viewport(), &TimelineOptions::default()).unwrap();

        // 40 steps of 20 plus 42 of margins at radius 4.
        assert_eq!(settings.x_ratio, 0.842);
        assert_eq!(settings.y_ratio, 0.15);
        assert_eq!(settings.outer_width, 842.0);
        assert_eq!(settings.outer_height, 120.0);
        assert_eq!(settings.radius, 4.0);
        assert_eq!(settings.stroke_width, 4.0);
        assert_eq!(settings.label_height, 6.0);
        assert_eq!(settings.label_width, 18.0);
        assert_eq!(
            settings.margins,
            Margins {
                top: 8.0,
                right: 8.0,
                bottom: 20.0,
                left: 34.0,
            }
        );
        assert_eq!(settings.inner_width, 800.0);
        assert_eq!(settings.inner_height, 92.0);
        assert_eq!(settings.order_x(1), 0.0);
        assert_eq!(settings.order_x(41), 800.0);
        assert_eq!(settings.track_y(0), 11.5);
        assert_eq!(settings.track_y(3), 80.5);
    }

    #[test]
    fn derived_ratio_never_exceeds_screen_proportion() {
        let settings =
            compute_settings(100, (1, 101), 4, viewport(), &TimelineOptions::default()).unwrap();
        assert_eq!(settings.x_ratio, 0.9);
        assert_eq!(settings.y_ratio, 0.9);
        assert_eq!(settings.outer_width, 900.0);
        assert_eq!(settings.outer_height, 720.0);
    }

    #[test]
    fn derived_width_leaves_room_for_long_names() {
        let viewport = Viewport::new(1920.0, 1080.0);
        for max_name_length in [1, 11, 40] {
            let settings = compute_settings(
                3,
                (1, 2),
                max_name_length,
                viewport,
                &TimelineOptions::default(),
            )
            .unwrap();
            assert_eq!(settings.radius, 4.0);
            assert!(settings.inner_width >= NATURAL_ORDER_SPACING - 1e-9);
            assert!(settings.outer_width <= 1920.0 * 0.9);
        }
    }

    #[test]
    fn explicit_ratios_scale_by_screen_proportion() {
        let options = TimelineOptions {
            x_ratio: Some(0.5),
            y_ratio: Some(1.0),
            screen_proportion: 0.5,
            ..Default::default()
        };
        let settings = compute_settings(2, (1, 11), 3, viewport(), &options).unwrap();
        assert_eq!(settings.x_ratio, 0.25);
        assert_eq!(settings.y_ratio, 0.5);
        assert_eq!(settings.outer_width, 250.0);
        assert_eq!(settings.outer_height, 400.0);
    }

    #[test]
    fn outer_overrides_bypass_ratios() {
        let options = TimelineOptions {
            outer_width: Some(640.0),
            outer_height: Some(480.0),
            ..Default::default()
        };
        let settings = compute_settings(3, (1, 9), 5, viewport(), &options).unwrap();
        assert_eq!(settings.outer_width, 640.0);
        assert_eq!(settings.outer_height, 480.0);
        // min(round(640 / 40), round(480 / 24)) = min(16, 20)
        assert_eq!(settings.radius, 16.0);
    }

    #[test]
    fn radius_shrinks_with_denser_tracks() {
        let options = TimelineOptions {
            outer_width: Some(1000.0),
            outer_height: Some(400.0),
            ..Default::default()
        };
        let sparse = compute_settings(2, (1, 11), 2, viewport(), &options).unwrap();
        let dense = compute_settings(10, (1, 11), 2, viewport(), &options).unwrap();
        assert_eq!(sparse.radius, 20.0);
        assert_eq!(dense.radius, 5.0);
    }

    #[test]
    fn zero_track_count_is_degenerate() {
        let result = compute_settings(0, (1, 10), 3, viewport(), &TimelineOptions::default());
        assert_eq!(
            result,
            Err(TimelineError::DegenerateLayout(
                DegenerateLayoutError::ZeroTrackCount
            ))
        );
    }

    #[test]
    fn zero_order_span_is_degenerate() {
        let result = compute_settings(3, (5, 5), 3, viewport(), &TimelineOptions::default());
        assert_eq!(
            result,
            Err(TimelineError::DegenerateLayout(
                DegenerateLayoutError::ZeroOrderSpan
            ))
        );
    }

    #[test]
    fn oversized_labels_leave_no_drawing_area() {
        let options = TimelineOptions {
            outer_width: Some(100.0),
            outer_height: Some(100.0),
            ..Default::default()
        };
        let result = compute_settings(1, (1, 2), 200, viewport(), &options);
        assert!(matches!(
            result,
            Err(TimelineError::DegenerateLayout(
                DegenerateLayoutError::NoDrawingArea { .. }
            ))
        ));
    }

    #[test]
    fn rejects_empty_viewport() {
        let result = compute_settings(
            2,
            (1, 5),
            3,
            Viewport::new(0.0, 600.0),
            &TimelineOptions::default(),
        );
        assert!(matches!(
            result,
            Err(TimelineError::ConfigValidation(
                ConfigValidationError::NonPositiveDimension { .. }
            ))
        ));
    }

    #[test]
    fn invalid_options_are_rejected_before_any_geometry() {
        let options = TimelineOptions {
            outer_width: Some(f64::NAN),
            ..Default::default()
        };
        let result = compute_settings(3, (1, 10), 4, viewport(), &options);
        assert!(matches!(
            result,
            Err(TimelineError::ConfigValidation(
                ConfigValidationError::NonPositiveDimension {
                    field: "outer_width",
                    ..
                }
            ))
        ));

        let options = TimelineOptions {
            screen_proportion: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            compute_settings(3, (1, 10), 4, viewport(), &options),
            Err(TimelineError::ConfigValidation(
                ConfigValidationError::RatioOutOfRange { .. }
            ))
        ));
    }

    #[test]
    fn every_value_is_finite() {
        let settings =
            compute_settings(7, (3, 40), 40, viewport(), &TimelineOptions::default()).unwrap();
        let json = serde_json::to_value(&settings).unwrap();
        assert!(json["radius"].as_f64().unwrap().is_finite());
        for value in [
            settings.outer_width,
            settings.outer_height,
            settings.radius,
            settings.label_width,
            settings.inner_width,
            settings.inner_height,
            settings.track_y(6),
            settings.order_x(4),
        ] {
            assert!(value.is_finite());
        }
    }
}
