//! Options for one draw cycle, with range validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigValidationError;

/// Names of the three row fields an interaction is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub participant_a: String,
    pub participant_b: String,
    pub order: String,
}

/// How participants are assigned to tracks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackStrategy {
    /// Count distinct partners, drop those under the threshold, sort by count.
    #[default]
    CountFilterSort,
    /// Repeatedly take the busiest remaining participant and consume its events.
    GreedyPeel,
}

impl TrackStrategy {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CountFilterSort => "count-filter-sort",
            Self::GreedyPeel => "greedy-peel",
        }
    }
}

impl fmt::Display for TrackStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unrecognized strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown track strategy: {0}")]
pub struct UnknownTrackStrategy(pub String);

impl FromStr for TrackStrategy {
    type Err = UnknownTrackStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "count-filter-sort" => Ok(Self::CountFilterSort),
            "greedy-peel" => Ok(Self::GreedyPeel),
            _ => Err(UnknownTrackStrategy(s.to_string())),
        }
    }
}

/// Everything a draw cycle is configured with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineOptions {
    pub participant_a_column: String,
    pub participant_b_column: String,
    pub order_column: String,

    /// Participants with fewer distinct partners get no track.
    pub minimum_interaction_count: u32,

    /// Prune mirrored edges from the lower-degree side of a pair.
    pub remove_duplicate_interactions: bool,

    /// Largest fraction of the viewport the canvas may occupy.
    pub screen_proportion: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_ratio: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub outer_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outer_height: Option<f64>,

    /// Glyph height over glyph width, used to estimate label width.
    pub font_height_width_ratio: f64,

    pub track_strategy: TrackStrategy,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            participant_a_column: "source".to_string(),
            participant_b_column: "target".to_string(),
            order_column: "order".to_string(),
            minimum_interaction_count: 1,
            remove_duplicate_interactions: false,
            screen_proportion: 0.9,
            x_ratio: None,
            y_ratio: None,
            outer_width: None,
            outer_height: None,
            font_height_width_ratio: 2.0,
            track_strategy: TrackStrategy::CountFilterSort,
        }
    }
}

impl TimelineOptions {
    /// Checks every field against its documented range.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, value) in [
            ("participant_a_column", &self.participant_a_column),
            ("participant_b_column", &self.participant_b_column),
            ("order_column", &self.order_column),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigValidationError::BlankColumn { field });
            }
        }

        if self.minimum_interaction_count < 1 {
            return Err(ConfigValidationError::MinimumInteractionCount {
                value: self.minimum_interaction_count,
            });
        }

        check_ratio("screen_proportion", self.screen_proportion)?;
        if let Some(ratio) = self.x_ratio {
            check_ratio("x_ratio", ratio)?;
        }
        if let Some(ratio) = self.y_ratio {
            check_ratio("y_ratio", ratio)?;
        }

        if let Some(width) = self.outer_width {
            check_positive("outer_width", width)?;
        }
        if let Some(height) = self.outer_height {
            check_positive("outer_height", height)?;
        }
        check_positive("font_height_width_ratio", self.font_height_width_ratio)?;

        Ok(())
    }

    /// The configured column names.
    #[must_use]
    pub fn columns(&self) -> ColumnMap {
        ColumnMap {
            participant_a: self.participant_a_column.clone(),
            participant_b: self.participant_b_column.clone(),
            order: self.order_column.clone(),
        }
    }
}

fn check_ratio(field: &'static str, value: f64) -> Result<(), ConfigValidationError> {
    if value.is_nan() || value <= 0.0 || value > 1.0 {
        return Err(ConfigValidationError::RatioOutOfRange { field, value });
    }
    Ok(())
}

pub(crate) fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigValidationError::NonPositiveDimension { field, value });
    }
    Ok(())
}
