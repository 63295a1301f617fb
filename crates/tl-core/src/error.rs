//! Error taxonomy for a draw cycle.
//!
//! Every failure aborts the current cycle; nothing is retried here.

use thiserror::Error;

/// A configured value outside its documented range.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// A column name was empty or whitespace-only.
    #[error("{field} cannot be blank")]
    BlankColumn { field: &'static str },

    /// The interaction threshold must be at least 1.
    #[error("minimum_interaction_count must be at least 1, got {value}")]
    MinimumInteractionCount { value: u32 },

    /// A proportion was outside (0, 1].
    #[error("{field} must be in (0, 1], got {value}")]
    RatioOutOfRange { field: &'static str, value: f64 },

    /// A size was zero, negative, or not finite.
    #[error("{field} must be a positive finite number, got {value}")]
    NonPositiveDimension { field: &'static str, value: f64 },
}

/// Raw rows that cannot be turned into interaction events.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataShapeError {
    /// The row set has no records.
    #[error("no rows to read interactions from")]
    NoRows,

    /// A configured column is absent from the first row.
    #[error("first row is missing column {column:?}")]
    MissingColumn { column: String },

    /// An order value could not be coerced to an integer.
    #[error("row {row}: order value {value:?} is not an integer")]
    NonNumericOrder { row: usize, value: String },
}

/// No participant met the interaction threshold.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no participant has at least {minimum} distinct partners")]
pub struct EmptyResultError {
    pub minimum: u32,
}

/// Inputs that would produce non-finite geometry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DegenerateLayoutError {
    /// First and last order are equal.
    #[error("order span is zero")]
    ZeroOrderSpan,

    /// There are no tracks to stack.
    #[error("track count is zero")]
    ZeroTrackCount,

    /// Margins consume the whole canvas.
    #[error("margins leave no drawing area ({width} x {height})")]
    NoDrawingArea { width: f64, height: f64 },
}

/// Any failure of the pipeline.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TimelineError {
    #[error("invalid configuration: {0}")]
    ConfigValidation(#[from] ConfigValidationError),

    #[error("malformed input: {0}")]
    DataShape(#[from] DataShapeError),

    #[error(transparent)]
    EmptyResult(#[from] EmptyResultError),

    #[error("cannot lay out timeline: {0}")]
    DegenerateLayout(#[from] DegenerateLayoutError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = DataShapeError::NonNumericOrder {
            row: 3,
            value: "soon".to_string(),
        };
        assert_eq!(err.to_string(), "row 3: order value \"soon\" is not an integer");

        let err = ConfigValidationError::RatioOutOfRange {
            field: "screen_proportion",
            value: 1.5,
        };
        assert_eq!(
            err.to_string(),
            "screen_proportion must be in (0, 1], got 1.5"
        );
    }

    #[test]
    fn empty_result_is_transparent() {
        let err = TimelineError::from(EmptyResultError { minimum: 4 });
        assert_eq!(
            err.to_string(),
            "no participant has at least 4 distinct partners"
        );
    }

    #[test]
    fn detail_errors_convert_into_timeline_error() {
        let err: TimelineError = DegenerateLayoutError::ZeroTrackCount.into();
        assert!(matches!(
            err,
            TimelineError::DegenerateLayout(DegenerateLayoutError::ZeroTrackCount)
        ));
    }
}
