//! Raw rows to interaction events.
//!
//! Column names are resolved against the headers once, into an [`EventSchema`]
//! of fixed positions. Only the first record is checked for completeness; later
//! records that are too short read the missing field as an empty string.

use crate::error::DataShapeError;
use crate::options::ColumnMap;

/// Tabular input: one header row and the records under it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSet {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

impl RowSet {
    pub fn new(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        Self { headers, records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// One interaction between two participants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionEvent {
    pub participant_a: String,
    pub participant_b: String,
    pub order: u32,
}

impl InteractionEvent {
    pub fn new(
        participant_a: impl Into<String>,
        participant_b: impl Into<String>,
        order: u32,
    ) -> Self {
        Self {
            participant_a: participant_a.into(),
            participant_b: participant_b.into(),
            order,
        }
    }
}

/// Column positions of the three interaction fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSchema {
    participant_a: usize,
    participant_b: usize,
    order: usize,
}

impl EventSchema {
    /// Resolves column names against `rows`, checking them on the first record only.
    pub fn resolve(rows: &RowSet, columns: &ColumnMap) -> Result<Self, DataShapeError> {
        let first = rows.records.first().ok_or(DataShapeError::NoRows)?;

        let position = |name: &str| {
            rows.headers
                .iter()
                .position(|header| header == name)
                .filter(|&idx| idx < first.len())
                .ok_or_else(|| DataShapeError::MissingColumn {
                    column: name.to_string(),
                })
        };

        Ok(Self {
            participant_a: position(&columns.participant_a)?,
            participant_b: position(&columns.participant_b)?,
            order: position(&columns.order)?,
        })
    }

    fn field(record: &[String], idx: usize) -> &str {
        record.get(idx).map_or("", String::as_str)
    }
}

/// Reads every record of `rows` as an interaction event, in input order.
pub fn ingest(
    rows: &RowSet,
    columns: &ColumnMap,
) -> Result<Vec<InteractionEvent>, DataShapeError> {
    let schema = EventSchema::resolve(rows, columns)?;

    let events = rows
        .records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let raw_order = EventSchema::field(record, schema.order);
            let order =
                coerce_order(raw_order).ok_or_else(|| DataShapeError::NonNumericOrder {
                    row: idx + 1,
                    value: raw_order.to_string(),
                })?;
            Ok(InteractionEvent {
                participant_a: EventSchema::field(record, schema.participant_a).to_string(),
                participant_b: EventSchema::field(record, schema.participant_b).to_string(),
                order,
            })
        })
        .collect::<Result<Vec<_>, DataShapeError>>()?;

    tracing::debug!(events = events.len(), "ingested interaction events");
    Ok(events)
}

/// Accepts integers and integral floats such as `"3.0"`.
fn coerce_order(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if let Ok(order) = trimmed.parse::<u32>() {
        return Some(order);
    }
    let value = trimmed.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) {
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "range and integrality checked above"
        )]
        let order = value as u32;
        return Some(order);
    }
    None
}

/// Sorts events by ascending order; equal orders keep their input order.
pub fn sort_by_order(mut events: Vec<InteractionEvent>) -> Vec<InteractionEvent> {
    events.sort_by_key(|event| event.order);
    events
}

/// First and last order of events already sorted by [`sort_by_order`].
pub fn order_extent(events: &[InteractionEvent]) -> Option<(u32, u32)> {
    Some((events.first()?.order, events.last()?.order))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> ColumnMap {
        ColumnMap {
            participant_a: "from".to_string(),
            participant_b: "to".to_string(),
            order: "scene".to_string(),
        }
    }

    fn rows(records: &[&[&str]]) -> RowSet {
        RowSet::new(
            vec!["from".to_string(), "to".to_string(), "scene".to_string()],
            records
                .iter()
                .map(|r| r.iter().map(ToString::to_string).collect())
                .collect(),
        )
    }

    #[test]
    fn ingest_reads_configured_columns() {
        let events = ingest(&rows(&[&["Ann", "Bo", "2"], &["Bo", "Cy", "1"]]), &columns()).unwrap();
        assert_eq!(
            events,
            vec![
                InteractionEvent::new("Ann", "Bo", 2),
                InteractionEvent::new("Bo", "Cy", 1),
            ]
        );
    }

    #[test]
    fn ingest_resolves_columns_by_name_not_position() {
        let rows = RowSet::new(
            vec!["scene".to_string(), "note".to_string(), "to".to_string(), "from".to_string()],
            vec![vec!["7".to_string(), "x".to_string(), "Bo".to_string(), "Ann".to_string()]],
        );
        let events = ingest(&rows, &columns()).unwrap();
        assert_eq!(events, vec![InteractionEvent::new("Ann", "Bo", 7)]);
    }

    #[test]
    fn ingest_rejects_empty_rows() {
        assert_eq!(ingest(&rows(&[]), &columns()), Err(DataShapeError::NoRows));
    }

    #[test]
    fn ingest_rejects_missing_header() {
        let rows = RowSet::new(
            vec!["from".to_string(), "to".to_string()],
            vec![vec!["Ann".to_string(), "Bo".to_string()]],
        );
        assert_eq!(
            ingest(&rows, &columns()),
            Err(DataShapeError::MissingColumn {
                column: "scene".to_string()
            })
        );
    }

    #[test]
    fn ingest_checks_only_the_first_record() {
        // The first record is too short: rejected.
        let short_first = rows(&[&["Ann", "Bo"], &["Bo", "Cy", "2"]]);
        assert!(matches!(
            ingest(&short_first, &columns()),
            Err(DataShapeError::MissingColumn { .. })
        ));

        // A later short record is not checked; its missing participant is empty.
        let short_later = RowSet::new(
            vec!["scene".to_string(), "from".to_string(), "to".to_string()],
            vec![
                vec!["1".to_string(), "Ann".to_string(), "Bo".to_string()],
                vec!["2".to_string(), "Dee".to_string()],
            ],
        );
        let events = ingest(&short_later, &columns()).unwrap();
        assert_eq!(events[1], InteractionEvent::new("Dee", "", 2));
    }

    #[test]
    fn ingest_coerces_integral_floats() {
        let events = ingest(&rows(&[&["Ann", "Bo", " 3.0 "]]), &columns()).unwrap();
        assert_eq!(events[0].order, 3);
    }

    #[test]
    fn ingest_reports_non_numeric_order() {
        let result = ingest(&rows(&[&["Ann", "Bo", "1"], &["Bo", "Cy", "later"]]), &columns());
        assert_eq!(
            result,
            Err(DataShapeError::NonNumericOrder {
                row: 2,
                value: "later".to_string()
            })
        );

        let result = ingest(&rows(&[&["Ann", "Bo", "1.5"]]), &columns());
        assert!(matches!(result, Err(DataShapeError::NonNumericOrder { row: 1, .. })));
    }

    #[test]
    fn sort_is_stable_for_equal_orders() {
        let sorted = sort_by_order(vec![
            InteractionEvent::new("C", "D", 2),
            InteractionEvent::new("A", "B", 1),
            InteractionEvent::new("E", "F", 2),
            InteractionEvent::new("G", "H", 1),
        ]);
        let pairs: Vec<_> = sorted
            .iter()
            .map(|e| (e.participant_a.as_str(), e.order))
            .collect();
        assert_eq!(pairs, vec![("A", 1), ("G", 1), ("C", 2), ("E", 2)]);
    }

    #[test]
    fn order_extent_of_sorted_events() {
        let sorted = sort_by_order(vec![
            InteractionEvent::new("A", "B", 4),
            InteractionEvent::new("A", "C", 1),
            InteractionEvent::new("B", "C", 9),
        ]);
        assert_eq!(order_extent(&sorted), Some((1, 9)));
        assert_eq!(order_extent(&[]), None);
    }
}
