//! Track construction.
//!
//! # Algorithm Summary
//!
//! 1. Record every event in both directions, counting distinct partners
//! 2. Optionally prune mirrored edges from the weaker side ([`resolve_duplicates`])
//! 3. Drop participants under the threshold
//! 4. Emit one track per survivor, busiest first
//!
//! Every map here preserves first-seen order, so the output is reproducible
//! for identical input.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dedup::resolve_duplicates;
use crate::error::EmptyResultError;
use crate::event::InteractionEvent;

/// Per-participant state during construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantRecord {
    /// Number of distinct partners.
    pub interaction_count: usize,

    /// Partner name to the order it was last seen at.
    pub partners: IndexMap<String, u32>,
}

impl ParticipantRecord {
    /// Records `partner` at `order`. A repeat partner overwrites its order
    /// and is not counted again.
    pub fn add_partner(&mut self, partner: &str, order: u32) {
        if self.partners.insert(partner.to_string(), order).is_none() {
            self.interaction_count += 1;
        }
    }

    fn to_track(&self, participant: &str) -> Track {
        Track {
            participant: participant.to_string(),
            interactions: self
                .partners
                .iter()
                .map(|(partner, &order)| Interaction {
                    partner: partner.clone(),
                    order,
                })
                .collect(),
        }
    }
}

/// Records keyed by participant, in first-seen order.
pub type ParticipantRecords = IndexMap<String, ParticipantRecord>;

/// One point on a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub partner: String,
    pub order: u32,
}

/// One participant's timeline of interactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub participant: String,
    pub interactions: Vec<Interaction>,
}

/// Groups events into participant records, both directions per event.
pub fn record_interactions<'a>(
    events: impl IntoIterator<Item = &'a InteractionEvent>,
) -> ParticipantRecords {
    let mut records = ParticipantRecords::new();
    for event in events {
        records
            .entry(event.participant_a.clone())
            .or_default()
            .add_partner(&event.participant_b, event.order);
        records
            .entry(event.participant_b.clone())
            .or_default()
            .add_partner(&event.participant_a, event.order);
    }
    records
}

/// Builds tracks by counting, filtering, then sorting by interaction count.
///
/// Ties keep first-seen participant order.
pub fn build(
    events: &[InteractionEvent],
    minimum_interaction_count: u32,
    remove_duplicates: bool,
) -> Result<Vec<Track>, EmptyResultError> {
    let mut records = record_interactions(events);
    tracing::debug!(participants = records.len(), "grouped interactions");

    if remove_duplicates {
        resolve_duplicates(&mut records);
    }

    let minimum = minimum_interaction_count as usize;
    let mut tracks: Vec<Track> = records
        .iter()
        .filter(|(_, record)| record.interaction_count >= minimum)
        .map(|(participant, record)| record.to_track(participant))
        .collect();

    // Stable: equal counts stay in first-seen order.
    tracks.sort_by(|a, b| b.interactions.len().cmp(&a.interactions.len()));

    finish(tracks, minimum_interaction_count)
}

/// Builds tracks one at a time, each from the busiest remaining participant.
///
/// The chosen participant's events are consumed, so later tracks only see
/// interactions among the participants left over. Stops when the busiest
/// remaining participant falls under the threshold.
pub fn build_greedy(
    events: &[InteractionEvent],
    minimum_interaction_count: u32,
) -> Result<Vec<Track>, EmptyResultError> {
    let minimum = minimum_interaction_count as usize;
    let mut remaining: Vec<&InteractionEvent> = events.iter().collect();
    let mut tracks = Vec::new();

    while !remaining.is_empty() {
        let records = record_interactions(remaining.iter().copied());
        // First seen wins ties.
        let busiest = records.iter().fold(
            None::<(&String, &ParticipantRecord)>,
            |best, (name, candidate)| match best {
                Some((_, record)) if record.interaction_count >= candidate.interaction_count => {
                    best
                }
                _ => Some((name, candidate)),
            },
        );
        let Some((participant, record)) = busiest else {
            break;
        };
        if record.interaction_count < minimum {
            break;
        }

        tracks.push(record.to_track(participant));
        remaining.retain(|event| {
            event.participant_a != *participant && event.participant_b != *participant
        });
    }

    finish(tracks, minimum_interaction_count)
}

fn finish(tracks: Vec<Track>, minimum: u32) -> Result<Vec<Track>, EmptyResultError> {
    if tracks.is_empty() {
        tracing::warn!(minimum, "no participant met the interaction threshold");
        return Err(EmptyResultError { minimum });
    }
    tracing::debug!(tracks = tracks.len(), "built tracks");
    Ok(tracks)
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::*;

    fn ev(a: &str, b: &str, order: u32) -> InteractionEvent {
        InteractionEvent::new(a, b, order)
    }

    fn sample_events() -> Vec<InteractionEvent> {
        vec![
            ev("P1", "P2", 1),
            ev("P1", "P3", 2),
            ev("P1", "P4", 3),
            ev("P2", "P3", 3),
        ]
    }

    fn names(tracks: &[Track]) -> Vec<&str> {
        tracks.iter().map(|t| t.participant.as_str()).collect()
    }

    fn interaction(partner: &str, order: u32) -> Interaction {
        Interaction {
            partner: partner.to_string(),
            order,
        }
    }

    #[test]
    fn threshold_keeps_only_busiest_participant() {
        let tracks = build(&sample_events(), 3, false).unwrap();
        assert_eq!(
            tracks,
            vec![Track {
                participant: "P1".to_string(),
                interactions: vec![
                    interaction("P2", 1),
                    interaction("P3", 2),
                    interaction("P4", 3),
                ],
            }]
        );
    }

    #[test]
    fn tracks_sorted_by_count_with_first_seen_ties() {
        let tracks = build(&sample_events(), 1, false).unwrap();
        assert_eq!(names(&tracks), vec!["P1", "P2", "P3", "P4"]);
        assert_eq!(
            tracks[1].interactions,
            vec![interaction("P1", 1), interaction("P3", 3)]
        );
        assert_eq!(tracks[3].interactions, vec![interaction("P1", 3)]);
    }

    #[test]
    fn repeated_pair_keeps_last_order_and_counts_once() {
        let events = vec![ev("A", "B", 1), ev("A", "C", 2), ev("B", "A", 3)];
        let records = record_interactions(&events);

        let a = &records["A"];
        assert_eq!(a.interaction_count, 2);
        assert_eq!(
            a.partners.iter().map(|(p, &o)| (p.as_str(), o)).collect::<Vec<_>>(),
            vec![("B", 3), ("C", 2)]
        );
        assert_eq!(records["B"].interaction_count, 1);
        assert_eq!(records["B"].partners["A"], 3);
    }

    #[test]
    fn no_qualifying_participant_is_an_error() {
        let result = build(&sample_events(), 4, false);
        assert_eq!(result, Err(EmptyResultError { minimum: 4 }));
        assert_eq!(build(&[], 1, false), Err(EmptyResultError { minimum: 1 }));
    }

    #[test]
    fn duplicate_removal_prunes_weaker_side() {
        let events = vec![
            ev("X", "Y", 1),
            ev("X", "a", 2),
            ev("X", "b", 3),
            ev("X", "c", 4),
            ev("X", "d", 5),
            ev("Y", "e", 6),
        ];

        let tracks = build(&events, 1, true).unwrap();
        assert_eq!(names(&tracks), vec!["X", "Y", "e"]);
        assert_eq!(tracks[0].interactions.len(), 5);
        assert!(tracks[0].interactions.iter().any(|i| i.partner == "Y"));
        assert_eq!(tracks[1].interactions, vec![interaction("e", 6)]);

        let kept = build(&events, 1, false).unwrap();
        assert_eq!(names(&kept), vec!["X", "Y", "a", "b", "c", "d", "e"]);
    }

    #[test]
    fn output_respects_general_properties() {
        let events = vec![
            ev("Ann", "Bo", 1),
            ev("Cy", "Ann", 2),
            ev("Bo", "Cy", 3),
            ev("Dee", "Ann", 4),
            ev("Ann", "Bo", 5),
            ev("Eve", "Dee", 6),
            ev("Bo", "Eve", 7),
        ];
        let inputs: HashSet<&str> = events
            .iter()
            .flat_map(|e| [e.participant_a.as_str(), e.participant_b.as_str()])
            .collect();

        let mut degree: HashMap<&str, HashSet<&str>> = HashMap::new();
        for e in &events {
            degree.entry(&e.participant_a).or_default().insert(&e.participant_b);
            degree.entry(&e.participant_b).or_default().insert(&e.participant_a);
        }

        for minimum in 1..=3 {
            let tracks = build(&events, minimum, false).unwrap();
            for track in &tracks {
                assert!(inputs.contains(track.participant.as_str()));
                assert!(track.interactions.len() >= minimum as usize);
                assert_eq!(
                    track.interactions.len(),
                    degree[track.participant.as_str()].len()
                );
                let partners: HashSet<_> =
                    track.interactions.iter().map(|i| &i.partner).collect();
                assert_eq!(partners.len(), track.interactions.len());
            }
            assert_eq!(tracks, build(&events, minimum, false).unwrap());
        }

        let pruned = build(&events, 1, true).unwrap();
        assert_eq!(pruned, build(&events, 1, true).unwrap());
        for track in &pruned {
            assert!(track.interactions.len() <= degree[track.participant.as_str()].len());
        }
    }

    #[test]
    fn greedy_consumes_events_of_each_track() {
        let tracks = build_greedy(&sample_events(), 1).unwrap();
        // P1 takes every event it is part of; only P2-P3 remains.
        assert_eq!(names(&tracks), vec!["P1", "P2"]);
        assert_eq!(tracks[1].interactions, vec![interaction("P3", 3)]);
    }

    #[test]
    fn greedy_stops_under_threshold() {
        let tracks = build_greedy(&sample_events(), 2).unwrap();
        assert_eq!(names(&tracks), vec!["P1"]);
        assert_eq!(
            build_greedy(&sample_events(), 4),
            Err(EmptyResultError { minimum: 4 })
        );
    }
}
