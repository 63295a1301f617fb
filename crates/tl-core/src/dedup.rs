//! Mirrored-edge pruning.

use crate::track::ParticipantRecords;

/// Removes each partner edge held by the side of a pair with fewer partners.
///
/// Participants and their partners are visited in first-seen order, and each
/// comparison reads the counts as they stand after earlier removals. The result
/// therefore depends on that order, which [`ParticipantRecords`] keeps stable.
pub fn resolve_duplicates(records: &mut ParticipantRecords) {
    let mut removed = 0_usize;

    for idx in 0..records.len() {
        let partners: Vec<String> = records[idx].partners.keys().cloned().collect();

        for partner in partners {
            let Some(partner_count) = records.get(&partner).map(|r| r.interaction_count) else {
                continue;
            };
            let Some((_, record)) = records.get_index_mut(idx) else {
                continue;
            };
            if record.interaction_count < partner_count {
                record.partners.shift_remove(&partner);
                record.interaction_count -= 1;
                removed += 1;
            }
        }
    }

    tracing::debug!(removed, "resolved duplicate interactions");
}
