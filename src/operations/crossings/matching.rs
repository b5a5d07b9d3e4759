use tracing::trace;

use super::detect::DetectedCrossing;
use crate::geometry::SegmentRemap;
use crate::topology::{CrossingId, CrossingStore, Strand};

/// Pairing of a newly detected crossing with the crossing it continues.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Continuation {
    /// Index into the detected crossing list.
    pub detected: usize,
    /// Identity of the previous crossing being continued.
    pub previous: CrossingId,
    /// Over strand re-expressed in the new segment pair.
    pub over: Strand,
}

/// Matches detected crossings to the crossings of the previous configuration.
///
/// A detected crossing may continue a previous one only if both of its
/// segments descend (through `remap`) from the previous crossing's segments.
/// Among those candidates, pairs are taken greedily by increasing distance
/// between the old and new intersection points; every previous and every
/// detected crossing is used at most once.
#[must_use]
pub fn continue_crossings(
    previous: &CrossingStore,
    remap: &SegmentRemap,
    detected: &[DetectedCrossing],
) -> Vec<Continuation> {
    let mut candidates: Vec<(f64, usize, CrossingId, Strand)> = Vec::new();

    for (index, hit) in detected.iter().enumerate() {
        let [a, b] = hit.segments;
        for old in previous.iter() {
            let [oa, ob] = old.segments;
            let straight = remap.descends(oa, a) && remap.descends(ob, b);
            let swapped = remap.descends(oa, b) && remap.descends(ob, a);
            if !straight && !swapped {
                continue;
            }
            let over = if remap.descends(old.over_segment(), a) {
                Strand::First
            } else {
                Strand::Second
            };
            let distance = (old.point - hit.point).norm();
            candidates.push((distance, index, old.id, over));
        }
    }

    candidates.sort_by(|x, y| {
        x.0.total_cmp(&y.0)
            .then(x.1.cmp(&y.1))
            .then(x.2.cmp(&y.2))
    });

    let mut taken_detected = vec![false; detected.len()];
    let mut taken_previous: Vec<CrossingId> = Vec::new();
    let mut matches = Vec::new();

    for (distance, index, id, over) in candidates {
        if taken_detected[index] || taken_previous.contains(&id) {
            continue;
        }
        trace!(?id, segments = ?detected[index].segments, distance, "crossing continued");
        taken_detected[index] = true;
        taken_previous.push(id);
        matches.push(Continuation {
            detected: index,
            previous: id,
            over,
        });
    }

    matches.sort_by_key(|m| m.detected);
    matches
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use crate::topology::{Crossing, CrossingSign};

    fn detected(segments: [usize; 2], x: f64, y: f64) -> DetectedCrossing {
        DetectedCrossing {
            segments,
            point: Point2::new(x, y),
            params: [0.5, 0.5],
            first_over_sign: CrossingSign::Positive,
        }
    }

    fn store_with(
        crossings: &[([usize; 2], f64, f64, Strand)],
    ) -> (CrossingStore, Vec<CrossingId>) {
        let mut store = CrossingStore::new();
        let ids = crossings
            .iter()
            .map(|&(segments, x, y, over)| {
                store.add(Crossing {
                    id: CrossingId::default(),
                    segments,
                    point: Point2::new(x, y),
                    params: [0.5, 0.5],
                    over,
                    first_over_sign: CrossingSign::Positive,
                })
            })
            .collect();
        (store, ids)
    }

    #[test]
    fn identity_remap_continues_same_pair() {
        let (store, ids) = store_with(&[([0, 2], 1.0, 1.0, Strand::First)]);
        let fresh = [detected([0, 2], 1.01, 1.0)];
        let found = continue_crossings(&store, &SegmentRemap::Identity, &fresh);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].previous, ids[0]);
        assert_eq!(found[0].over, Strand::First);
    }

    #[test]
    fn different_pair_is_not_continued() {
        let (store, _) = store_with(&[([0, 2], 1.0, 1.0, Strand::Second)]);
        let fresh = [detected([1, 3], 1.0, 1.0)];
        let found = continue_crossings(&store, &SegmentRemap::Identity, &fresh);
        assert!(found.is_empty());
    }

    #[test]
    fn split_segment_keeps_nearest_only() {
        // Segment 0 split in two; both halves now cross segment 2 (shifted to 3).
        let (store, ids) = store_with(&[([0, 2], 1.0, 1.0, Strand::Second)]);
        let remap = SegmentRemap::Inserted { after: 0, old_len: 4 };
        let found = continue_crossings(
            &store,
            &remap,
            &[detected([0, 3], 0.5, 1.0), detected([1, 3], 1.1, 1.0)],
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].detected, 1);
        assert_eq!(found[0].previous, ids[0]);
        assert_eq!(found[0].over, Strand::Second);
    }

    #[test]
    fn order_follows_over_segment_when_pair_flips() {
        // Removing vertex 0 of six merges segments 5 and 0 into new segment 4,
        // so old pair [0, 2] becomes new pair [1, 4] with the roles swapped.
        let (store, _) = store_with(&[([0, 2], 1.0, 1.0, Strand::First)]);
        let remap = SegmentRemap::Removed { index: 0, old_len: 6 };
        let found = continue_crossings(&store, &remap, &[detected([1, 4], 1.0, 1.0)]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].over, Strand::Second);
    }
}
