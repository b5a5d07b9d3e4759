mod detect;
mod matching;

pub use detect::{find_all, Degeneracy, DetectedCrossing, Detection};
pub use matching::{continue_crossings, Continuation};

use tracing::{debug, debug_span, warn};

use crate::config::{DegeneracyPolicy, DiagramConfig};
use crate::error::{GeometryError, Result};
use crate::geometry::{Polyline, SegmentRemap};
use crate::topology::{Crossing, CrossingId, CrossingStore, Strand};

/// Maintains the crossing set of a polyline across edits.
///
/// # Algorithm
///
/// 1. **Detect**: test every pair of non-adjacent segments for a transversal
///    crossing (`O(n²)` pair tests).
/// 2. **Continue**: pair each detected crossing with the previous crossing it
///    descends from, following the segment lineage of the edit.
/// 3. **Commit**: continued crossings keep identity and over/under order;
///    new ones get fresh identities with the lower segment under; crossings
///    that vanished are dropped together with any toggle.
#[derive(Debug, Clone, Default)]
pub struct CrossingEngine {
    config: DiagramConfig,
    store: CrossingStore,
    degeneracies: Vec<Degeneracy>,
}

impl CrossingEngine {
    /// Creates an engine with no crossings.
    #[must_use]
    pub fn new(config: DiagramConfig) -> Self {
        Self {
            config,
            store: CrossingStore::new(),
            degeneracies: Vec::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &CrossingStore {
        &self.store
    }

    #[must_use]
    pub fn degeneracies(&self) -> &[Degeneracy] {
        &self.degeneracies
    }

    /// Runs a detection pass and applies the degeneracy policy.
    ///
    /// Does not touch the current crossing set.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for the first degenerate segment
    /// pair when the policy is [`DegeneracyPolicy::Reject`].
    pub fn detect(&self, polyline: &Polyline) -> Result<Detection> {
        let detection = find_all(polyline, self.config.epsilon);
        if let Some(d) = detection.degeneracies.first() {
            if self.config.degeneracy == DegeneracyPolicy::Reject {
                return Err(GeometryError::Degenerate {
                    first: d.segments[0],
                    second: d.segments[1],
                    kind: d.kind,
                }
                .into());
            }
        }
        Ok(detection)
    }

    /// Replaces the crossing set with `detection`, preserving identities of
    /// crossings that continue across the edit described by `remap`.
    pub fn commit(&mut self, detection: Detection, remap: &SegmentRemap) {
        let _span = debug_span!("commit_crossings", detected = detection.crossings.len()).entered();

        let continued = continue_crossings(&self.store, remap, &detection.crossings);

        let mut kept: Vec<Option<(CrossingId, Strand)>> = vec![None; detection.crossings.len()];
        for c in &continued {
            kept[c.detected] = Some((c.previous, c.over));
        }

        let stale: Vec<CrossingId> = self
            .store
            .iter()
            .map(|c| c.id)
            .filter(|id| !continued.iter().any(|c| c.previous == *id))
            .collect();
        for id in &stale {
            self.store.remove(*id);
        }

        let mut fresh = 0usize;
        for (hit, prior) in detection.crossings.into_iter().zip(kept) {
            match prior {
                Some((id, over)) => {
                    if let Ok(c) = self.store.get_mut(id) {
                        c.segments = hit.segments;
                        c.point = hit.point;
                        c.params = hit.params;
                        c.over = over;
                        c.first_over_sign = hit.first_over_sign;
                    }
                }
                None => {
                    fresh += 1;
                    self.store.add(Crossing {
                        id: CrossingId::default(),
                        segments: hit.segments,
                        point: hit.point,
                        params: hit.params,
                        over: Strand::Second,
                        first_over_sign: hit.first_over_sign,
                    });
                }
            }
        }

        for d in &detection.degeneracies {
            warn!(segments = ?d.segments, kind = ?d.kind, "degenerate contact skipped");
        }
        self.degeneracies = detection.degeneracies;

        debug!(
            continued = continued.len(),
            fresh,
            dropped = stale.len(),
            "crossings recomputed"
        );
    }

    /// Detects and commits in one step.
    ///
    /// # Errors
    ///
    /// See [`CrossingEngine::detect`]; the crossing set is unchanged on error.
    pub fn recompute(&mut self, polyline: &Polyline, remap: &SegmentRemap) -> Result<()> {
        let detection = self.detect(polyline)?;
        self.commit(detection, remap);
        Ok(())
    }

    /// Swaps the over/under order of a crossing.
    ///
    /// # Errors
    ///
    /// Returns `DiagramError::UnknownCrossing` if the crossing does not exist.
    pub fn toggle(&mut self, id: CrossingId) -> Result<()> {
        self.store.get_mut(id)?.toggle();
        Ok(())
    }
}
