use std::fmt;

use crate::geometry::Polyline;
use crate::topology::{CrossingId, CrossingSign, CrossingStore, Strand};

/// Whether a traversal passes over or under at a crossing visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Passage {
    Over,
    Under,
}

/// One crossing visit in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GaussToken {
    /// Crossing label, `1..=k`, numbered by first visit.
    pub label: usize,
    pub passage: Passage,
}

/// Traversal-ordered crossing code of a diagram.
///
/// Labels depend only on geometry and over/under order, never on crossing
/// identities, so equal diagrams produce equal codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GaussCode {
    tokens: Vec<GaussToken>,
    signs: Vec<CrossingSign>,
}

impl GaussCode {
    /// Visits in traversal order; twice the crossing count.
    #[must_use]
    pub fn tokens(&self) -> &[GaussToken] {
        &self.tokens
    }

    /// Handedness of each crossing, indexed by `label - 1`.
    #[must_use]
    pub fn signs(&self) -> &[CrossingSign] {
        &self.signs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Integer form: `+label` for an over passage, `-label` for under.
    #[must_use]
    pub fn to_signed(&self) -> Vec<i64> {
        self.tokens
            .iter()
            .map(|t| {
                #[allow(clippy::cast_possible_wrap)]
                let label = t.label as i64;
                match t.passage {
                    Passage::Over => label,
                    Passage::Under => -label,
                }
            })
            .collect()
    }
}

impl fmt::Display for GaussCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, t) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            let tag = match t.passage {
                Passage::Over => 'O',
                Passage::Under => 'U',
            };
            write!(f, "{tag}{}", t.label)?;
        }
        Ok(())
    }
}

/// Exported code plus the identity behind each label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GaussExport {
    pub code: GaussCode,
    /// `labels[k]` is the crossing with label `k + 1`.
    pub labels: Vec<CrossingId>,
}

/// Serializes the crossing structure of a diagram in traversal order.
///
/// Walks the curve from vertex 0; along each segment, crossing visits are
/// ordered by their parameter on that segment.
pub struct ExportGaussCode<'a> {
    polyline: &'a Polyline,
}

impl<'a> ExportGaussCode<'a> {
    /// Creates a new export for the given polyline.
    #[must_use]
    pub fn new(polyline: &'a Polyline) -> Self {
        Self { polyline }
    }

    /// Executes the export against the crossings computed for the polyline.
    #[must_use]
    pub fn execute(&self, store: &CrossingStore) -> GaussExport {
        // (segment, parameter, other segment, crossing, passage)
        let mut visits: Vec<(usize, f64, usize, CrossingId, Passage)> =
            Vec::with_capacity(store.len() * 2);
        for c in store.iter() {
            for (slot, strand) in [Strand::First, Strand::Second].into_iter().enumerate() {
                let passage = if c.over == strand {
                    Passage::Over
                } else {
                    Passage::Under
                };
                let other = c.segments[1 - slot];
                visits.push((c.segments[slot], c.params[slot], other, c.id, passage));
            }
        }
        debug_assert!(visits.iter().all(|v| v.0 < self.polyline.vertex_count()));

        visits.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then(a.1.total_cmp(&b.1))
                .then(a.2.cmp(&b.2))
        });

        let mut labels: Vec<CrossingId> = Vec::with_capacity(store.len());
        let mut signs = Vec::with_capacity(store.len());
        let mut tokens = Vec::with_capacity(visits.len());
        for (_, _, _, id, passage) in visits {
            let label = if let Some(pos) = labels.iter().position(|l| *l == id) {
                pos + 1
            } else {
                labels.push(id);
                if let Ok(c) = store.get(id) {
                    signs.push(c.sign());
                }
                labels.len()
            };
            tokens.push(GaussToken { label, passage });
        }

        GaussExport {
            code: GaussCode { tokens, signs },
            labels,
        }
    }
}
