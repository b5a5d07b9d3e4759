pub mod crossing;

pub use crossing::{Crossing, CrossingId, CrossingSign, Strand};

use crate::error::DiagramError;
use slotmap::SlotMap;

/// Arena that owns the crossings of one diagram.
///
/// Crossings are addressed by generational keys, so an identity that has been
/// dropped is never handed out again for a later crossing.
#[derive(Debug, Clone, Default)]
pub struct CrossingStore {
    crossings: SlotMap<CrossingId, Crossing>,
}

impl CrossingStore {
    /// Creates a new, empty crossing store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a crossing, assigning it a fresh identity.
    ///
    /// The `id` field of the passed crossing is overwritten.
    pub fn add(&mut self, mut crossing: Crossing) -> CrossingId {
        self.crossings.insert_with_key(|id| {
            crossing.id = id;
            crossing
        })
    }

    /// Removes a crossing, returning it if it was present.
    pub fn remove(&mut self, id: CrossingId) -> Option<Crossing> {
        self.crossings.remove(id)
    }

    /// Returns a reference to the crossing, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns `DiagramError::UnknownCrossing` if the identity is not present.
    pub fn get(&self, id: CrossingId) -> Result<&Crossing, DiagramError> {
        self.crossings
            .get(id)
            .ok_or(DiagramError::UnknownCrossing(id))
    }

    /// Returns a mutable reference to the crossing, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns `DiagramError::UnknownCrossing` if the identity is not present.
    pub fn get_mut(&mut self, id: CrossingId) -> Result<&mut Crossing, DiagramError> {
        self.crossings
            .get_mut(id)
            .ok_or(DiagramError::UnknownCrossing(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.crossings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.crossings.is_empty()
    }

    /// Iterates over crossings in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &Crossing> {
        self.crossings.values()
    }

    /// Returns all crossings ordered by their segment pair.
    #[must_use]
    pub fn sorted(&self) -> Vec<&Crossing> {
        let mut all: Vec<&Crossing> = self.crossings.values().collect();
        all.sort_by_key(|c| c.segments);
        all
    }

    /// Finds the crossing between two segments, in either order.
    #[must_use]
    pub fn on_segments(&self, a: usize, b: usize) -> Option<&Crossing> {
        let pair = [a.min(b), a.max(b)];
        self.crossings.values().find(|c| c.segments == pair)
    }
}
