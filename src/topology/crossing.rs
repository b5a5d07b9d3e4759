use crate::math::Point2;

slotmap::new_key_type! {
    /// Stable identifier for a crossing in the crossing store.
    pub struct CrossingId;
}

/// One of the two strands meeting at a crossing.
///
/// `First` is the segment with the lower index, `Second` the higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    First,
    Second,
}

impl Strand {
    /// Returns the other strand.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }

    fn slot(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

/// Handedness of a crossing, seen along the traversal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrossingSign {
    /// Right-handed: the under strand passes from right to left of the over strand.
    Positive,
    /// Left-handed.
    Negative,
}

impl CrossingSign {
    /// `+1` or `-1`.
    #[must_use]
    pub fn value(self) -> i64 {
        match self {
            Self::Positive => 1,
            Self::Negative => -1,
        }
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
        }
    }
}

/// A transversal self-intersection of two non-adjacent segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Crossing {
    /// Identity, retained while the same geometric crossing persists.
    pub id: CrossingId,
    /// Participating segment indices, ascending.
    pub segments: [usize; 2],
    /// Intersection point.
    pub point: Point2,
    /// Parameter along each segment, strictly inside `(0, 1)`.
    pub params: [f64; 2],
    /// The strand drawn on top.
    pub over: Strand,
    /// Sign the crossing has when `First` is over.
    pub(crate) first_over_sign: CrossingSign,
}

impl Crossing {
    /// Segment index of the strand passing over.
    #[must_use]
    pub fn over_segment(&self) -> usize {
        self.segments[self.over.slot()]
    }

    /// Segment index of the strand passing under.
    #[must_use]
    pub fn under_segment(&self) -> usize {
        self.segments[self.over.other().slot()]
    }

    /// Returns `true` if the crossing still has its initial order
    /// (lower segment index under).
    #[must_use]
    pub fn has_default_order(&self) -> bool {
        self.over == Strand::Second
    }

    /// Which strand `segment` is, if it participates.
    #[must_use]
    pub fn strand_of(&self, segment: usize) -> Option<Strand> {
        if self.segments[0] == segment {
            Some(Strand::First)
        } else if self.segments[1] == segment {
            Some(Strand::Second)
        } else {
            None
        }
    }

    /// Handedness under the current over/under order.
    #[must_use]
    pub fn sign(&self) -> CrossingSign {
        match self.over {
            Strand::First => self.first_over_sign,
            Strand::Second => self.first_over_sign.flipped(),
        }
    }

    /// Swaps which strand passes over.
    pub fn toggle(&mut self) {
        self.over = self.over.other();
    }
}
