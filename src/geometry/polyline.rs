use std::iter::FusedIterator;

use crate::error::{DiagramError, Result};
use crate::math::{is_finite, Point2};

/// A straight segment of a closed polyline.
///
/// Segment `index` runs from vertex `index` to vertex `(index + 1) % n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    /// Direction vector `end - start` (not normalized).
    #[must_use]
    pub fn direction(&self) -> crate::math::Vector2 {
        self.end - self.start
    }
}

/// A closed, piecewise-linear curve in the plane.
///
/// Vertices are identified by their position in the cyclic sequence, never by
/// value: two vertices may share coordinates. The sequence always holds at
/// least [`Polyline::MIN_VERTICES`] vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    vertices: Vec<Point2>,
}

impl Polyline {
    /// Fewest vertices a closed diagram may have (a triangle).
    pub const MIN_VERTICES: usize = 3;

    /// Creates a closed polyline from an ordered list of vertices.
    ///
    /// Every supplied vertex is kept, including repeated coordinates; the
    /// closing segment from the last vertex back to the first is implicit.
    ///
    /// # Errors
    ///
    /// Returns `DiagramError::InvalidDiagram` if fewer than 3 vertices are
    /// supplied or any coordinate is not finite.
    pub fn new(vertices: Vec<Point2>) -> Result<Self> {
        if vertices.len() < Self::MIN_VERTICES {
            return Err(DiagramError::InvalidDiagram(format!(
                "at least {} vertices are required, got {}",
                Self::MIN_VERTICES,
                vertices.len()
            ))
            .into());
        }
        if let Some(i) = vertices.iter().position(|p| !is_finite(p)) {
            return Err(non_finite(i));
        }
        Ok(Self { vertices })
    }

    /// Creates a closed polyline from a ring whose last point explicitly
    /// repeats the first.
    ///
    /// The closing point is dropped when present; otherwise this is
    /// [`Polyline::new`].
    ///
    /// # Errors
    ///
    /// See [`Polyline::new`]. The 3-vertex minimum applies after the closing
    /// point is dropped.
    pub fn from_closed_ring(mut ring: Vec<Point2>) -> Result<Self> {
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        Self::new(ring)
    }

    /// Returns the vertex sequence.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Returns the number of vertices (equal to the number of segments).
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Inserts `point` as a new vertex right after `after`.
    ///
    /// Segment `after` is split in two; every later index shifts by one.
    ///
    /// # Errors
    ///
    /// Returns `DiagramError::IndexOutOfRange` for an invalid index or
    /// `DiagramError::InvalidDiagram` for a non-finite point.
    pub fn insert_vertex(&mut self, after: usize, point: Point2) -> Result<SegmentRemap> {
        self.check_index(after)?;
        if !is_finite(&point) {
            return Err(non_finite(after + 1));
        }
        let old_len = self.vertices.len();
        self.vertices.insert(after + 1, point);
        Ok(SegmentRemap::Inserted { after, old_len })
    }

    /// Replaces the coordinates of vertex `index`.
    ///
    /// # Errors
    ///
    /// Returns `DiagramError::IndexOutOfRange` for an invalid index or
    /// `DiagramError::InvalidDiagram` for a non-finite point.
    pub fn move_vertex(&mut self, index: usize, point: Point2) -> Result<SegmentRemap> {
        self.check_index(index)?;
        if !is_finite(&point) {
            return Err(non_finite(index));
        }
        self.vertices[index] = point;
        Ok(SegmentRemap::Identity)
    }

    /// Removes vertex `index`, merging the two segments that met there.
    ///
    /// # Errors
    ///
    /// Returns `DiagramError::IndexOutOfRange` for an invalid index or
    /// `DiagramError::InvalidDiagram` if the polyline would drop below a
    /// triangle. Nothing is removed on error.
    pub fn remove_vertex(&mut self, index: usize) -> Result<SegmentRemap> {
        self.check_index(index)?;
        let old_len = self.vertices.len();
        if old_len <= Self::MIN_VERTICES {
            return Err(DiagramError::InvalidDiagram(format!(
                "removing vertex {index} would leave {} vertices",
                old_len - 1
            ))
            .into());
        }
        self.vertices.remove(index);
        Ok(SegmentRemap::Removed { index, old_len })
    }

    /// Returns segment `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than the vertex count.
    #[must_use]
    pub fn segment(&self, index: usize) -> Segment {
        let n = self.vertices.len();
        Segment {
            index,
            start: self.vertices[index],
            end: self.vertices[(index + 1) % n],
        }
    }

    /// Returns a restartable iterator over the `n` segments of the closed curve.
    #[must_use]
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            vertices: &self.vertices,
            next: 0,
        }
    }

    /// Returns `true` if segments `i` and `j` share an endpoint.
    #[must_use]
    pub fn are_adjacent(&self, i: usize, j: usize) -> bool {
        let n = self.vertices.len();
        i == j || (i + 1) % n == j || (j + 1) % n == i
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.vertices.len();
        if index >= len {
            return Err(DiagramError::IndexOutOfRange { index, len }.into());
        }
        Ok(())
    }
}

impl Default for Polyline {
    /// The unit right triangle.
    fn default() -> Self {
        Self {
            vertices: vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(0.0, 1.0),
            ],
        }
    }
}

fn non_finite(index: usize) -> crate::error::KnodiaError {
    DiagramError::InvalidDiagram(format!("vertex {index} has a non-finite coordinate")).into()
}

/// Iterator over the segments of a [`Polyline`], in index order.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    vertices: &'a [Point2],
    next: usize,
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let n = self.vertices.len();
        if self.next >= n {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(Segment {
            index,
            start: self.vertices[index],
            end: self.vertices[(index + 1) % n],
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.vertices.len().saturating_sub(self.next);
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for Segments<'_> {}

impl FusedIterator for Segments<'_> {}

/// Lineage of segment indices across one polyline mutation.
///
/// Maps each segment index before the edit to the index (or, for a split,
/// the two indices) of the segments that descend from it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRemap {
    /// Indices are unchanged (vertex moved, or no edit at all).
    Identity,
    /// A vertex was inserted after vertex `after`; segment `after` split in two.
    Inserted { after: usize, old_len: usize },
    /// Vertex `index` was removed; the two segments meeting there merged.
    Removed { index: usize, old_len: usize },
}

impl SegmentRemap {
    /// Returns the new indices of the segments descending from segment `old`.
    pub fn successors(&self, old: usize) -> impl Iterator<Item = usize> {
        let pair = match *self {
            Self::Identity => [Some(old), None],
            Self::Inserted { after, .. } => {
                if old < after {
                    [Some(old), None]
                } else if old == after {
                    [Some(after), Some(after + 1)]
                } else {
                    [Some(old + 1), None]
                }
            }
            Self::Removed { index, old_len } => {
                let merged = if index == 0 { old_len - 2 } else { index - 1 };
                let prev = (index + old_len - 1) % old_len;
                if old == index || old == prev {
                    [Some(merged), None]
                } else if old < index {
                    [Some(old), None]
                } else {
                    [Some(old - 1), None]
                }
            }
        };
        pair.into_iter().flatten()
    }

    /// Returns `true` if new segment `new` descends from old segment `old`.
    #[must_use]
    pub fn descends(&self, old: usize, new: usize) -> bool {
        self.successors(old).any(|s| s == new)
    }
}
