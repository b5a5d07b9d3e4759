use tracing::debug;

use crate::config::DiagramConfig;
use crate::error::Result;
use crate::geometry::{Polyline, SegmentRemap, Segments};
use crate::math::Point2;
use crate::operations::crossings::{CrossingEngine, Degeneracy};
use crate::operations::export::{ExportGaussCode, GaussCode, GaussExport};
use crate::operations::query::{Faces, PickSegment, PickVertex, Regions};
use crate::topology::{Crossing, CrossingId};

/// A knot diagram: a closed polyline plus its derived crossing structure.
///
/// Every mutation recomputes the crossings before it returns, so the vertex
/// sequence and the crossing set observed through this type always belong
/// together. A rejected mutation leaves the diagram unchanged.
#[derive(Debug, Clone)]
pub struct Diagram {
    polyline: Polyline,
    engine: CrossingEngine,
}

impl Diagram {
    /// Creates a diagram from an ordered list of vertices using the default
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns `DiagramError::InvalidDiagram` for fewer than 3 vertices or a
    /// non-finite coordinate.
    pub fn new(vertices: Vec<Point2>) -> Result<Self> {
        Self::with_config(vertices, DiagramConfig::default())
    }

    /// Creates a diagram from `(x, y)` pairs.
    ///
    /// # Errors
    ///
    /// See [`Diagram::new`].
    pub fn from_coordinates(coordinates: &[(f64, f64)]) -> Result<Self> {
        Self::new(
            coordinates
                .iter()
                .map(|&(x, y)| Point2::new(x, y))
                .collect(),
        )
    }

    /// Creates a diagram from `(x, y)` pairs that trace an explicitly closed
    /// ring, dropping the last pair if it repeats the first.
    ///
    /// # Errors
    ///
    /// Returns `DiagramError::InvalidDiagram` if fewer than 3 vertices remain
    /// or a coordinate is not finite.
    pub fn from_closed_ring(coordinates: &[(f64, f64)]) -> Result<Self> {
        let ring = coordinates
            .iter()
            .map(|&(x, y)| Point2::new(x, y))
            .collect();
        Self::from_polyline(Polyline::from_closed_ring(ring)?, DiagramConfig::default())
    }

    /// Creates a diagram with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns `DiagramError::InvalidDiagram` for malformed input, or
    /// `GeometryError::Degenerate` if the configuration rejects degenerate
    /// contacts and the input has one.
    pub fn with_config(vertices: Vec<Point2>, config: DiagramConfig) -> Result<Self> {
        Self::from_polyline(Polyline::new(vertices)?, config)
    }

    fn from_polyline(polyline: Polyline, config: DiagramConfig) -> Result<Self> {
        let mut engine = CrossingEngine::new(config);
        engine.recompute(&polyline, &SegmentRemap::Identity)?;
        debug!(
            vertices = polyline.vertex_count(),
            crossings = engine.store().len(),
            "diagram created"
        );
        Ok(Self { polyline, engine })
    }

    #[must_use]
    pub fn config(&self) -> &DiagramConfig {
        self.engine.config()
    }

    /// Returns the vertex sequence.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        self.polyline.vertices()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.polyline.vertex_count()
    }

    #[must_use]
    pub fn polyline(&self) -> &Polyline {
        &self.polyline
    }

    /// Returns the segments of the closed curve.
    #[must_use]
    pub fn segments(&self) -> Segments<'_> {
        self.polyline.segments()
    }

    /// Inserts a vertex after `after`.
    ///
    /// # Errors
    ///
    /// Returns `DiagramError::IndexOutOfRange` for an invalid index,
    /// `DiagramError::InvalidDiagram` for a non-finite point, or
    /// `GeometryError::Degenerate` under the rejecting policy.
    pub fn insert_vertex(&mut self, after: usize, point: Point2) -> Result<()> {
        self.apply(|pl| pl.insert_vertex(after, point))
    }

    /// Moves vertex `index` to `point`.
    ///
    /// # Errors
    ///
    /// Same as [`Diagram::insert_vertex`].
    pub fn move_vertex(&mut self, index: usize, point: Point2) -> Result<()> {
        self.apply(|pl| pl.move_vertex(index, point))
    }

    /// Removes vertex `index`.
    ///
    /// # Errors
    ///
    /// Returns `DiagramError::InvalidDiagram` if the diagram would drop below
    /// 3 vertices, besides the errors of [`Diagram::insert_vertex`].
    pub fn remove_vertex(&mut self, index: usize) -> Result<()> {
        self.apply(|pl| pl.remove_vertex(index))
    }

    /// Recomputes the crossings of the unchanged vertex sequence.
    ///
    /// The result is identical to the current crossing set.
    ///
    /// # Errors
    ///
    /// Only fails if the configuration rejects degeneracies and the current
    /// geometry has one, which a diagram built with that configuration cannot.
    pub fn recompute(&mut self) -> Result<()> {
        self.apply(|_| Ok(SegmentRemap::Identity))
    }

    /// Mutates a copy of the polyline, detects on the copy, and only then
    /// commits both.
    fn apply<F>(&mut self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Polyline) -> Result<SegmentRemap>,
    {
        let mut next = self.polyline.clone();
        let remap = edit(&mut next)?;
        let detection = self.engine.detect(&next)?;
        self.polyline = next;
        self.engine.commit(detection, &remap);
        debug!(
            ?remap,
            vertices = self.polyline.vertex_count(),
            crossings = self.engine.store().len(),
            "diagram updated"
        );
        Ok(())
    }

    /// Returns the crossings, ordered by segment pair.
    #[must_use]
    pub fn crossings(&self) -> Vec<&Crossing> {
        self.engine.store().sorted()
    }

    /// Returns a crossing by identity.
    #[must_use]
    pub fn crossing(&self, id: CrossingId) -> Option<&Crossing> {
        self.engine.store().get(id).ok()
    }

    /// Returns the crossing between segments `a` and `b`, in either order.
    #[must_use]
    pub fn crossing_on(&self, a: usize, b: usize) -> Option<&Crossing> {
        self.engine.store().on_segments(a, b)
    }

    #[must_use]
    pub fn crossing_count(&self) -> usize {
        self.engine.store().len()
    }

    /// Swaps which strand passes over at crossing `id`.
    ///
    /// # Errors
    ///
    /// Returns `DiagramError::UnknownCrossing` if no such crossing exists.
    pub fn toggle_crossing(&mut self, id: CrossingId) -> Result<()> {
        self.engine.toggle(id)?;
        debug!(?id, "crossing toggled");
        Ok(())
    }

    /// Non-adjacent segment pairs that touch or overlap without crossing.
    #[must_use]
    pub fn degeneracies(&self) -> &[Degeneracy] {
        self.engine.degeneracies()
    }

    /// Sum of the crossing signs.
    #[must_use]
    pub fn writhe(&self) -> i64 {
        self.engine.store().iter().map(|c| c.sign().value()).sum()
    }

    /// Exports the crossing structure in traversal order.
    #[must_use]
    pub fn export_code(&self) -> GaussCode {
        self.export().code
    }

    /// Crossing identities in label order of [`Diagram::export_code`].
    #[must_use]
    pub fn gauss_labels(&self) -> Vec<CrossingId> {
        self.export().labels
    }

    fn export(&self) -> GaussExport {
        ExportGaussCode::new(&self.polyline).execute(self.engine.store())
    }

    /// Bounded faces and outer boundary of the diagram.
    #[must_use]
    pub fn faces(&self) -> Faces {
        Regions::new(&self.polyline, self.config().epsilon).execute(self.engine.store())
    }

    /// Bounded regions cut out by the diagram.
    #[must_use]
    pub fn regions(&self) -> Vec<Vec<Point2>> {
        self.faces().regions
    }

    /// Outer boundary of the diagram.
    #[must_use]
    pub fn boundary(&self) -> Vec<Point2> {
        self.faces().boundary
    }

    /// Index of the vertex closest to `point`, if within `radius`.
    #[must_use]
    pub fn vertex_near(&self, point: Point2, radius: f64) -> Option<usize> {
        PickVertex::new(point, radius).execute(&self.polyline)
    }

    /// Index of the first segment within `radius` of `point`.
    #[must_use]
    pub fn segment_near(&self, point: Point2, radius: f64) -> Option<usize> {
        PickSegment::new(point, radius).execute(&self.polyline)
    }

    /// Inserts `point` into the first segment within `radius` of it.
    ///
    /// Returns the index of the new vertex, or `None` if no segment is close
    /// enough.
    ///
    /// # Errors
    ///
    /// Same as [`Diagram::insert_vertex`].
    pub fn insert_vertex_near(&mut self, point: Point2, radius: f64) -> Result<Option<usize>> {
        let Some(segment) = self.segment_near(point, radius) else {
            return Ok(None);
        };
        self.insert_vertex(segment, point)?;
        Ok(Some(segment + 1))
    }
}

impl Default for Diagram {
    /// The unit triangle, which has no crossings.
    fn default() -> Self {
        Self {
            polyline: Polyline::default(),
            engine: CrossingEngine::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::DegeneracyPolicy;
    use crate::error::{DiagramError, GeometryError, KnodiaError};

    fn bowtie() -> Diagram {
        Diagram::from_coordinates(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)]).unwrap()
    }

    #[test]
    fn default_is_triangle_without_crossings() {
        let d = Diagram::default();
        assert_eq!(d.vertex_count(), 3);
        assert_eq!(d.crossing_count(), 0);
        assert!(d.export_code().is_empty());
    }

    #[test]
    fn bowtie_crossing() {
        let d = bowtie();
        let crossings = d.crossings();
        assert_eq!(crossings.len(), 1);
        assert_eq!(crossings[0].segments, [0, 2]);
        assert!((crossings[0].point - Point2::new(1.0, 1.0)).norm() < 1e-9);
    }

    #[test]
    fn toggle_unknown_crossing_fails() {
        let mut d = bowtie();
        let id = d.crossings()[0].id;
        d.move_vertex(1, Point2::new(0.0, -2.0)).unwrap();
        let err = d.toggle_crossing(id).unwrap_err();
        assert!(matches!(
            err,
            KnodiaError::Diagram(DiagramError::UnknownCrossing(_))
        ));
    }

    #[test]
    fn small_move_keeps_identity_and_order() {
        let mut d = bowtie();
        let id = d.crossings()[0].id;
        d.toggle_crossing(id).unwrap();
        d.move_vertex(1, Point2::new(2.0, 2.001)).unwrap();
        let c = d.crossing(id).unwrap();
        assert!(!c.has_default_order());
        assert_eq!(c.over_segment(), 0);
    }

    #[test]
    fn insert_splitting_crossed_segment_keeps_identity() {
        let mut d = bowtie();
        let id = d.crossings()[0].id;
        d.toggle_crossing(id).unwrap();
        // Split segment 0 away from the crossing; the crossing moves to
        // segment 1 of the new numbering, segment 2 becomes 3.
        d.insert_vertex(0, Point2::new(0.5, 0.5)).unwrap();
        let c = d.crossing(id).unwrap();
        assert_eq!(c.segments, [1, 3]);
        assert_eq!(c.over_segment(), 1);
    }

    #[test]
    fn remove_vertex_below_triangle_fails_without_change() {
        let mut d = Diagram::default();
        let err = d.remove_vertex(0).unwrap_err();
        assert!(matches!(
            err,
            KnodiaError::Diagram(DiagramError::InvalidDiagram(_))
        ));
        assert_eq!(d.vertex_count(), 3);
    }

    #[test]
    fn rejected_edit_leaves_diagram_unchanged() {
        let config = DiagramConfig::default().with_degeneracy(DegeneracyPolicy::Reject);
        let mut d = Diagram::with_config(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(2.0, 2.0),
                Point2::new(2.0, 0.0),
                Point2::new(0.0, 2.0),
            ],
            config,
        )
        .unwrap();
        let before = d.vertices().to_vec();
        let err = d.move_vertex(3, Point2::new(2.0, 1.0)).unwrap_err();
        assert!(matches!(
            err,
            KnodiaError::Geometry(GeometryError::Degenerate { .. })
        ));
        assert_eq!(d.vertices(), before.as_slice());
        assert_eq!(d.crossing_count(), 1);
    }

    #[test]
    fn writhe_flips_with_toggle() {
        let mut d = bowtie();
        let w = d.writhe();
        assert_eq!(w.abs(), 1);
        let id = d.crossings()[0].id;
        d.toggle_crossing(id).unwrap();
        assert_eq!(d.writhe(), -w);
    }

    #[test]
    fn insert_near_segment() {
        let mut d =
            Diagram::from_coordinates(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap();
        let index = d.insert_vertex_near(Point2::new(0.5, 0.01), 0.05).unwrap();
        assert_eq!(index, Some(1));
        assert_eq!(d.vertices()[1], Point2::new(0.5, 0.01));
        assert_eq!(d.insert_vertex_near(Point2::new(0.5, 0.5), 0.05).unwrap(), None);
    }

    #[test]
    fn regions_follow_crossings() {
        let d = bowtie();
        assert_eq!(d.regions().len(), 2);
        assert_eq!(d.boundary().len(), 6);
    }
}
