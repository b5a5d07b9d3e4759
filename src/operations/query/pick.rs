use crate::geometry::Polyline;
use crate::math::distance_2d::point_to_segment_dist;
use crate::math::Point2;

/// Finds the vertex closest to a point, within a pick radius.
pub struct PickVertex {
    point: Point2,
    radius: f64,
}

impl PickVertex {
    /// Creates a new vertex pick.
    #[must_use]
    pub fn new(point: Point2, radius: f64) -> Self {
        Self { point, radius }
    }

    /// Returns the index of the closest vertex strictly within the radius.
    /// Ties go to the lowest index.
    #[must_use]
    pub fn execute(&self, polyline: &Polyline) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, v) in polyline.vertices().iter().enumerate() {
            let d = (v - self.point).norm();
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best.filter(|&(_, d)| d < self.radius).map(|(i, _)| i)
    }
}

/// Finds the first segment passing within a pick radius of a point.
pub struct PickSegment {
    point: Point2,
    radius: f64,
}

impl PickSegment {
    /// Creates a new segment pick.
    #[must_use]
    pub fn new(point: Point2, radius: f64) -> Self {
        Self { point, radius }
    }

    /// Returns the lowest segment index within the radius.
    #[must_use]
    pub fn execute(&self, polyline: &Polyline) -> Option<usize> {
        polyline
            .segments()
            .find(|s| point_to_segment_dist(&self.point, &s.start, &s.end) <= self.radius)
            .map(|s| s.index)
    }
}
