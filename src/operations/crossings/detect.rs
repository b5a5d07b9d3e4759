use crate::error::DegeneracyKind;
use crate::geometry::Polyline;
use crate::math::intersect_2d::{segment_contact_2d, SegmentContact};
use crate::math::Point2;
use crate::topology::CrossingSign;

/// A crossing found by a detection pass, before it is given an identity.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedCrossing {
    /// Segment indices, ascending.
    pub segments: [usize; 2],
    pub point: Point2,
    /// Parameter along each segment, strictly inside `(0, 1)`.
    pub params: [f64; 2],
    /// Handedness when the lower-index segment is over.
    pub first_over_sign: CrossingSign,
}

/// A pair of non-adjacent segments that meet without a transversal crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Degeneracy {
    /// Segment indices, ascending.
    pub segments: [usize; 2],
    pub kind: DegeneracyKind,
}

/// Result of one full detection pass over a polyline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    /// Crossings, ordered by segment pair.
    pub crossings: Vec<DetectedCrossing>,
    /// Degenerate contacts, ordered by segment pair.
    pub degeneracies: Vec<Degeneracy>,
}

/// Finds every transversal crossing between non-adjacent segments.
///
/// Adjacent segments share an endpoint and are skipped without testing.
/// Two straight segments meet at most once, so each pair contributes at most
/// one crossing.
#[must_use]
pub fn find_all(polyline: &Polyline, eps: f64) -> Detection {
    let n = polyline.vertex_count();
    let mut detection = Detection::default();

    for i in 0..n {
        let a = polyline.segment(i);
        for j in (i + 2)..n {
            // Segment n-1 closes the loop onto vertex 0.
            if i == 0 && j == n - 1 {
                continue;
            }
            let b = polyline.segment(j);

            match segment_contact_2d(&a.start, &a.end, &b.start, &b.end, eps) {
                SegmentContact::Disjoint => {}
                SegmentContact::Crossing { point, s, t } => {
                    let first_over_sign = if a.direction().perp(&b.direction()) > 0.0 {
                        CrossingSign::Positive
                    } else {
                        CrossingSign::Negative
                    };
                    detection.crossings.push(DetectedCrossing {
                        segments: [i, j],
                        point,
                        params: [s, t],
                        first_over_sign,
                    });
                }
                SegmentContact::Touch { .. } => detection.degeneracies.push(Degeneracy {
                    segments: [i, j],
                    kind: DegeneracyKind::VertexTouch,
                }),
                SegmentContact::Overlap => detection.degeneracies.push(Degeneracy {
                    segments: [i, j],
                    kind: DegeneracyKind::CollinearOverlap,
                }),
            }
        }
    }

    detection
}
