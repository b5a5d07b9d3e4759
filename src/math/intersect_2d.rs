use super::{Point2, Vector2};

/// How two bounded segments meet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentContact {
    /// The segments do not meet.
    Disjoint,
    /// The segments cross transversally, strictly inside both of them.
    ///
    /// `s` is the parameter along the first segment and `t` along the second,
    /// both in the open interval `(eps, 1 - eps)`.
    Crossing { point: Point2, s: f64, t: f64 },
    /// The segments meet at (or within tolerance of) an endpoint of one of them.
    Touch { point: Point2 },
    /// The segments are collinear and share a stretch of positive length.
    Overlap,
}

/// Classifies the contact between segments `a0 → a1` and `b0 → b1`.
///
/// Solves `a0 + s * (a1 - a0) = b0 + t * (b1 - b0)`. The determinant test is
/// scaled by both segment lengths so `eps` is unit independent; the parameter
/// test uses `eps` directly.
#[must_use]
pub fn segment_contact_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    eps: f64,
) -> SegmentContact {
    let da = a1 - a0;
    let db = b1 - b0;
    let len_a = da.norm();
    let len_b = db.norm();
    let scale = len_a.max(len_b).max(1.0);

    if len_a < eps * scale || len_b < eps * scale {
        return point_contact(a0, a1, b0, b1, eps * scale);
    }

    let w = b0 - a0;
    let cross = da.perp(&db);
    if cross.abs() <= eps * len_a * len_b {
        return collinear_contact(a0, &da, len_a, &w, &db, eps, scale);
    }

    let s = w.perp(&db) / cross;
    let t = w.perp(&da) / cross;

    let strictly_inside = |v: f64| v > eps && v < 1.0 - eps;
    let within = |v: f64| v >= -eps && v <= 1.0 + eps;

    let point = a0 + da * s;
    if strictly_inside(s) && strictly_inside(t) {
        SegmentContact::Crossing { point, s, t }
    } else if within(s) && within(t) {
        SegmentContact::Touch { point }
    } else {
        SegmentContact::Disjoint
    }
}

/// Contact test when at least one segment has (near) zero length.
fn point_contact(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    tol: f64,
) -> SegmentContact {
    let a_short = (a1 - a0).norm() < tol;
    let (p, q0, q1) = if a_short { (a0, b0, b1) } else { (b0, a0, a1) };
    if super::distance_2d::point_to_segment_dist(p, q0, q1) <= tol {
        SegmentContact::Touch { point: *p }
    } else {
        SegmentContact::Disjoint
    }
}

/// Contact test for parallel segments.
fn collinear_contact(
    a0: &Point2,
    da: &Vector2,
    len_a: f64,
    w: &Vector2,
    db: &Vector2,
    eps: f64,
    scale: f64,
) -> SegmentContact {
    // Distance from b0 to the carrier line of a.
    if (da.perp(w) / len_a).abs() > eps * scale {
        return SegmentContact::Disjoint;
    }

    let len_sq = len_a * len_a;
    let tb0 = da.dot(w) / len_sq;
    let tb1 = da.dot(&(w + db)) / len_sq;
    let lo = tb0.min(tb1).max(0.0);
    let hi = tb0.max(tb1).min(1.0);

    let overlap = (hi - lo) * len_a;
    if overlap > eps * scale {
        SegmentContact::Overlap
    } else if overlap >= -eps * scale {
        SegmentContact::Touch {
            point: a0 + da * lo.clamp(0.0, 1.0),
        }
    } else {
        SegmentContact::Disjoint
    }
}
