use super::Point2;

/// Returns the parameter of the point on segment `a → b` closest to `p`,
/// clamped to `[0, 1]`.
#[must_use]
pub fn closest_param_on_segment(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return 0.0;
    }
    // Project point onto the infinite line, clamp to [0, 1].
    ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0)
}

/// Returns the minimum distance from point `p` to the line segment `a → b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let t = closest_param_on_segment(p, a, b);
    let closest = a + (b - a) * t;
    (p - closest).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn perpendicular_foot_inside() {
        let d = point_to_segment_dist(
            &Point2::new(1.0, 2.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(4.0, 0.0),
        );
        assert_abs_diff_eq!(d, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn clamps_to_nearest_endpoint() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let p = Point2::new(4.0, 4.0);
        assert_abs_diff_eq!(closest_param_on_segment(&p, &a, &b), 1.0);
        assert_abs_diff_eq!(point_to_segment_dist(&p, &a, &b), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_length_segment() {
        let a = Point2::new(1.0, 1.0);
        let d = point_to_segment_dist(&Point2::new(4.0, 5.0), &a, &a);
        assert_abs_diff_eq!(d, 5.0, epsilon = 1e-12);
    }
}
