use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

/// Even-odd (ray casting) containment test against a closed polygon.
/// An empty or degenerate polygon contains nothing.
pub fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    let mut inside = false;
    let mut j = polygon.len().wrapping_sub(1);
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[j];
        // the division only happens when the edge actually straddles the ray,
        // which guarantees a.y != b.y
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Intersection point of two line segments, if any.
///
/// Parallel and zero-length segments have a zero denominator and yield
/// `None` rather than dividing.
pub fn segment_intersection(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<Vec2> {
    let denominator = (b2.y - b1.y) * (a2.x - a1.x) - (b2.x - b1.x) * (a2.y - a1.y);
    if denominator == 0.0 {
        return None;
    }

    let ua = ((b2.x - b1.x) * (a1.y - b1.y) - (b2.y - b1.y) * (a1.x - b1.x)) / denominator;
    let ub = ((a2.x - a1.x) * (a1.y - b1.y) - (a2.y - a1.y) * (a1.x - b1.x)) / denominator;

    if (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub) {
        Some(a1 + (a2 - a1) * ua)
    } else {
        None
    }
}

/// Wrap an angle into `[0, 2π)`.
pub fn wrap_angle(angle: f32) -> f32 {
    let mut wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round a tiny negative input up to exactly 2π
    if wrapped >= TAU {
        wrapped -= TAU;
    }
    wrapped
}

/// Shortest signed difference form of an angle, in `(-π, π]`.
/// Used to find which way to turn between two headings.
pub fn angle_delta(mut angle: f32) -> f32 {
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn square() -> Vec<Vec2> {
        vec![
            Vec2::new(-10.0, -10.0),
            Vec2::new(10.0, -10.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(-10.0, 10.0),
            Vec2::new(-10.0, -10.0),
        ]
    }

    #[test]
    fn centroid_is_inside_convex_polygon() {
        assert!(point_in_polygon(Vec2::ZERO, &square()));
    }

    #[test]
    fn far_point_is_outside() {
        assert!(!point_in_polygon(Vec2::new(500.0, 500.0), &square()));
    }

    #[test]
    fn empty_polygon_contains_nothing() {
        assert!(!point_in_polygon(Vec2::ZERO, &[]));
    }

    #[test]
    fn crossing_segments_intersect() {
        let hit = segment_intersection(
            Vec2::new(-5.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(0.0, -5.0),
            Vec2::new(0.0, 5.0),
        );
        let point = hit.expect("perpendicular segments must cross");
        assert!(point.distance(Vec2::ZERO) < 1e-5);
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        assert!(segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(10.0, 1.0),
        )
        .is_none());
    }

    #[test]
    fn zero_length_segment_is_treated_as_parallel() {
        assert!(segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(5.0, 0.0),
        )
        .is_none());
    }

    #[test]
    fn segments_that_stop_short_do_not_intersect() {
        assert!(segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(5.0, 1.0),
            Vec2::new(5.0, 10.0),
        )
        .is_none());
    }

    #[test]
    fn wrap_angle_stays_in_range() {
        for raw in [-0.1, TAU + 0.2, -3.0 * TAU, 100.0, 0.0, -1.0e-8] {
            let wrapped = wrap_angle(raw);
            assert!((0.0..TAU).contains(&wrapped), "{raw} wrapped to {wrapped}");
        }
        assert!((wrap_angle(-0.1) - (TAU - 0.1)).abs() < 1e-5);
        assert!((wrap_angle(TAU + 0.2) - 0.2).abs() < 1e-5);
    }

    #[test]
    fn angle_delta_picks_the_short_way_around() {
        assert!((angle_delta(3.0 * FRAC_PI_2) - (-FRAC_PI_2)).abs() < 1e-5);
        assert!((angle_delta(-3.0 * FRAC_PI_2) - FRAC_PI_2).abs() < 1e-5);
        assert!((angle_delta(0.25) - 0.25).abs() < 1e-5);
    }
}
