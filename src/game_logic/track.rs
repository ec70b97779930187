use crate::game_logic::{point_in_polygon, segment_intersection, wrap_angle};
use bevy::prelude::*;

// Interpolated points emitted per control-point segment
const SEGMENT_RESOLUTION: usize = 10;
// How many boundary indices the nearest-center query samples
const CENTER_SAMPLES: usize = 20;
// Arc position of the start/finish line along the boundary loop
const START_LINE_ARC: f32 = 0.8;

/// A gate across the track, from the inner boundary to the outer one.
#[derive(Clone, Copy, Debug)]
pub struct TrackLine {
    pub start: Vec2,
    pub end: Vec2,
}

#[derive(Clone, Copy, Debug)]
pub struct StartPose {
    pub position: Vec2,
    pub heading: f32,
}

/// Immutable circuit geometry. Built once per track selection and rebuilt
/// wholesale on track change or restart; every query is read-only.
#[derive(Resource, Clone)]
pub struct Track {
    /// Closed loop, first point repeated at the end.
    pub outer_boundary: Vec<Vec2>,
    /// Closed loop, first point repeated at the end.
    pub inner_boundary: Vec<Vec2>,
    /// Ordered gates the car must cross in sequence.
    pub checkpoints: Vec<TrackLine>,
    pub start_line: TrackLine,
    pub start_pose: StartPose,
}

impl Track {
    /// Build the circuit from world-space control points. The loader
    /// guarantees at least 3 points; the boundary loops are the Catmull-Rom
    /// interpolation of the control polygon scaled outward/inward about the
    /// world origin.
    pub fn build(
        control_points: &[Vec2],
        outer_scale: f32,
        inner_scale: f32,
        checkpoint_count: usize,
        start_override: Option<StartPose>,
    ) -> Self {
        debug_assert!(control_points.len() >= 3, "track needs at least 3 control points");

        let outer_boundary = smooth_loop(control_points, outer_scale);
        let inner_boundary = smooth_loop(control_points, inner_scale);

        let mut checkpoints = Vec::with_capacity(checkpoint_count);
        for i in 0..checkpoint_count {
            let outer_idx = i * outer_boundary.len() / checkpoint_count;
            let inner_idx = i * inner_boundary.len() / checkpoint_count;
            if outer_idx < outer_boundary.len() && inner_idx < inner_boundary.len() {
                checkpoints.push(TrackLine {
                    start: inner_boundary[inner_idx],
                    end: outer_boundary[outer_idx],
                });
            }
        }

        let (start_line, start_pose) =
            place_start(&outer_boundary, &inner_boundary, start_override);

        Self {
            outer_boundary,
            inner_boundary,
            checkpoints,
            start_line,
            start_pose,
        }
    }

    /// A point is on the track iff it lies inside the outer boundary and
    /// outside the inner one.
    pub fn is_on_track(&self, point: Vec2) -> bool {
        point_in_polygon(point, &self.outer_boundary)
            && !point_in_polygon(point, &self.inner_boundary)
    }

    /// Nearest sampled center-line point (midpoint between the boundary
    /// loops). `None` when the boundaries are empty.
    pub fn find_nearest_center(&self, point: Vec2) -> Option<Vec2> {
        if self.outer_boundary.is_empty() || self.inner_boundary.is_empty() {
            return None;
        }

        let step = (self.outer_boundary.len() / CENTER_SAMPLES).max(1);
        let mut nearest: Option<(f32, Vec2)> = None;

        let mut i = 0;
        while i < self.outer_boundary.len() && i < self.inner_boundary.len() {
            let mid = (self.outer_boundary[i] + self.inner_boundary[i]) / 2.0;
            let dist = point.distance_squared(mid);
            if nearest.is_none_or(|(best, _)| dist < best) {
                nearest = Some((dist, mid));
            }
            i += step;
        }

        nearest.map(|(_, mid)| mid)
    }

    /// Did the movement segment `from -> to` cross the given gate this tick?
    pub fn crossed_line(&self, from: Vec2, to: Vec2, line: &TrackLine) -> bool {
        segment_intersection(from, to, line.start, line.end).is_some()
    }
}

fn smooth_loop(control_points: &[Vec2], scale: f32) -> Vec<Vec2> {
    let n = control_points.len();
    let mut points = Vec::with_capacity(n * SEGMENT_RESOLUTION + 1);

    for i in 0..n {
        let p0 = control_points[(i + n - 1) % n];
        let p1 = control_points[i];
        let p2 = control_points[(i + 1) % n];
        let p3 = control_points[(i + 2) % n];

        for t in 0..SEGMENT_RESOLUTION {
            let u = t as f32 / SEGMENT_RESOLUTION as f32;
            // displacement from the world origin scales, so the same control
            // polygon yields both boundary loops
            points.push(catmull_rom(p0, p1, p2, p3, u) * scale);
        }
    }

    // close the loop
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

fn catmull_rom(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, u: f32) -> Vec2 {
    let u2 = u * u;
    let u3 = u2 * u;
    0.5 * (2.0 * p1
        + (p2 - p0) * u
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u2
        + (3.0 * (p1 - p2) + p3 - p0) * u3)
}

fn place_start(
    outer: &[Vec2],
    inner: &[Vec2],
    start_override: Option<StartPose>,
) -> (TrackLine, StartPose) {
    if outer.is_empty() || inner.is_empty() {
        let line = TrackLine {
            start: Vec2::ZERO,
            end: Vec2::ZERO,
        };
        let pose = start_override.unwrap_or(StartPose {
            position: Vec2::ZERO,
            heading: 0.0,
        });
        return (line, pose);
    }

    let outer_idx = ((outer.len() as f32 * START_LINE_ARC) as usize).min(outer.len() - 1);
    let inner_idx = outer_idx.min(inner.len() - 1);
    let line = TrackLine {
        start: inner[inner_idx],
        end: outer[outer_idx],
    };

    let pose = start_override.unwrap_or_else(|| {
        // heading follows the outer boundary tangent, i.e. the direction of
        // travel along increasing index
        let ahead = outer[(outer_idx + 1) % outer.len()];
        let behind = outer[(outer_idx + outer.len() - 1) % outer.len()];
        let tangent = ahead - behind;
        StartPose {
            position: (line.start + line.end) / 2.0,
            heading: wrap_angle(tangent.y.atan2(tangent.x)),
        }
    });

    (line, pose)
}
