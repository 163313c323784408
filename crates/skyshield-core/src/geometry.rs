//! Geometric helpers shared by the collision systems.

use glam::DVec2;

use crate::types::Position;

fn to_vec(p: &Position) -> DVec2 {
    DVec2::new(p.x, p.y)
}

/// Distance from `point` to the closest point on the closed segment
/// `seg_start`..`seg_end`.
///
/// A degenerate segment (both endpoints equal) yields the distance to that
/// endpoint.
pub fn distance_to_segment(point: &Position, seg_start: &Position, seg_end: &Position) -> f64 {
    let p = to_vec(point);
    let a = to_vec(seg_start);
    let b = to_vec(seg_end);

    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }

    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Axis-aligned proximity test: `|dx| < half_width && |dy| < half_height`.
pub fn within_box(point: &Position, center: &Position, half_width: f64, half_height: f64) -> bool {
    (point.x - center.x).abs() < half_width && (point.y - center.y).abs() < half_height
}
