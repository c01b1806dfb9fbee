//! Signed distance functions for the supported primitives.
//!
//! Negative values are inside, positive outside, zero on the boundary. A line
//! segment has no inside and always yields an unsigned distance.
//!
//! Every function here has a line-for-line twin in `render/sdf/shaders/sdf.wgsl`.

use crate::coords::Vec2;

/// Offset from the closest point of the segment `start + t * edge, t in [0, 1]` to `v + start`.
///
/// A zero-length edge collapses to the start point instead of dividing by zero.
#[inline]
fn segment_offset(v: Vec2, edge: Vec2) -> Vec2 {
    let len_sq = edge.length_squared();
    let t = if len_sq > 0.0 {
        (v.dot(edge) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    v - edge * t
}

#[inline]
pub fn distance_to_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Unsigned distance to the segment `[a, b]`.
#[inline]
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    segment_offset(p - a, b - a).length()
}

/// Signed distance to the triangle `(a, b, c)`, either winding.
///
/// The magnitude is the nearest edge distance. The sign is negative only when
/// `p` lies on the inner side of all three edges, where "inner" is taken from
/// the triangle's own orientation (`edge0 x edge2`).
pub fn distance_to_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> f32 {
    let e0 = b - a;
    let e1 = c - b;
    let e2 = a - c;
    let v0 = p - a;
    let v1 = p - b;
    let v2 = p - c;

    let d0 = segment_offset(v0, e0).length_squared();
    let d1 = segment_offset(v1, e1).length_squared();
    let d2 = segment_offset(v2, e2).length_squared();

    let winding = e0.perp_dot(e2);
    let s0 = winding * v0.perp_dot(e0);
    let s1 = winding * v1.perp_dot(e1);
    let s2 = winding * v2.perp_dot(e2);

    let sign = if s0.min(s1).min(s2) > 0.0 { -1.0 } else { 1.0 };
    d0.min(d1).min(d2).sqrt() * sign
}

/// Signed distance to an axis-aligned box given its center and half extents.
#[inline]
pub fn distance_to_rect(p: Vec2, center: Vec2, half_extents: Vec2) -> f32 {
    let d = (p - center).abs() - half_extents;
    let outside = d.max(Vec2::ZERO).length();
    let inside = d.max_element().min(0.0);
    outside + inside
}

/// Signed distance to a box rotated by `rotation_deg` about its center.
#[inline]
pub fn distance_to_rotated_rect(p: Vec2, center: Vec2, half_extents: Vec2, rotation_deg: f32) -> f32 {
    let local = (p - center).rotate_deg(-rotation_deg);
    distance_to_rect(local, Vec2::ZERO, half_extents)
}

/// Erodes a field by `radius`, turning convex corners into arcs of that radius.
#[inline]
pub fn rounded(d: f32, radius: f32) -> f32 {
    d - radius
}

/// Turns a filled field into a band of half-width `width` around its zero level set.
#[inline]
pub fn outline(d: f32, width: f32) -> f32 {
    d.abs() - width
}
