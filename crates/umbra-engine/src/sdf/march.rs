//! Sphere tracing over the composed scene field.
//!
//! The march steps from `origin` toward `target` by the local field value until
//! it lands within `epsilon` of a surface or the accumulated distance exceeds
//! `max_distance`. The step cap only bounds runtime; a well-formed field
//! converges long before it.

use crate::coords::Vec2;
use crate::paint::Color;

use super::{Primitive, scene_distance, scene_distance_except};

/// Field value below which the march counts as a surface hit.
pub const SURFACE_EPSILON: f32 = 0.01;

/// Hard ceiling on march iterations.
pub const MAX_MARCH_STEPS: u32 = 1000;

/// Color of the circles emitted by [`ray_march_with_trace`].
pub const TRACE_COLOR: Color = Color::new(0.2, 0.9, 1.0, 0.9);

/// Outline half-width of trace circles, in scene units.
pub const TRACE_OUTLINE: f32 = 1.0;

/// Termination policy for a march.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarchConfig {
    pub epsilon: f32,
    pub max_steps: u32,
}

impl Default for MarchConfig {
    fn default() -> Self {
        Self {
            epsilon: SURFACE_EPSILON,
            max_steps: MAX_MARCH_STEPS,
        }
    }
}

/// Result of a traced march: the distance plus one marker per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct RayTrace {
    /// Same value [`ray_march`] returns for these inputs.
    pub distance: f32,
    /// Iterations executed after the initial sample.
    pub steps: u32,
    /// Outlined circles at each sample point, radius = local field value.
    pub markers: Vec<Primitive>,
}

/// Distance traveled from `origin` toward `target` before hitting a surface,
/// clamped to `max_distance`.
///
/// `origin == target` gives no direction; the march then never moves and ends
/// on the epsilon or distance bound instead of producing NaN. Callers that need
/// a meaningful answer should not pass coincident points.
pub fn ray_march(origin: Vec2, target: Vec2, max_distance: f32, primitives: &[Primitive]) -> f32 {
    ray_march_with(&MarchConfig::default(), origin, target, max_distance, primitives)
}

/// [`ray_march`] with an explicit termination policy.
pub fn ray_march_with(
    config: &MarchConfig,
    origin: Vec2,
    target: Vec2,
    max_distance: f32,
    primitives: &[Primitive],
) -> f32 {
    let field = |p| scene_distance(p, max_distance, primitives);
    march(config, origin, target, max_distance, field, |_, _| {}).0
}

/// [`ray_march`] that also records a visual trace of every sample.
///
/// The trace is purely additive; the returned distance is identical to the
/// untraced march.
pub fn ray_march_with_trace(
    origin: Vec2,
    target: Vec2,
    max_distance: f32,
    primitives: &[Primitive],
) -> RayTrace {
    let mut markers = Vec::new();
    let (distance, steps) = march(
        &MarchConfig::default(),
        origin,
        target,
        max_distance,
        |p| scene_distance(p, max_distance, primitives),
        |p, d| {
            markers.push(
                Primitive::circle(p, d.max(0.0))
                    .as_outline(TRACE_OUTLINE)
                    .with_color(TRACE_COLOR),
            );
        },
    );

    RayTrace {
        distance,
        steps,
        markers,
    }
}

/// Whether a surface blocks the straight path from `from` to `light`.
///
/// The march is bounded by the straight-line distance, so anything behind the
/// light never counts as an occluder.
pub fn is_occluded(from: Vec2, light: Vec2, primitives: &[Primitive]) -> bool {
    occluded(from, light, |p, bound| scene_distance(p, bound, primitives))
}

/// [`is_occluded`] ignoring the primitive at index `skip`.
///
/// Shading a point on a surface uses this with the surface's own index, so
/// only other primitives can put it in shadow.
pub fn is_occluded_except(from: Vec2, light: Vec2, primitives: &[Primitive], skip: usize) -> bool {
    occluded(from, light, |p, bound| {
        scene_distance_except(p, bound, primitives, skip)
    })
}

fn occluded(from: Vec2, light: Vec2, field: impl Fn(Vec2, f32) -> f32) -> bool {
    let config = MarchConfig::default();
    let to_light = from.distance(light);
    if to_light <= config.epsilon {
        return false;
    }
    let (traveled, _) = march(&config, from, light, to_light, |p| field(p, to_light), |_, _| {});
    traveled + config.epsilon < to_light
}

fn march(
    config: &MarchConfig,
    origin: Vec2,
    target: Vec2,
    max_distance: f32,
    field: impl Fn(Vec2) -> f32,
    mut on_sample: impl FnMut(Vec2, f32),
) -> (f32, u32) {
    let dir = (target - origin).normalize_or_zero();

    let mut p = origin;
    let mut d = field(p);
    let mut traveled = d;
    on_sample(p, d);

    let mut steps = 0;
    while steps < config.max_steps {
        steps += 1;
        p += dir * d;
        d = field(p);
        traveled += d;
        on_sample(p, d);
        if traveled > max_distance || d < config.epsilon {
            break;
        }
    }

    (traveled.min(max_distance), steps)
}
