//! Signed-distance-field scene model.
//!
//! - `primitive`: the closed set of shapes and their styling
//! - `distance`: per-shape distance functions and field modifiers
//! - `scene`: nearest-surface union over a primitive list
//! - `march`: sphere tracing, occlusion queries and debug traces
//! - `shade`: host-side reference of the per-pixel shading
//!
//! Everything here is pure CPU math with no device dependency.

pub mod distance;
mod march;
mod primitive;
mod scene;
mod shade;

pub use march::{
    is_occluded, is_occluded_except, ray_march, ray_march_with, ray_march_with_trace, MarchConfig,
    RayTrace, MAX_MARCH_STEPS, SURFACE_EPSILON, TRACE_COLOR, TRACE_OUTLINE,
};
pub use primitive::{Primitive, PrimitiveKind, Shape};
pub use scene::{nearest, scene_distance, scene_distance_except};
pub use shade::{coverage, shade_pixel, Light, AMBIENT};
