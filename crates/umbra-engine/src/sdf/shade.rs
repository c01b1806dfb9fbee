//! Host-side reference of the per-pixel scene shading.
//!
//! `shade_pixel` computes, on the CPU, the color the scene shader writes for a
//! pixel. It exists so the lighting model can be unit tested and previewed
//! without a device; `render/sdf/shaders/sdf.wgsl::fs_main` must stay in step.

use crate::coords::Vec2;
use crate::paint::Color;

use super::{Primitive, is_occluded, is_occluded_except, nearest};

/// Light contribution floor applied to surfaces outside the light's reach.
pub const AMBIENT: f32 = 0.35;

/// Point light used for scene shading.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Light {
    pub pos: Vec2,
    pub color: Color,
    /// Distance at which the light falls off to zero. `<= 0` disables lighting.
    pub max_distance: f32,
}

impl Light {
    #[inline]
    pub fn new(pos: Vec2, color: Color, max_distance: f32) -> Self {
        Self {
            pos,
            color,
            max_distance,
        }
    }

    /// Disabled light: primitives are drawn in their flat colors.
    #[inline]
    pub fn unlit() -> Self {
        Self::new(Vec2::ZERO, Color::TRANSPARENT, 0.0)
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.max_distance > 0.0
    }

    /// Linear falloff in `[0, 1]`, 1 at the light and 0 at `max_distance`.
    #[inline]
    pub fn falloff(&self, p: Vec2) -> f32 {
        if !self.is_enabled() {
            return 0.0;
        }
        (1.0 - p.distance(self.pos) / self.max_distance).clamp(0.0, 1.0)
    }
}

/// Anti-aliased coverage of a pixel whose center sits `d` from the surface.
#[inline]
pub fn coverage(d: f32) -> f32 {
    (0.5 - d).clamp(0.0, 1.0)
}

/// Straight-alpha color of the pixel at `p`.
///
/// - Surfaces take their primitive color scaled by `AMBIENT + light * falloff`,
///   with the light term dropped when another primitive blocks the path to
///   the light.
/// - Background pixels glow with the light color scaled by falloff, and only
///   when the path to the light is clear.
/// - The two are blended by edge coverage times the primitive's alpha.
pub fn shade_pixel(p: Vec2, light: &Light, primitives: &[Primitive]) -> Color {
    let search = if light.is_enabled() {
        light.max_distance
    } else {
        f32::MAX
    };
    let hit = nearest(p, search, primitives);

    let falloff = light.falloff(p);
    let background = if falloff > 0.0 && !is_occluded(p, light.pos, primitives) {
        let k = falloff * light.color.a;
        Color::new(light.color.r * k, light.color.g * k, light.color.b * k, k)
    } else {
        Color::TRANSPARENT
    };

    let Some((index, d)) = hit else {
        return background;
    };
    let prim = &primitives[index];
    let cov = coverage(d) * prim.color.a;
    if cov <= 0.0 {
        return background;
    }

    let surface = if light.is_enabled() {
        let visible = falloff > 0.0 && !is_occluded_except(p, light.pos, primitives, index);
        let direct = if visible { falloff } else { 0.0 };
        let lit = |c: f32, l: f32| c * (AMBIENT + l * direct);
        Color::new(
            lit(prim.color.r, light.color.r),
            lit(prim.color.g, light.color.g),
            lit(prim.color.b, light.color.b),
            1.0,
        )
    } else {
        prim.color.with_alpha(1.0)
    };

    background.lerp(surface, cov)
}
