use crate::coords::Vec2;
use crate::paint::Color;

use super::distance::{
    distance_to_circle, distance_to_rect, distance_to_rotated_rect, distance_to_segment,
    distance_to_triangle, outline, rounded,
};

/// Geometry of a primitive.
///
/// The first vertex of every variant is what the scene record stores as
/// `center`; `Line` and `Triangle` keep their remaining vertices in `v2`/`v3`.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum Shape {
    /// Empty slot. Contributes nothing to the scene field.
    #[default]
    None,
    Circle { center: Vec2, radius: f32 },
    Line { a: Vec2, b: Vec2 },
    Triangle { a: Vec2, b: Vec2, c: Vec2 },
    /// Axis-aligned box; `half_extents` is the distance from center to each side.
    Rect { center: Vec2, half_extents: Vec2 },
    /// Box rotated about its center by `rotation_deg` degrees.
    RotatedRect { center: Vec2, half_extents: Vec2, rotation_deg: f32 },
}

/// Field-free discriminant of [`Shape`], as stored in the scene record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    None,
    Circle,
    Line,
    Triangle,
    Rect,
    RotatedRect,
}

impl PrimitiveKind {
    /// Small integer tag read by the scene shader.
    #[inline]
    pub const fn type_code(self) -> u32 {
        match self {
            PrimitiveKind::None => 0,
            PrimitiveKind::Circle => 1,
            PrimitiveKind::Line => 2,
            PrimitiveKind::Triangle => 3,
            PrimitiveKind::Rect => 4,
            PrimitiveKind::RotatedRect => 5,
        }
    }
}

/// A single scene primitive: geometry plus styling.
///
/// `thickness` has two meanings. For a line it is the stroke half-width; for
/// every other shape a positive value turns the filled shape into an outline
/// band of that half-width. Both are the same `outline` transform applied to
/// the base field, so a line cannot be outlined separately.
///
/// No parameter validation happens here. Degenerate input (zero radius,
/// zero-length lines, collapsed triangles) still yields finite distances.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Primitive {
    pub shape: Shape,
    /// 0 keeps sharp corners; a positive radius erodes the field by that amount.
    pub corner_radius: f32,
    /// 0 keeps the shape filled; see the type docs for the line case.
    pub thickness: f32,
    pub color: Color,
}

impl Primitive {
    #[inline]
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            corner_radius: 0.0,
            thickness: 0.0,
            color: Color::WHITE,
        }
    }

    #[inline]
    pub fn none() -> Self {
        Self::new(Shape::None)
    }

    #[inline]
    pub fn circle(center: Vec2, radius: f32) -> Self {
        Self::new(Shape::Circle { center, radius })
    }

    #[inline]
    pub fn line(p1: Vec2, p2: Vec2, thickness: f32) -> Self {
        Self {
            thickness,
            ..Self::new(Shape::Line { a: p1, b: p2 })
        }
    }

    #[inline]
    pub fn triangle(p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        Self::new(Shape::Triangle { a: p1, b: p2, c: p3 })
    }

    /// Axis-aligned box; `size` holds the half extents.
    #[inline]
    pub fn rect(center: Vec2, size: Vec2) -> Self {
        Self::new(Shape::Rect { center, half_extents: size })
    }

    #[inline]
    pub fn rotated_rect(center: Vec2, size: Vec2, rotation_deg: f32) -> Self {
        Self::new(Shape::RotatedRect {
            center,
            half_extents: size,
            rotation_deg,
        })
    }

    // ── builders ──────────────────────────────────────────────────────────

    #[inline]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn with_round_corner(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    #[inline]
    pub fn as_outline(mut self, thickness: f32) -> Self {
        self.thickness = thickness;
        self
    }

    // ── queries ───────────────────────────────────────────────────────────

    pub fn kind(&self) -> PrimitiveKind {
        match self.shape {
            Shape::None => PrimitiveKind::None,
            Shape::Circle { .. } => PrimitiveKind::Circle,
            Shape::Line { .. } => PrimitiveKind::Line,
            Shape::Triangle { .. } => PrimitiveKind::Triangle,
            Shape::Rect { .. } => PrimitiveKind::Rect,
            Shape::RotatedRect { .. } => PrimitiveKind::RotatedRect,
        }
    }

    /// Anchor point: the center for round/box shapes, the first vertex otherwise.
    pub fn center(&self) -> Vec2 {
        match self.shape {
            Shape::None => Vec2::ZERO,
            Shape::Circle { center, .. }
            | Shape::Rect { center, .. }
            | Shape::RotatedRect { center, .. } => center,
            Shape::Line { a, .. } | Shape::Triangle { a, .. } => a,
        }
    }

    /// Base field before rounding/outlining, `None` for an empty primitive.
    pub fn base_distance(&self, p: Vec2) -> Option<f32> {
        let d = match self.shape {
            Shape::None => return None,
            Shape::Circle { center, radius } => distance_to_circle(p, center, radius),
            Shape::Line { a, b } => distance_to_segment(p, a, b),
            Shape::Triangle { a, b, c } => distance_to_triangle(p, a, b, c),
            Shape::Rect { center, half_extents } => distance_to_rect(p, center, half_extents),
            Shape::RotatedRect {
                center,
                half_extents,
                rotation_deg,
            } => distance_to_rotated_rect(p, center, half_extents, rotation_deg),
        };
        Some(d)
    }

    /// Styled field: base distance, then corner rounding, then outline.
    ///
    /// The order matters: outlining first and rounding after would shrink the
    /// band instead of rounding the shape.
    pub fn distance(&self, p: Vec2) -> Option<f32> {
        let mut d = self.base_distance(p)?;
        if self.corner_radius > 0.0 {
            d = rounded(d, self.corner_radius);
        }
        if self.thickness > 0.0 {
            d = outline(d, self.thickness);
        }
        Some(d)
    }

    // ── mutation ──────────────────────────────────────────────────────────

    /// Moves every vertex by `delta`, keeping the shape rigid.
    pub fn translate_by(&mut self, delta: Vec2) {
        match &mut self.shape {
            Shape::None => {}
            Shape::Circle { center, .. }
            | Shape::Rect { center, .. }
            | Shape::RotatedRect { center, .. } => *center += delta,
            Shape::Line { a, b } => {
                *a += delta;
                *b += delta;
            }
            Shape::Triangle { a, b, c } => {
                *a += delta;
                *b += delta;
                *c += delta;
            }
        }
    }

    /// Moves the anchor to `new_center`; other vertices follow by the same delta.
    ///
    /// The anchor is assigned directly so it lands on `new_center` bit-exactly
    /// rather than through `old + (new - old)` rounding.
    pub fn move_to(&mut self, new_center: Vec2) {
        let delta = new_center - self.center();
        match &mut self.shape {
            Shape::None => {}
            Shape::Circle { center, .. }
            | Shape::Rect { center, .. }
            | Shape::RotatedRect { center, .. } => *center = new_center,
            Shape::Line { a, b } => {
                *a = new_center;
                *b += delta;
            }
            Shape::Triangle { a, b, c } => {
                *a = new_center;
                *b += delta;
                *c += delta;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn builders_set_styling() {
        let p = Primitive::rect(v(400.0, 200.0), v(50.0, 60.0))
            .with_color(Color::GREEN.with_alpha(0.8))
            .with_round_corner(10.0)
            .as_outline(2.0);
        assert_eq!(p.corner_radius, 10.0);
        assert_eq!(p.thickness, 2.0);
        assert_eq!(p.color.a, 0.8);
        assert_eq!(p.kind(), PrimitiveKind::Rect);
    }

    #[test]
    fn line_constructor_stores_thickness() {
        let p = Primitive::line(v(0.0, 0.0), v(10.0, 0.0), 3.0);
        assert_eq!(p.thickness, 3.0);
        assert_eq!(p.distance(v(5.0, 5.0)), Some(2.0));
    }

    #[test]
    fn none_has_no_distance() {
        assert_eq!(Primitive::none().distance(v(1.0, 1.0)), None);
        assert_eq!(Primitive::default().kind(), PrimitiveKind::None);
    }

    #[test]
    fn type_codes_are_stable() {
        let codes: Vec<u32> = [
            PrimitiveKind::None,
            PrimitiveKind::Circle,
            PrimitiveKind::Line,
            PrimitiveKind::Triangle,
            PrimitiveKind::Rect,
            PrimitiveKind::RotatedRect,
        ]
        .iter()
        .map(|k| k.type_code())
        .collect();
        assert_eq!(codes, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn rounding_applies_before_outline() {
        let p = Primitive::circle(v(0.0, 0.0), 10.0)
            .with_round_corner(2.0)
            .as_outline(1.0);
        // base = 20 - 10 = 10, rounded = 8, outline = 7
        assert_eq!(p.distance(v(20.0, 0.0)), Some(7.0));
    }

    #[test]
    fn move_to_is_bit_exact_for_circle() {
        let mut p = Primitive::circle(v(0.1, 0.7), 5.0);
        let target = v(0.3, 123.456);
        p.move_to(target);
        assert_eq!(p.center(), target);
    }

    #[test]
    fn move_to_translates_all_triangle_vertices() {
        let (a, b, c) = (v(100.0, 400.0), v(220.0, 330.0), v(180.0, 500.0));
        let mut p = Primitive::triangle(a, b, c);
        let target = v(150.0, 420.0);
        let delta = target - a;
        p.move_to(target);
        let Shape::Triangle { a: na, b: nb, c: nc } = p.shape else {
            panic!("shape changed kind");
        };
        assert_eq!(na, target);
        assert_eq!(nb, b + delta);
        assert_eq!(nc, c + delta);
    }

    #[test]
    fn translate_by_moves_both_line_endpoints() {
        let mut p = Primitive::line(v(0.0, 0.0), v(10.0, 0.0), 1.0);
        p.translate_by(v(5.0, -5.0));
        assert_eq!(p.shape, Shape::Line { a: v(5.0, -5.0), b: v(15.0, -5.0) });
    }
}
