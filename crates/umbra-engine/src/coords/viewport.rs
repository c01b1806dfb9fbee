use super::Vec2;

/// Viewport size in logical pixels.
///
/// Uploaded as `screen_size` in the scene uniforms; the fragment stage maps its
/// full-screen UV onto this extent to recover scene coordinates.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Size as a vector, clamped to at least one pixel per axis.
    #[inline]
    pub fn size(self) -> Vec2 {
        Vec2::new(self.width.max(1.0), self.height.max(1.0))
    }
}
