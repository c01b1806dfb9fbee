//! Coordinate types shared by the distance-field math and the renderers.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! The scene shader reconstructs the same space from the full-screen UV and
//! the `screen_size` uniform, so host and device agree on every coordinate.

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;
