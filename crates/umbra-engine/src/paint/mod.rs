//! Color model shared between primitives and renderers.
//!
//! Geometry types remain in `coords`.

pub mod color;

pub use color::Color;
