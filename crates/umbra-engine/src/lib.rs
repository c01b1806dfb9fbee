//! Umbra engine crate.
//!
//! 2-D signed-distance-field scenes: the primitive model and its CPU-side
//! math (`sdf`), the wgpu object buffer and full-screen evaluator
//! (`render::sdf`), and the thin winit/wgpu platform layer a frame loop needs.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod sdf;

mod error;

pub use error::SdfError;
