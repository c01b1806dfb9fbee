//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers) and record passes
//! into a caller-provided encoder.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Shaders receive the logical viewport size as a uniform.

pub(crate) mod common;
mod ctx;
pub mod sdf;

pub use ctx::{RenderCtx, RenderTarget};
pub use sdf::{SdfRenderer, SdfRendererConfig};
