//! Device side of the scene engine.
//!
//! - `record`: byte layouts shared with `shaders/sdf.wgsl`
//! - `object_buffer`: fixed-capacity storage buffer, fully rewritten per refresh
//! - `renderer`: pipeline + uniforms + the full-screen evaluation draw

mod object_buffer;
mod record;
mod renderer;

pub use object_buffer::{DEFAULT_CAPACITY, ObjectBuffer, encode_records};
pub use record::{SceneRecord, SystemUniforms};
pub use renderer::{SdfRenderer, SdfRendererConfig};
