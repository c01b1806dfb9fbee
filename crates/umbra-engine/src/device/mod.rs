//! GPU device + surface management.
//!
//! Creates the wgpu device/queue, configures the window surface and hands out
//! per-frame encoders. `HeadlessGpu` covers the surface-less case.

mod gpu;

pub use gpu::{Gpu, GpuFrame, GpuInit, HeadlessGpu, SurfaceErrorAction};
