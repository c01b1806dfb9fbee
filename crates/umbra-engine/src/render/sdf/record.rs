//! Device-side data layouts for the scene shader.

use bytemuck::{Pod, Zeroable};

use crate::coords::Viewport;
use crate::sdf::{Light, Primitive, Shape};

/// Fixed-layout mirror of a [`Primitive`] as stored in the object buffer.
///
/// Layout (64 bytes, four 16-byte quads, matches `SceneRecord` in `sdf.wgsl`):
///
///  offset  0  type_code      u32
///  offset  4  radius         f32
///  offset  8  center         [f32; 2]
///  offset 16  v2             [f32; 2]
///  offset 24  v3             [f32; 2]
///  offset 32  corner_radius  f32
///  offset 36  rotation       f32   (degrees)
///  offset 40  thickness      f32
///  offset 44  _pad           f32
///  offset 48  color          [f32; 4]
///
/// Only ever produced from a `Primitive`; see `From<&Primitive>`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SceneRecord {
    pub type_code: u32,
    pub radius: f32,
    pub center: [f32; 2],
    pub v2: [f32; 2],
    pub v3: [f32; 2],
    pub corner_radius: f32,
    pub rotation: f32,
    pub thickness: f32,
    pub _pad: f32,
    pub color: [f32; 4],
}

impl SceneRecord {
    /// Size of one record in bytes.
    pub const SIZE: u64 = std::mem::size_of::<SceneRecord>() as u64;
}

impl From<&Primitive> for SceneRecord {
    fn from(prim: &Primitive) -> Self {
        let mut rec = SceneRecord {
            type_code: prim.kind().type_code(),
            corner_radius: prim.corner_radius,
            thickness: prim.thickness,
            color: prim.color.to_array(),
            ..SceneRecord::zeroed()
        };

        match prim.shape {
            Shape::None => {}
            Shape::Circle { center, radius } => {
                rec.center = center.to_array();
                rec.radius = radius;
            }
            Shape::Line { a, b } => {
                rec.center = a.to_array();
                rec.v2 = b.to_array();
            }
            Shape::Triangle { a, b, c } => {
                rec.center = a.to_array();
                rec.v2 = b.to_array();
                rec.v3 = c.to_array();
            }
            Shape::Rect { center, half_extents } => {
                rec.center = center.to_array();
                rec.v2 = half_extents.to_array();
            }
            Shape::RotatedRect {
                center,
                half_extents,
                rotation_deg,
            } => {
                rec.center = center.to_array();
                rec.v2 = half_extents.to_array();
                rec.rotation = rotation_deg;
            }
        }

        rec
    }
}

/// Per-draw uniforms for the scene shader (48 bytes, matches `SystemUniforms` in `sdf.wgsl`).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SystemUniforms {
    pub screen_size: [f32; 2],
    pub light_pos: [f32; 2],
    pub light_color: [f32; 4],
    pub light_max_distance: f32,
    pub primitive_count: u32,
    pub _pad: [f32; 2], // 16-byte alignment
}

impl SystemUniforms {
    /// Rebuilds the uniforms for a frame.
    pub fn new(viewport: Viewport, light: &Light, primitive_count: usize) -> Self {
        Self {
            screen_size: viewport.size().to_array(),
            light_pos: light.pos.to_array(),
            light_color: light.color.to_array(),
            light_max_distance: light.max_distance,
            primitive_count: primitive_count.min(u32::MAX as usize) as u32,
            _pad: [0.0; 2],
        }
    }
}
