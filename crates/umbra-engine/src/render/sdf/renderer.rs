use crate::coords::Viewport;
use crate::error::SdfError;
use crate::render::common::premul_alpha_blend;
use crate::render::{RenderCtx, RenderTarget};
use crate::sdf::{Light, Primitive};

use super::object_buffer::{DEFAULT_CAPACITY, ObjectBuffer};
use super::record::{SceneRecord, SystemUniforms};

/// Construction parameters for [`SdfRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SdfRendererConfig {
    /// Object buffer slots. Refreshing with more primitives is an error.
    pub capacity: usize,
    /// Prefix for every GPU resource label.
    pub label: &'static str,
}

impl Default for SdfRendererConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            label: "umbra sdf",
        }
    }
}

/// Full-screen scene field renderer.
///
/// Owns the evaluator pipeline, the per-draw uniform buffer and the object
/// buffer. Per frame, call [`refresh`](Self::refresh) and then
/// [`render`](Self::render); submitting the frame encoder after the refresh
/// is what orders the upload before the draw.
///
/// The draw loads the target rather than clearing it, so several renderers
/// can stack in one frame (scene, then a debug overlay).
pub struct SdfRenderer {
    label: &'static str,

    pipeline_format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,

    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,

    objects: ObjectBuffer,
}

impl SdfRenderer {
    /// Creates every device resource up front.
    ///
    /// Resource failures are construction errors; nothing is allocated lazily
    /// during a frame.
    pub fn new(ctx: &RenderCtx<'_>, config: SdfRendererConfig) -> Result<Self, SdfError> {
        let label = config.label;
        let objects = ObjectBuffer::new(ctx.device, config.capacity, label)?;

        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("umbra sdf bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<SystemUniforms>() as u64,
                        ),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(SceneRecord::SIZE),
                    },
                    count: None,
                },
            ],
        });

        let uniform_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("umbra sdf uniforms ubo"),
            size: std::mem::size_of::<SystemUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("umbra sdf bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: objects.buffer().as_entire_binding(),
                },
            ],
        });

        let pipeline = create_pipeline(ctx.device, &bind_group_layout, ctx.surface_format);
        log::info!(
            "{label}: pipeline ready (format {:?}, {} record slots)",
            ctx.surface_format,
            objects.capacity()
        );

        Ok(Self {
            label,
            pipeline_format: ctx.surface_format,
            pipeline,
            bind_group_layout,
            bind_group,
            uniform_buffer,
            objects,
        })
    }

    /// Replaces the device-side scene with `primitives`.
    ///
    /// Fails with [`SdfError::CapacityExceeded`] without touching the device
    /// buffer when the list is longer than the configured capacity.
    pub fn refresh(&mut self, ctx: &RenderCtx<'_>, primitives: &[Primitive]) -> Result<(), SdfError> {
        self.objects.refresh(ctx, primitives)
    }

    /// Uniforms for the current frame: viewport, light, and the refreshed count.
    pub fn uniforms(&self, viewport: Viewport, light: &Light) -> SystemUniforms {
        SystemUniforms::new(viewport, light, self.objects.len())
    }

    /// Records the full-screen evaluation pass into `target`.
    ///
    /// `uniforms.primitive_count` is clipped to what the last refresh wrote.
    ///
    /// The uniforms go through `queue.write_buffer`, which lands before the
    /// next submit executes, so every pass this renderer records into one
    /// submit reads the last uniforms written. Call this once per renderer
    /// per submit; stack layers with separate renderers.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, uniforms: &SystemUniforms) {
        self.ensure_pipeline(ctx);

        let mut uniforms = *uniforms;
        let live = self.objects.len() as u32;
        if uniforms.primitive_count > live {
            log::debug!(
                "{}: primitive_count {} clipped to {live} refreshed records",
                self.label,
                uniforms.primitive_count
            );
            uniforms.primitive_count = live;
        }
        ctx.queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("umbra sdf pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.draw(0..6, 0..1);
    }

    /// Object buffer slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.objects.capacity()
    }

    /// Primitives written by the last refresh.
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The object buffer, for inspection and readback.
    #[inline]
    pub fn objects(&self) -> &ObjectBuffer {
        &self.objects
    }

    /// Releases device memory. Call once, before the device is dropped.
    pub fn destroy(self) {
        log::debug!("{}: destroyed", self.label);
        self.uniform_buffer.destroy();
        self.objects.destroy();
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == ctx.surface_format {
            return;
        }
        log::debug!(
            "{}: surface format changed {:?} -> {:?}, rebuilding pipeline",
            self.label,
            self.pipeline_format,
            ctx.surface_format
        );
        self.pipeline = create_pipeline(ctx.device, &self.bind_group_layout, ctx.surface_format);
        self.pipeline_format = ctx.surface_format;
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("umbra sdf shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sdf.wgsl").into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("umbra sdf pipeline layout"),
        bind_group_layouts: &[bind_group_layout],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("umbra sdf pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(premul_alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
