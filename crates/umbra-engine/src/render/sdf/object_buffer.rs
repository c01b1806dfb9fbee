use wgpu::util::DeviceExt;

use crate::error::SdfError;
use crate::render::RenderCtx;
use crate::sdf::Primitive;

use super::record::SceneRecord;

/// Record slots allocated when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Converts `primitives` into scene records, rejecting lists longer than `capacity`.
///
/// `out` is cleared first and reused so steady-state refreshes do not allocate.
pub fn encode_records(
    primitives: &[Primitive],
    capacity: usize,
    out: &mut Vec<SceneRecord>,
) -> Result<(), SdfError> {
    if primitives.len() > capacity {
        return Err(SdfError::CapacityExceeded {
            requested: primitives.len(),
            capacity,
        });
    }
    out.clear();
    out.extend(primitives.iter().map(SceneRecord::from));
    Ok(())
}

/// Fixed-capacity, device-resident array of [`SceneRecord`]s.
///
/// Every [`refresh`](Self::refresh) overwrites the prefix `[0, len)` in full:
/// no diffing, no partial updates. Slots past `len` keep whatever an earlier
/// frame left there and are never read, because the renderer clips the shader
/// loop to `len`.
pub struct ObjectBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    len: usize,
    staging: Vec<SceneRecord>,
    label: &'static str,
}

impl ObjectBuffer {
    /// Allocates storage for `capacity` records.
    ///
    /// Fails when `capacity` is zero or the buffer would exceed the device's
    /// storage binding or buffer size limits.
    pub fn new(device: &wgpu::Device, capacity: usize, label: &'static str) -> Result<Self, SdfError> {
        if capacity == 0 {
            return Err(SdfError::ZeroCapacity);
        }

        let size = (capacity as u64).saturating_mul(SceneRecord::SIZE);
        let limits = device.limits();
        let limit = (limits.max_storage_buffer_binding_size as u64).min(limits.max_buffer_size);
        if size > limit {
            return Err(SdfError::BufferTooLarge { requested: size, limit });
        }

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: wgpu::BufferUsages::STORAGE
                | wgpu::BufferUsages::COPY_DST
                | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });

        log::info!("{label}: allocated {capacity} record slots ({size} bytes)");

        Ok(Self {
            buffer,
            capacity,
            len: 0,
            staging: Vec::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            label,
        })
    }

    /// Uploads `primitives` as the new buffer contents.
    ///
    /// The records go through a transient upload buffer and a copy recorded in
    /// its own command submission. Queue order guarantees the copy lands before
    /// any draw submitted afterwards reads the buffer, so callers only need to
    /// refresh before rendering within the frame.
    ///
    /// On `CapacityExceeded` nothing is written and the previous contents stay live.
    pub fn refresh(&mut self, ctx: &RenderCtx<'_>, primitives: &[Primitive]) -> Result<(), SdfError> {
        if let Err(err) = encode_records(primitives, self.capacity, &mut self.staging) {
            log::warn!("{}: refresh rejected: {err}", self.label);
            return Err(err);
        }

        self.len = self.staging.len();
        if self.staging.is_empty() {
            return Ok(());
        }

        let bytes: &[u8] = bytemuck::cast_slice(&self.staging);
        log::trace!("{}: uploading {} records ({} bytes)", self.label, self.len, bytes.len());

        let upload = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("umbra object upload buffer"),
            contents: bytes,
            usage: wgpu::BufferUsages::COPY_SRC,
        });

        let mut encoder = ctx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("umbra object upload encoder"),
        });
        encoder.copy_buffer_to_buffer(&upload, 0, &self.buffer, 0, bytes.len() as u64);
        ctx.queue.submit(std::iter::once(encoder.finish()));

        Ok(())
    }

    /// The device buffer, bound read-only by the scene pipeline.
    #[inline]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Slots allocated on the device.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records written by the most recent refresh.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Records staged by the most recent refresh, exactly as uploaded.
    #[inline]
    pub fn staged(&self) -> &[SceneRecord] {
        &self.staging
    }

    /// Releases the device memory.
    pub fn destroy(self) {
        self.buffer.destroy();
    }
}
