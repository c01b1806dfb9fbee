use thiserror::Error;

/// Errors raised by the scene engine.
///
/// Capacity and sizing problems are caller or device-limit errors; none of them
/// leave the object buffer partially written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SdfError {
    /// More primitives than the object buffer has slots for.
    #[error("scene has {requested} primitives but the object buffer holds {capacity}")]
    CapacityExceeded { requested: usize, capacity: usize },

    /// The object buffer was configured with zero slots.
    #[error("object buffer capacity must be at least one record")]
    ZeroCapacity,

    /// The object buffer would exceed what the device can bind or allocate.
    #[error("object buffer needs {requested} bytes but the device allows {limit}")]
    BufferTooLarge { requested: u64, limit: u64 },
}
