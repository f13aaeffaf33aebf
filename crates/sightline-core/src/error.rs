//! Error types for core operations.

use thiserror::Error;

/// Errors from constructing or converting core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A camera identifier must contain at least one character. The platform
    /// encodes "no device" as an empty string; this model keeps absence as
    /// `None` instead.
    #[error("camera identifier must not be empty")]
    EmptyCameraId,

    /// Numeric lens-facing metadata value outside the known set.
    #[error("unknown lens facing value: {0}")]
    UnknownLensFacing(i32),

    /// Numeric hardware-level metadata value outside the known set.
    #[error("unknown hardware tier value: {0}")]
    UnknownHardwareTier(i32),
}

pub type Result<T> = std::result::Result<T, CoreError>;
