//! Error types for platform boundary operations.

use thiserror::Error;

/// Errors surfaced by platform-side implementations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The camera service could not be reached. Callers treat this the
    /// same as an empty device list.
    #[error("camera service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Any other platform-side failure.
    #[error("platform backend error: {0}")]
    Backend(String),

    /// The session event channel is gone; nothing can be delivered.
    #[error("session event channel closed")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, PlatformError>;
