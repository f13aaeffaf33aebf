//! Error types for the engine boundary.

use thiserror::Error;

use sightline_core::CameraId;

/// Errors an engine implementation may report.
///
/// The controller logs these and moves on; the boundary is
/// fire-and-forget, so there is no retry path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The engine could not start on the given camera.
    #[error("engine failed to start on camera {camera}: {reason}")]
    StartFailed { camera: CameraId, reason: String },

    /// The engine could not stop cleanly.
    #[error("engine failed to stop: {reason}")]
    StopFailed { reason: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
