//! The detection engine boundary.

use async_trait::async_trait;

use sightline_core::CameraId;

use crate::error::Result;

/// The native detection engine, reduced to its lifecycle surface.
///
/// The coordinator never observes engine internals and never retries;
/// both calls are fire-and-forget from its perspective. Callers uphold
/// the ordering contract:
///
/// - `start` is invoked only with a camera id obtained from device
///   selection while the permission gate is granted.
/// - `start` is never invoked twice without an intervening `stop`.
/// - `stop` may be invoked at any time, including before any `start`.
#[async_trait]
pub trait DetectionEngine: Send + Sync {
    /// Begin detection on the given camera.
    async fn start(&self, camera: &CameraId) -> Result<()>;

    /// Halt detection and release the camera.
    async fn stop(&self) -> Result<()>;
}
