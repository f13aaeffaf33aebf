//! Boundary traits for the platform side of a session.
//!
//! These traits let the lifecycle machinery stay platform-agnostic.
//! Production implementations wrap the OS camera and permission APIs;
//! the in-memory implementations in [`crate::memory`] serve tests and
//! demos.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use sightline_core::{CameraDevice, RequestCode, UserNotice};

use crate::error::Result;

/// The queryable camera subsystem.
#[async_trait]
pub trait CameraInventory: Send + Sync {
    /// Take a fresh snapshot of the available camera devices.
    ///
    /// Snapshots are never cached: each call reflects the devices present
    /// at that moment, in the platform's enumeration order. An error means
    /// the camera service could not be queried, which callers must treat
    /// exactly like an empty snapshot.
    async fn enumerate(&self) -> Result<Vec<CameraDevice>>;
}

/// A permission request handed to the platform.
///
/// The answer does not come back on this call path: the platform delivers
/// it later as a `ControlEvent::Permission` on the session channel,
/// echoing `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRequest {
    /// The permission being requested, e.g. `"camera"`.
    pub permission: String,
    /// Tag the asynchronous result will echo.
    pub code: RequestCode,
}

/// The platform permission subsystem.
#[async_trait]
pub trait PermissionHost: Send + Sync {
    /// Whether the given permission is currently held.
    async fn check_access(&self, permission: &str) -> Result<bool>;

    /// Ask the platform to obtain the given permission.
    ///
    /// Fire-and-forget: the verdict arrives later on the session channel.
    /// A platform that already holds the grant resolves the request
    /// immediately without user interaction.
    async fn request_access(&self, request: PermissionRequest) -> Result<()>;
}

/// The application shell a session reports back to.
///
/// Both operations are fire-and-forget notifications; the shell owns
/// whatever UI or process machinery they map onto.
pub trait HostShell: Send + Sync {
    /// Surface a user-visible notice.
    fn show_notice(&self, notice: &UserNotice);

    /// Ask the shell to tear the session down.
    fn end_session(&self);
}
