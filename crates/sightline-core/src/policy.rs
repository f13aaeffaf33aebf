//! The camera selection policy.
//!
//! Pure function over an inventory snapshot so it can be tested without
//! any platform in the loop. The controller applies it through the
//! selector, which owns the I/O side.

use crate::device::{CameraDevice, LensFacing};

/// Pick the camera the engine should run on.
///
/// Returns the first device in enumeration order that faces back and is
/// not of the legacy tier, or `None` when no device qualifies. The policy
/// is deterministic: the same snapshot always yields the same pick.
pub fn pick_back_camera(devices: &[CameraDevice]) -> Option<&CameraDevice> {
    devices
        .iter()
        .find(|d| d.facing() == LensFacing::Back && !d.tier().is_legacy())
}
