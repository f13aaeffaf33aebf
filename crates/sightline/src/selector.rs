//! Camera selection over a platform inventory.

use tracing::{debug, warn};

use sightline_core::{pick_back_camera, CameraDevice};
use sightline_platform::CameraInventory;

/// Applies the selection policy to a fresh inventory snapshot.
///
/// The policy itself ([`pick_back_camera`]) is a pure function; this type
/// owns the I/O side of the decision. Every call takes a new snapshot —
/// devices come and go, so nothing is cached across calls.
pub struct CameraSelector<C: CameraInventory> {
    inventory: C,
}

impl<C: CameraInventory> CameraSelector<C> {
    /// Create a selector over the given inventory.
    pub fn new(inventory: C) -> Self {
        Self { inventory }
    }

    /// Pick the back camera the engine should run on.
    ///
    /// Returns `None` when no device qualifies. An enumeration failure is
    /// indistinguishable from an empty device list: the caller gets `None`
    /// either way and the failure is only logged.
    pub async fn select_back_camera(&self) -> Option<CameraDevice> {
        let devices = match self.inventory.enumerate().await {
            Ok(devices) => devices,
            Err(err) => {
                warn!(%err, "camera enumeration failed, treating as no device");
                return None;
            }
        };

        let picked = pick_back_camera(&devices).cloned();
        match &picked {
            Some(device) => debug!(%device, total = devices.len(), "selected back camera"),
            None => debug!(total = devices.len(), "no qualifying back camera"),
        }
        picked
    }
}
