//! In-memory implementations of the platform boundaries.
//!
//! These serve tests and demos. They are cheaply cloneable; clones share
//! state, so a test can keep a handle for inspection while the lifecycle
//! machinery owns another.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio::sync::mpsc;

use sightline_core::{CameraDevice, ControlEvent, GrantOutcome, PermissionResponse, RequestCode, UserNotice};

use crate::error::{PlatformError, Result};
use crate::traits::{CameraInventory, HostShell, PermissionHost, PermissionRequest};

/// In-memory camera inventory with a settable device list.
#[derive(Clone, Default)]
pub struct MemoryCameras {
    inner: Arc<RwLock<CamerasInner>>,
}

#[derive(Default)]
struct CamerasInner {
    devices: Vec<CameraDevice>,
    unavailable: bool,
    enumerations: usize,
}

impl MemoryCameras {
    /// Create an inventory with no devices.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an inventory pre-populated with the given devices.
    pub fn with_devices(devices: Vec<CameraDevice>) -> Self {
        let cameras = Self::new();
        cameras.set_devices(devices);
        cameras
    }

    /// Replace the device list for subsequent snapshots.
    pub fn set_devices(&self, devices: Vec<CameraDevice>) {
        self.inner.write().unwrap().devices = devices;
    }

    /// Make `enumerate` fail, modelling a dead camera service.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.write().unwrap().unavailable = unavailable;
    }

    /// How many snapshots have been taken.
    pub fn enumeration_count(&self) -> usize {
        self.inner.read().unwrap().enumerations
    }
}

#[async_trait]
impl CameraInventory for MemoryCameras {
    async fn enumerate(&self) -> Result<Vec<CameraDevice>> {
        let mut inner = self.inner.write().unwrap();
        inner.enumerations += 1;
        if inner.unavailable {
            return Err(PlatformError::ServiceUnavailable(
                "camera service not responding".into(),
            ));
        }
        Ok(inner.devices.clone())
    }
}

/// How the in-memory permission host answers requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionScript {
    /// Answer every request with a grant.
    AutoGrant,
    /// Answer every request with a denial.
    AutoDeny,
    /// Answer every request with an empty outcome list.
    AutoMalformed,
    /// Record requests; the test delivers answers via [`MemoryPermissions::deliver`].
    #[default]
    Hold,
    /// Fail the `request_access` call itself.
    RefuseRequests,
}

/// In-memory permission host.
///
/// Scripted answers are pushed onto the session event channel exactly the
/// way a real platform would deliver them, so they queue behind whatever
/// the session is currently handling. The host keeps only a weak sender:
/// once the application shell drops its last handle, the channel closes
/// and the session can observe the detach, no matter how many platform
/// fakes are still alive.
#[derive(Clone)]
pub struct MemoryPermissions {
    inner: Arc<RwLock<PermissionsInner>>,
    events: mpsc::WeakSender<ControlEvent>,
}

struct PermissionsInner {
    script: PermissionScript,
    access: bool,
    probe_unavailable: bool,
    requests: Vec<PermissionRequest>,
}

impl MemoryPermissions {
    /// Create a host that answers per `script`, wired to the session's
    /// event sender.
    pub fn new(events: mpsc::Sender<ControlEvent>, script: PermissionScript) -> Self {
        Self {
            inner: Arc::new(RwLock::new(PermissionsInner {
                script,
                access: false,
                probe_unavailable: false,
                requests: Vec::new(),
            })),
            events: events.downgrade(),
        }
    }

    async fn push(&self, response: PermissionResponse) -> Result<()> {
        let sender = self.events.upgrade().ok_or(PlatformError::ChannelClosed)?;
        sender
            .send(response.into())
            .await
            .map_err(|_| PlatformError::ChannelClosed)
    }

    /// Change the scripted answer for subsequent requests.
    pub fn set_script(&self, script: PermissionScript) {
        self.inner.write().unwrap().script = script;
    }

    /// Set what `check_access` reports.
    pub fn set_access(&self, access: bool) {
        self.inner.write().unwrap().access = access;
    }

    /// Make `check_access` fail, modelling a dead permission service.
    pub fn set_access_unavailable(&self, unavailable: bool) {
        self.inner.write().unwrap().probe_unavailable = unavailable;
    }

    /// How many requests have been issued.
    pub fn request_count(&self) -> usize {
        self.inner.read().unwrap().requests.len()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<PermissionRequest> {
        self.inner.read().unwrap().requests.last().cloned()
    }

    /// Deliver an answer for a held request (or any code, to model a
    /// stale result).
    pub async fn deliver(&self, code: RequestCode, outcomes: Vec<GrantOutcome>) -> Result<()> {
        self.push(PermissionResponse { code, outcomes }).await
    }
}

#[async_trait]
impl PermissionHost for MemoryPermissions {
    async fn check_access(&self, _permission: &str) -> Result<bool> {
        let inner = self.inner.read().unwrap();
        if inner.probe_unavailable {
            return Err(PlatformError::ServiceUnavailable(
                "permission service not responding".into(),
            ));
        }
        Ok(inner.access)
    }

    async fn request_access(&self, request: PermissionRequest) -> Result<()> {
        let response = {
            let mut inner = self.inner.write().unwrap();
            inner.requests.push(request.clone());
            match inner.script {
                PermissionScript::AutoGrant => {
                    // Granting also flips what check_access reports, the
                    // way a real grant would.
                    inner.access = true;
                    Some(PermissionResponse::granted(request.code))
                }
                PermissionScript::AutoDeny => Some(PermissionResponse::denied(request.code)),
                PermissionScript::AutoMalformed => {
                    Some(PermissionResponse::interrupted(request.code))
                }
                PermissionScript::Hold => None,
                PermissionScript::RefuseRequests => {
                    return Err(PlatformError::Backend(
                        "permission service refused the request".into(),
                    ))
                }
            }
        };

        if let Some(response) = response {
            self.push(response).await?;
        }
        Ok(())
    }
}

/// In-memory application shell, recording everything it is told.
#[derive(Clone, Default)]
pub struct MemoryShell {
    inner: Arc<RwLock<ShellInner>>,
}

#[derive(Default)]
struct ShellInner {
    notices: Vec<UserNotice>,
    ended: bool,
}

impl MemoryShell {
    /// Create a shell with nothing recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notice shown so far, in order.
    pub fn notices(&self) -> Vec<UserNotice> {
        self.inner.read().unwrap().notices.clone()
    }

    /// Whether the session was asked to end.
    pub fn session_ended(&self) -> bool {
        self.inner.read().unwrap().ended
    }
}

impl HostShell for MemoryShell {
    fn show_notice(&self, notice: &UserNotice) {
        self.inner.write().unwrap().notices.push(notice.clone());
    }

    fn end_session(&self) {
        self.inner.write().unwrap().ended = true;
    }
}
