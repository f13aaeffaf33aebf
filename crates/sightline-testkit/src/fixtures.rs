//! Test fixtures and helpers.
//!
//! Common setup code for lifecycle tests: a fully wired in-memory session
//! plus device constructors.

use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

use sightline_core::{CameraDevice, CameraId, HardwareTier, LensFacing};
use sightline_engine::RecordingEngine;
use sightline_platform::{MemoryCameras, MemoryPermissions, MemoryShell, PermissionScript};

use sightline::{
    ControllerConfig, HostHandle, LifecycleController, LifecycleError, LifecycleSession,
    SessionReport, DEFAULT_CHANNEL_CAPACITY,
};

type Session = LifecycleSession<MemoryPermissions, MemoryCameras, RecordingEngine, MemoryShell>;
type Controller =
    LifecycleController<MemoryPermissions, MemoryCameras, RecordingEngine, MemoryShell>;

/// A back-facing, full-tier device.
pub fn back_camera(id: &str) -> CameraDevice {
    CameraDevice::new(
        CameraId::new(id).expect("non-empty id"),
        LensFacing::Back,
        HardwareTier::Full,
    )
}

/// A back-facing device on the legacy shim (never selected).
pub fn legacy_back_camera(id: &str) -> CameraDevice {
    CameraDevice::new(
        CameraId::new(id).expect("non-empty id"),
        LensFacing::Back,
        HardwareTier::Legacy,
    )
}

/// A front-facing, full-tier device (never selected).
pub fn front_camera(id: &str) -> CameraDevice {
    CameraDevice::new(
        CameraId::new(id).expect("non-empty id"),
        LensFacing::Front,
        HardwareTier::Full,
    )
}

/// A fully wired in-memory session, ready to spawn.
///
/// Every fake is shared: the fixture keeps one handle for inspection while
/// the session machinery owns another.
pub struct SessionFixture {
    pub cameras: MemoryCameras,
    pub permissions: MemoryPermissions,
    pub shell: MemoryShell,
    pub engine: RecordingEngine,
    pub handle: HostHandle,
    session: Session,
    devices: Vec<CameraDevice>,
}

impl SessionFixture {
    /// Create a fixture whose permission host answers per `script`.
    pub fn new(script: PermissionScript) -> Self {
        Self::with_config(script, ControllerConfig::default())
    }

    /// Create a fixture with a custom controller configuration.
    pub fn with_config(script: PermissionScript, config: ControllerConfig) -> Self {
        let (handle, events) = Session::channel(DEFAULT_CHANNEL_CAPACITY);
        let cameras = MemoryCameras::new();
        let permissions = MemoryPermissions::new(handle.sender(), script);
        let shell = MemoryShell::new();
        let engine = RecordingEngine::new();
        let controller: Controller = LifecycleController::new(
            permissions.clone(),
            cameras.clone(),
            engine.clone(),
            shell.clone(),
            config,
        );
        let session = Session::new(controller, events);
        Self {
            cameras,
            permissions,
            shell,
            engine,
            handle,
            session,
            devices: Vec::new(),
        }
    }

    /// Add a device to the inventory, in enumeration order.
    pub fn push_device(&mut self, device: CameraDevice) -> &mut Self {
        self.devices.push(device);
        self.cameras.set_devices(self.devices.clone());
        self
    }

    /// Spawn the session task.
    pub fn spawn(self) -> RunningSession {
        let task = tokio::spawn(self.session.run());
        RunningSession {
            cameras: self.cameras,
            permissions: self.permissions,
            shell: self.shell,
            engine: self.engine,
            handle: self.handle,
            task,
        }
    }
}

/// A spawned session plus inspection handles on all of its fakes.
pub struct RunningSession {
    pub cameras: MemoryCameras,
    pub permissions: MemoryPermissions,
    pub shell: MemoryShell,
    pub engine: RecordingEngine,
    pub handle: HostHandle,
    task: JoinHandle<Result<SessionReport, LifecycleError>>,
}

impl RunningSession {
    /// Poll until the condition holds; panics after two seconds.
    pub async fn wait_for(&self, what: &str, cond: impl Fn() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if cond() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("timed out waiting for: {}", what);
    }

    /// Detach: drop the host handle and collect the report.
    pub async fn finish(self) -> SessionReport {
        drop(self.handle);
        self.task
            .await
            .expect("session task panicked")
            .expect("session returned an error")
    }

    /// Wait for the session to end on its own (denial, no camera, destroy).
    pub async fn ended(self) -> SessionReport {
        self.task
            .await
            .expect("session task panicked")
            .expect("session returned an error")
    }
}
