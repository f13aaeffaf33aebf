//! The lifecycle controller: the state machine between the application
//! shell and the detection engine.
//!
//! The controller guarantees one property above all others: the engine is
//! started only on a transition path where the permission gate is granted
//! and a concrete device id was just resolved. Everything else — the
//! unconditional stop on backgrounding, the cancellation of pending
//! requests, the discarding of stale grant results — exists to keep that
//! property true across every interleaving of host events.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use sightline_core::{
    ControlEvent, EnginePhase, GrantOutcome, HostEvent, PermissionResponse, UserNotice,
};
use sightline_engine::DetectionEngine;
use sightline_perms::{Ensure, PermissionGate};
use sightline_platform::{CameraInventory, HostShell, PermissionHost};

use crate::error::Result;
use crate::selector::CameraSelector;

/// Configuration for the lifecycle controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// The permission the gate guards.
    pub permission: String,
    /// Whether a granted gate re-probes the host on every foreground.
    pub reverify_on_foreground: bool,
    /// Notice shown when no qualifying camera exists.
    pub no_camera_notice: UserNotice,
    /// Notice shown when the permission is denied.
    pub permission_notice: UserNotice,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            permission: "camera".to_string(),
            reverify_on_foreground: true,
            no_camera_notice: UserNotice::long("Camera probably won't work on this device!"),
            permission_notice: UserNotice::short("This app requires camera permission"),
        }
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEnd {
    /// The user (or the platform) denied the camera permission.
    PermissionDenied,
    /// No back camera meeting the tier policy exists.
    NoUsableCamera,
    /// The shell tore the application down.
    HostDestroyed,
    /// The host dropped its handle; the session detached.
    HostDetached,
}

impl std::fmt::Display for SessionEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::PermissionDenied => "permission_denied",
            Self::NoUsableCamera => "no_usable_camera",
            Self::HostDestroyed => "host_destroyed",
            Self::HostDetached => "host_detached",
        };
        write!(f, "{}", s)
    }
}

/// What handling one event concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The session goes on; feed the next event.
    Continue,
    /// The session is over.
    Ended(SessionEnd),
}

/// The lifecycle controller.
///
/// Owns the permission gate, the camera selector, the engine handle, the
/// shell handle, and the current [`EnginePhase`]. Processes exactly one
/// [`ControlEvent`] at a time; callers serialize events (the session loop
/// does this by construction).
pub struct LifecycleController<P, C, E, H>
where
    P: PermissionHost,
    C: CameraInventory,
    E: DetectionEngine,
    H: HostShell,
{
    gate: PermissionGate<P>,
    selector: CameraSelector<C>,
    engine: E,
    shell: H,
    config: ControllerConfig,
    phase: EnginePhase,
    starts: usize,
    stops: usize,
    discarded_results: usize,
    notices_shown: usize,
}

impl<P, C, E, H> LifecycleController<P, C, E, H>
where
    P: PermissionHost,
    C: CameraInventory,
    E: DetectionEngine,
    H: HostShell,
{
    /// Create a controller over the four collaborators.
    pub fn new(permissions: P, cameras: C, engine: E, shell: H, config: ControllerConfig) -> Self {
        let gate = PermissionGate::new(permissions)
            .with_permission(config.permission.clone())
            .with_reverify(config.reverify_on_foreground);
        Self {
            gate,
            selector: CameraSelector::new(cameras),
            engine,
            shell,
            config,
            phase: EnginePhase::default(),
            starts: 0,
            stops: 0,
            discarded_results: 0,
            notices_shown: 0,
        }
    }

    /// The current lifecycle phase.
    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    /// The permission gate, for inspection.
    pub fn gate(&self) -> &PermissionGate<P> {
        &self.gate
    }

    /// The controller's configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// `start` calls issued so far.
    pub fn starts(&self) -> usize {
        self.starts
    }

    /// `stop` calls issued so far.
    pub fn stops(&self) -> usize {
        self.stops
    }

    /// Stale or repeated grant results discarded so far.
    pub fn discarded_results(&self) -> usize {
        self.discarded_results
    }

    /// Notices surfaced through the shell so far.
    pub fn notices_shown(&self) -> usize {
        self.notices_shown
    }

    /// Process one event to completion.
    pub async fn handle_event(&mut self, event: ControlEvent) -> Result<Step> {
        debug!(phase = %self.phase, ?event, "handling event");
        match event {
            ControlEvent::Host(HostEvent::Foregrounded) => self.on_foreground().await,
            ControlEvent::Host(HostEvent::Backgrounded) => self.on_background().await,
            ControlEvent::Host(HostEvent::Destroyed) => self.on_destroyed().await,
            ControlEvent::Permission(response) => self.on_permission(&response).await,
        }
    }

    async fn on_foreground(&mut self) -> Result<Step> {
        if !self.phase.accepts_foreground() {
            debug!(phase = %self.phase, "foreground ignored, sequence already underway");
            return Ok(Step::Continue);
        }

        self.set_phase(EnginePhase::AwaitingPermission);
        match self.gate.ensure().await? {
            Ensure::Granted => self.acquire_device().await,
            Ensure::Pending(code) => {
                info!(%code, "awaiting permission result");
                Ok(Step::Continue)
            }
            Ensure::AlreadyPending(code) => {
                debug!(%code, "permission request still pending from an earlier foreground");
                Ok(Step::Continue)
            }
        }
    }

    async fn on_permission(&mut self, response: &PermissionResponse) -> Result<Step> {
        match self.gate.resolve(response)? {
            None => {
                self.discarded_results += 1;
                debug!(code = %response.code, "discarded permission result");
                Ok(Step::Continue)
            }
            Some(GrantOutcome::Granted) => {
                if self.phase != EnginePhase::AwaitingPermission {
                    debug!(phase = %self.phase, "grant resolved outside an acquisition sequence");
                    return Ok(Step::Continue);
                }
                self.acquire_device().await
            }
            Some(GrantOutcome::Denied) => {
                self.fail_session(
                    self.config.permission_notice.clone(),
                    SessionEnd::PermissionDenied,
                )
            }
        }
    }

    async fn on_background(&mut self) -> Result<Step> {
        if let Some(code) = self.gate.cancel_pending()? {
            debug!(%code, "backgrounding cancelled the pending permission request");
        }
        // Unconditional from every phase: nothing may hold the camera or
        // the engine while the application is not visible.
        self.stop_engine().await;
        self.set_phase(EnginePhase::Stopped);
        Ok(Step::Continue)
    }

    async fn on_destroyed(&mut self) -> Result<Step> {
        if let Some(code) = self.gate.cancel_pending()? {
            debug!(%code, "teardown cancelled the pending permission request");
        }
        if self.phase.is_running() {
            self.stop_engine().await;
        }
        self.set_phase(EnginePhase::Stopped);
        info!(end = %SessionEnd::HostDestroyed, "session ended");
        Ok(Step::Ended(SessionEnd::HostDestroyed))
    }

    /// Permission is granted; resolve a device and start the engine.
    async fn acquire_device(&mut self) -> Result<Step> {
        self.set_phase(EnginePhase::AwaitingDevice);
        match self.selector.select_back_camera().await {
            Some(device) => {
                self.starts += 1;
                if let Err(err) = self.engine.start(device.id()).await {
                    // Fire-and-forget boundary: the engine is considered
                    // running and the next background stop still applies.
                    warn!(%err, "engine start reported a failure");
                }
                self.set_phase(EnginePhase::Running);
                info!(camera = %device.id(), "engine started");
                Ok(Step::Continue)
            }
            None => self.fail_session(
                self.config.no_camera_notice.clone(),
                SessionEnd::NoUsableCamera,
            ),
        }
    }

    async fn stop_engine(&mut self) {
        self.stops += 1;
        if let Err(err) = self.engine.stop().await {
            // Fail closed: the phase becomes Stopped regardless, so no
            // further start can happen in this lifecycle window.
            warn!(%err, "engine stop reported a failure");
        }
    }

    fn fail_session(&mut self, notice: UserNotice, end: SessionEnd) -> Result<Step> {
        self.shell.show_notice(&notice);
        self.notices_shown += 1;
        self.shell.end_session();
        self.set_phase(EnginePhase::Stopped);
        info!(%end, notice = %notice, "session ended");
        Ok(Step::Ended(end))
    }

    fn set_phase(&mut self, next: EnginePhase) {
        if self.phase != next {
            info!(from = %self.phase, to = %next, "phase transition");
            self.phase = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sightline_core::{CameraDevice, CameraId, HardwareTier, LensFacing};
    use sightline_engine::RecordingEngine;
    use sightline_platform::{MemoryCameras, MemoryPermissions, MemoryShell, PermissionScript};
    use tokio::sync::mpsc;

    type TestController =
        LifecycleController<MemoryPermissions, MemoryCameras, RecordingEngine, MemoryShell>;

    struct Rig {
        controller: TestController,
        engine: RecordingEngine,
        shell: MemoryShell,
        permissions: MemoryPermissions,
        events: mpsc::Receiver<ControlEvent>,
        _tx: mpsc::Sender<ControlEvent>,
    }

    fn rig(script: PermissionScript, devices: Vec<CameraDevice>) -> Rig {
        let (tx, events) = mpsc::channel(16);
        let permissions = MemoryPermissions::new(tx.clone(), script);
        let cameras = MemoryCameras::with_devices(devices);
        let engine = RecordingEngine::new();
        let shell = MemoryShell::new();
        let controller = LifecycleController::new(
            permissions.clone(),
            cameras,
            engine.clone(),
            shell.clone(),
            ControllerConfig::default(),
        );
        Rig {
            controller,
            engine,
            shell,
            permissions,
            events,
            _tx: tx,
        }
    }

    fn back_full(id: &str) -> CameraDevice {
        CameraDevice::new(CameraId::new(id).unwrap(), LensFacing::Back, HardwareTier::Full)
    }

    /// Feed every event the platform has queued back into the controller.
    async fn pump(rig: &mut Rig) -> Step {
        let mut step = Step::Continue;
        while let Ok(event) = rig.events.try_recv() {
            step = rig.controller.handle_event(event).await.unwrap();
        }
        step
    }

    #[tokio::test]
    async fn test_foreground_grant_select_start() {
        let mut rig = rig(PermissionScript::AutoGrant, vec![back_full("7")]);

        rig.controller
            .handle_event(HostEvent::Foregrounded.into())
            .await
            .unwrap();
        assert_eq!(rig.controller.phase(), EnginePhase::AwaitingPermission);

        pump(&mut rig).await;
        assert_eq!(rig.controller.phase(), EnginePhase::Running);
        assert_eq!(rig.engine.start_count(), 1);
        assert_eq!(
            rig.engine.last_started(),
            Some(CameraId::new("7").unwrap())
        );
    }

    #[tokio::test]
    async fn test_foreground_while_running_is_ignored() {
        let mut rig = rig(PermissionScript::AutoGrant, vec![back_full("0")]);

        rig.controller
            .handle_event(HostEvent::Foregrounded.into())
            .await
            .unwrap();
        pump(&mut rig).await;
        assert_eq!(rig.controller.phase(), EnginePhase::Running);

        let step = rig
            .controller
            .handle_event(HostEvent::Foregrounded.into())
            .await
            .unwrap();
        assert_eq!(step, Step::Continue);
        assert_eq!(rig.controller.phase(), EnginePhase::Running);
        assert_eq!(rig.permissions.request_count(), 1);
        assert_eq!(rig.engine.start_count(), 1);
    }

    #[tokio::test]
    async fn test_background_stops_from_every_phase() {
        let mut rig = rig(PermissionScript::Hold, vec![back_full("0")]);

        // Backgrounding straight out of Idle still issues a stop.
        rig.controller
            .handle_event(HostEvent::Backgrounded.into())
            .await
            .unwrap();
        assert_eq!(rig.controller.phase(), EnginePhase::Stopped);
        assert_eq!(rig.engine.stop_count(), 1);
    }

    #[tokio::test]
    async fn test_background_cancels_pending_request() {
        let mut rig = rig(PermissionScript::Hold, vec![back_full("0")]);

        rig.controller
            .handle_event(HostEvent::Foregrounded.into())
            .await
            .unwrap();
        assert_eq!(rig.controller.phase(), EnginePhase::AwaitingPermission);
        let code = rig.permissions.last_request().unwrap().code;

        rig.controller
            .handle_event(HostEvent::Backgrounded.into())
            .await
            .unwrap();
        assert_eq!(rig.controller.phase(), EnginePhase::Stopped);

        // The answer to the cancelled request arrives late: discarded,
        // engine never started.
        let step = rig
            .controller
            .handle_event(sightline_core::PermissionResponse::granted(code).into())
            .await
            .unwrap();
        assert_eq!(step, Step::Continue);
        assert_eq!(rig.controller.discarded_results(), 1);
        assert_eq!(rig.engine.start_count(), 0);
    }

    #[tokio::test]
    async fn test_failing_start_is_still_considered_running() {
        let mut rig = rig(PermissionScript::AutoGrant, vec![back_full("0")]);
        rig.engine.fail_next_start();

        rig.controller
            .handle_event(HostEvent::Foregrounded.into())
            .await
            .unwrap();
        pump(&mut rig).await;

        // The boundary is fire-and-forget: a failed start is logged but
        // the engine is considered running.
        assert_eq!(rig.controller.phase(), EnginePhase::Running);
        assert_eq!(rig.engine.start_count(), 1);

        // The next background still issues exactly one stop.
        rig.controller
            .handle_event(HostEvent::Backgrounded.into())
            .await
            .unwrap();
        assert_eq!(rig.controller.phase(), EnginePhase::Stopped);
        assert_eq!(rig.engine.stop_count(), 1);
        assert!(rig.engine.starts_are_bracketed());
    }

    #[tokio::test]
    async fn test_failing_stop_still_fails_closed() {
        let mut rig = rig(PermissionScript::AutoGrant, vec![back_full("0")]);

        rig.controller
            .handle_event(HostEvent::Foregrounded.into())
            .await
            .unwrap();
        pump(&mut rig).await;
        assert_eq!(rig.controller.phase(), EnginePhase::Running);

        rig.engine.fail_next_stop();
        rig.controller
            .handle_event(HostEvent::Backgrounded.into())
            .await
            .unwrap();
        assert_eq!(rig.controller.phase(), EnginePhase::Stopped);
        assert_eq!(rig.engine.stop_count(), 1);
    }

    #[tokio::test]
    async fn test_destroyed_while_running_stops_and_ends() {
        let mut rig = rig(PermissionScript::AutoGrant, vec![back_full("0")]);

        rig.controller
            .handle_event(HostEvent::Foregrounded.into())
            .await
            .unwrap();
        pump(&mut rig).await;

        let step = rig
            .controller
            .handle_event(HostEvent::Destroyed.into())
            .await
            .unwrap();
        assert_eq!(step, Step::Ended(SessionEnd::HostDestroyed));
        assert_eq!(rig.controller.phase(), EnginePhase::Stopped);
        assert_eq!(rig.engine.stop_count(), 1);
        assert!(rig.engine.starts_are_bracketed());
    }

    #[tokio::test]
    async fn test_denial_shows_notice_and_ends() {
        let mut rig = rig(PermissionScript::AutoDeny, vec![back_full("0")]);

        rig.controller
            .handle_event(HostEvent::Foregrounded.into())
            .await
            .unwrap();
        let step = pump(&mut rig).await;

        assert_eq!(step, Step::Ended(SessionEnd::PermissionDenied));
        assert_eq!(rig.controller.phase(), EnginePhase::Stopped);
        assert_eq!(rig.engine.start_count(), 0);
        assert_eq!(rig.shell.notices().len(), 1);
        assert_eq!(
            rig.shell.notices()[0].text,
            "This app requires camera permission"
        );
        assert!(rig.shell.session_ended());
    }
}
