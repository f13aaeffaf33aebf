//! The event session: one channel, one loop, one controller.
//!
//! All inputs — host visibility changes and platform grant results —
//! arrive as [`ControlEvent`] values on a single bounded channel. The
//! session receives one event, drives the controller to completion on it,
//! then receives the next. The channel is the pending-event queue: arrival
//! order is processing order, and nothing is handled mid-transition.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info};

use sightline_core::{ControlEvent, EnginePhase, HostEvent};
use sightline_engine::DetectionEngine;
use sightline_platform::{CameraInventory, HostShell, PermissionHost};

use crate::controller::{LifecycleController, SessionEnd, Step};
use crate::error::{LifecycleError, Result};

/// Default event channel capacity.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// What a finished session looked like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    /// Engine `start` calls issued.
    pub starts: usize,
    /// Engine `stop` calls issued.
    pub stops: usize,
    /// Stale or repeated grant results discarded.
    pub discarded_results: usize,
    /// User notices surfaced through the shell.
    pub notices_shown: usize,
    /// The phase the session ended in (`Stopped` on every path).
    pub final_phase: EnginePhase,
    /// Why the session ended.
    pub end: SessionEnd,
}

/// The host's sending side of a session.
///
/// Cheap to clone; every clone feeds the same session. Sends fail with
/// [`LifecycleError::SessionClosed`] once the session is gone.
#[derive(Clone)]
pub struct HostHandle {
    events: mpsc::Sender<ControlEvent>,
}

impl HostHandle {
    /// Wrap an existing sender.
    pub fn new(events: mpsc::Sender<ControlEvent>) -> Self {
        Self { events }
    }

    /// Report that the application became visible.
    pub async fn foreground(&self) -> Result<()> {
        self.send(HostEvent::Foregrounded).await
    }

    /// Report that the application left the foreground.
    pub async fn background(&self) -> Result<()> {
        self.send(HostEvent::Backgrounded).await
    }

    /// Report that the shell is tearing the application down.
    pub async fn destroy(&self) -> Result<()> {
        self.send(HostEvent::Destroyed).await
    }

    /// Feed an arbitrary event into the session.
    pub async fn send(&self, event: impl Into<ControlEvent>) -> Result<()> {
        self.events
            .send(event.into())
            .await
            .map_err(|_| LifecycleError::SessionClosed)
    }

    /// A raw sender clone, for wiring platform adapters that deliver
    /// grant results onto the same channel.
    pub fn sender(&self) -> mpsc::Sender<ControlEvent> {
        self.events.clone()
    }
}

/// One lifecycle session: the controller plus the receiving end of its
/// event channel.
pub struct LifecycleSession<P, C, E, H>
where
    P: PermissionHost,
    C: CameraInventory,
    E: DetectionEngine,
    H: HostShell,
{
    controller: LifecycleController<P, C, E, H>,
    events: mpsc::Receiver<ControlEvent>,
}

impl<P, C, E, H> LifecycleSession<P, C, E, H>
where
    P: PermissionHost,
    C: CameraInventory,
    E: DetectionEngine,
    H: HostShell,
{
    /// Create the event channel for a session.
    ///
    /// Done before the session itself exists so the platform side can be
    /// built around a sender clone (grant results arrive on this channel).
    pub fn channel(capacity: usize) -> (HostHandle, mpsc::Receiver<ControlEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (HostHandle::new(tx), rx)
    }

    /// Assemble a session from a controller and the channel's receiver.
    pub fn new(
        controller: LifecycleController<P, C, E, H>,
        events: mpsc::Receiver<ControlEvent>,
    ) -> Self {
        Self { controller, events }
    }

    /// Run the session to completion.
    ///
    /// Receives and handles events until the controller ends the session
    /// or the channel closes. Channel closure is the detach path: the host
    /// dropped its last handle, so a final backgrounding is synthesized
    /// (issuing the unconditional stop) and the session ends with
    /// [`SessionEnd::HostDetached`].
    pub async fn run(mut self) -> Result<SessionReport> {
        loop {
            match self.events.recv().await {
                Some(event) => match self.controller.handle_event(event).await? {
                    Step::Continue => {}
                    Step::Ended(end) => return Ok(self.report(end)),
                },
                None => {
                    debug!("event channel closed, detaching");
                    if !self.controller.phase().is_stopped() {
                        self.controller
                            .handle_event(HostEvent::Backgrounded.into())
                            .await?;
                    }
                    return Ok(self.report(SessionEnd::HostDetached));
                }
            }
        }
    }

    fn report(&self, end: SessionEnd) -> SessionReport {
        let report = SessionReport {
            starts: self.controller.starts(),
            stops: self.controller.stops(),
            discarded_results: self.controller.discarded_results(),
            notices_shown: self.controller.notices_shown(),
            final_phase: self.controller.phase(),
            end,
        };
        info!(?report, "session finished");
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ControllerConfig;
    use sightline_core::{CameraDevice, CameraId, HardwareTier, LensFacing};
    use sightline_engine::RecordingEngine;
    use sightline_platform::{MemoryCameras, MemoryPermissions, MemoryShell, PermissionScript};

    type TestSession =
        LifecycleSession<MemoryPermissions, MemoryCameras, RecordingEngine, MemoryShell>;

    fn back_camera(id: &str) -> CameraDevice {
        CameraDevice::new(CameraId::new(id).unwrap(), LensFacing::Back, HardwareTier::Full)
    }

    fn session(
        script: PermissionScript,
        devices: Vec<CameraDevice>,
    ) -> (TestSession, HostHandle, RecordingEngine) {
        let (handle, events) = TestSession::channel(DEFAULT_CHANNEL_CAPACITY);
        let permissions = MemoryPermissions::new(handle.sender(), script);
        let engine = RecordingEngine::new();
        let controller = LifecycleController::new(
            permissions,
            MemoryCameras::with_devices(devices),
            engine.clone(),
            MemoryShell::new(),
            ControllerConfig::default(),
        );
        (TestSession::new(controller, events), handle, engine)
    }

    #[tokio::test]
    async fn test_destroy_ends_the_session() {
        let (session, handle, _engine) = session(PermissionScript::Hold, vec![]);

        let task = tokio::spawn(session.run());
        handle.destroy().await.unwrap();

        let report = task.await.unwrap().unwrap();
        assert_eq!(report.end, SessionEnd::HostDestroyed);
        assert_eq!(report.final_phase, EnginePhase::Stopped);
    }

    #[tokio::test]
    async fn test_detach_synthesizes_a_stop() {
        let (session, handle, engine) = session(PermissionScript::Hold, vec![back_camera("0")]);

        // Dropping the only handle closes the channel; the session must
        // still leave the world stopped.
        drop(handle);
        let report = session.run().await.unwrap();

        assert_eq!(report.end, SessionEnd::HostDetached);
        assert_eq!(report.final_phase, EnginePhase::Stopped);
        assert_eq!(engine.stop_count(), 1);
    }

    #[tokio::test]
    async fn test_queued_events_processed_in_arrival_order() {
        let (session, handle, engine) = session(PermissionScript::Hold, vec![back_camera("0")]);

        // Queue a full foreground/background pair before the loop starts;
        // order on the channel is the order applied.
        handle.foreground().await.unwrap();
        handle.background().await.unwrap();
        handle.destroy().await.unwrap();

        let report = session.run().await.unwrap();
        assert_eq!(report.end, SessionEnd::HostDestroyed);
        assert_eq!(engine.start_count(), 0);
        // One stop from the background event; destroy found nothing running.
        assert_eq!(report.stops, 1);
    }

    #[tokio::test]
    async fn test_sends_fail_after_session_ends() {
        let (session, handle, _engine) = session(PermissionScript::Hold, vec![]);

        let task = tokio::spawn(session.run());
        handle.destroy().await.unwrap();
        task.await.unwrap().unwrap();

        let err = handle.foreground().await.unwrap_err();
        assert!(matches!(err, LifecycleError::SessionClosed));
    }
}
