//! Scripted lifecycle scenarios with a run-all verifier.
//!
//! Each scenario names a platform script, a device roster, and a run of
//! host events, plus what the finished session must look like. The driver
//! feeds events to a controller directly and pumps scripted platform
//! answers between them, so every run is fully deterministic.

use tokio::sync::mpsc;

use sightline_core::{CameraDevice, ControlEvent, EnginePhase, HostEvent};
use sightline_engine::RecordingEngine;
use sightline_platform::{MemoryCameras, MemoryPermissions, MemoryShell, PermissionScript};

use sightline::{
    ControllerConfig, LifecycleController, LifecycleError, SessionEnd, SessionReport, Step,
};

use crate::fixtures::{back_camera, front_camera, legacy_back_camera};

/// One named lifecycle scenario.
#[derive(Debug, Clone)]
pub struct LifecycleScenario {
    /// Human-readable name for the scenario.
    pub name: &'static str,
    /// How the platform answers permission requests.
    pub script: PermissionScript,
    /// The device roster the inventory reports.
    pub devices: Vec<CameraDevice>,
    /// Host events, in arrival order.
    pub host_events: Vec<HostEvent>,
    /// Expected session ending.
    pub expect_end: SessionEnd,
    /// Expected number of engine starts.
    pub expect_starts: usize,
    /// Expected number of engine stops.
    pub expect_stops: usize,
    /// Expected number of user notices.
    pub expect_notices: usize,
}

/// Everything a finished scenario run exposes for inspection.
pub struct ScenarioOutcome {
    pub report: SessionReport,
    pub engine: RecordingEngine,
    pub shell: MemoryShell,
    pub permissions: MemoryPermissions,
}

impl ScenarioOutcome {
    /// The report as pretty JSON, for dumps and diffs.
    pub fn report_json(&self) -> String {
        serde_json::to_string_pretty(&self.report).expect("reports are serializable")
    }
}

/// Get all scripted scenarios.
pub fn all_scenarios() -> Vec<LifecycleScenario> {
    vec![
        LifecycleScenario {
            name: "grant, select, run, teardown",
            script: PermissionScript::AutoGrant,
            devices: vec![front_camera("front"), back_camera("back")],
            host_events: vec![HostEvent::Foregrounded, HostEvent::Destroyed],
            expect_end: SessionEnd::HostDestroyed,
            expect_starts: 1,
            expect_stops: 1,
            expect_notices: 0,
        },
        LifecycleScenario {
            name: "permission denied ends the session",
            script: PermissionScript::AutoDeny,
            devices: vec![back_camera("back")],
            host_events: vec![HostEvent::Foregrounded],
            expect_end: SessionEnd::PermissionDenied,
            expect_starts: 0,
            expect_stops: 0,
            expect_notices: 1,
        },
        LifecycleScenario {
            name: "granted but no cameras at all",
            script: PermissionScript::AutoGrant,
            devices: vec![],
            host_events: vec![HostEvent::Foregrounded],
            expect_end: SessionEnd::NoUsableCamera,
            expect_starts: 0,
            expect_stops: 0,
            expect_notices: 1,
        },
        LifecycleScenario {
            name: "only legacy back cameras do not qualify",
            script: PermissionScript::AutoGrant,
            devices: vec![front_camera("front"), legacy_back_camera("legacy")],
            host_events: vec![HostEvent::Foregrounded],
            expect_end: SessionEnd::NoUsableCamera,
            expect_starts: 0,
            expect_stops: 0,
            expect_notices: 1,
        },
        LifecycleScenario {
            name: "background stops, foreground restarts",
            script: PermissionScript::AutoGrant,
            devices: vec![back_camera("back")],
            host_events: vec![
                HostEvent::Foregrounded,
                HostEvent::Backgrounded,
                HostEvent::Foregrounded,
                HostEvent::Destroyed,
            ],
            expect_end: SessionEnd::HostDestroyed,
            expect_starts: 2,
            expect_stops: 2,
            expect_notices: 0,
        },
        LifecycleScenario {
            name: "malformed grant result is a denial",
            script: PermissionScript::AutoMalformed,
            devices: vec![back_camera("back")],
            host_events: vec![HostEvent::Foregrounded],
            expect_end: SessionEnd::PermissionDenied,
            expect_starts: 0,
            expect_stops: 0,
            expect_notices: 1,
        },
        LifecycleScenario {
            name: "unanswered request cancelled by background",
            script: PermissionScript::Hold,
            devices: vec![back_camera("back")],
            host_events: vec![
                HostEvent::Foregrounded,
                HostEvent::Backgrounded,
                HostEvent::Destroyed,
            ],
            expect_end: SessionEnd::HostDestroyed,
            expect_starts: 0,
            expect_stops: 1,
            expect_notices: 0,
        },
    ]
}

/// Run one scenario to completion.
///
/// Feeds each host event to the controller, then pumps every platform
/// answer already queued before the next host event. Scenarios that do
/// not end themselves must end in [`HostEvent::Destroyed`].
pub async fn run_scenario(
    scenario: &LifecycleScenario,
) -> Result<ScenarioOutcome, LifecycleError> {
    let (tx, mut rx) = mpsc::channel::<ControlEvent>(32);
    let permissions = MemoryPermissions::new(tx.clone(), scenario.script);
    let cameras = MemoryCameras::with_devices(scenario.devices.clone());
    let engine = RecordingEngine::new();
    let shell = MemoryShell::new();
    let mut controller = LifecycleController::new(
        permissions.clone(),
        cameras,
        engine.clone(),
        shell.clone(),
        ControllerConfig::default(),
    );

    let mut end = None;
    'script: for host_event in &scenario.host_events {
        let mut step = controller.handle_event((*host_event).into()).await?;
        loop {
            if let Step::Ended(reason) = step {
                end = Some(reason);
                break 'script;
            }
            match rx.try_recv() {
                Ok(event) => step = controller.handle_event(event).await?,
                Err(_) => break,
            }
        }
    }

    let end = end.unwrap_or_else(|| {
        panic!(
            "scenario '{}' never ended; scripts must end in Destroyed",
            scenario.name
        )
    });
    let report = SessionReport {
        starts: controller.starts(),
        stops: controller.stops(),
        discarded_results: controller.discarded_results(),
        notices_shown: controller.notices_shown(),
        final_phase: controller.phase(),
        end,
    };
    Ok(ScenarioOutcome {
        report,
        engine,
        shell,
        permissions,
    })
}

/// Run every scenario and report which ones met their expectations.
pub async fn verify_all_scenarios() -> Result<Vec<(String, bool)>, LifecycleError> {
    let mut results = Vec::new();
    for scenario in all_scenarios() {
        let outcome = run_scenario(&scenario).await?;
        let report = &outcome.report;
        let ok = report.end == scenario.expect_end
            && report.starts == scenario.expect_starts
            && report.stops == scenario.expect_stops
            && report.notices_shown == scenario.expect_notices
            && report.final_phase == EnginePhase::Stopped
            && outcome.engine.starts_are_bracketed();
        results.push((scenario.name.to_string(), ok));
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::HostScript;
    use proptest::prelude::*;

    #[tokio::test]
    async fn test_all_scenarios_meet_expectations() {
        for (name, ok) in verify_all_scenarios().await.unwrap() {
            assert!(ok, "scenario failed: {}", name);
        }
    }

    #[tokio::test]
    async fn test_outcome_dumps_as_json() {
        let scenarios = all_scenarios();
        let outcome = run_scenario(&scenarios[0]).await.unwrap();
        let json = outcome.report_json();
        assert!(json.contains("\"end\": \"host_destroyed\""));
    }

    proptest! {
        /// Under any interleaving of visibility events, every running
        /// period is closed by a stop before the next start, and the
        /// session always lands in Stopped.
        #[test]
        fn prop_starts_stay_bracketed(script in any::<HostScript>()) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .expect("runtime");
            runtime.block_on(async {
                let scenario = LifecycleScenario {
                    name: "generated visibility run",
                    script: PermissionScript::AutoGrant,
                    devices: vec![back_camera("back")],
                    host_events: script.events.clone(),
                    expect_end: SessionEnd::HostDestroyed,
                    expect_starts: 0,
                    expect_stops: 0,
                    expect_notices: 0,
                };
                let outcome = run_scenario(&scenario).await.expect("scenario run");
                assert!(outcome.engine.starts_are_bracketed());
                assert_eq!(outcome.report.final_phase, EnginePhase::Stopped);
                assert_eq!(outcome.report.end, SessionEnd::HostDestroyed);
            });
        }
    }
}
