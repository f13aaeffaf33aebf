//! One full foreground/background cycle against an in-memory platform.
//!
//! Run with: `cargo run --example foreground_cycle`

use std::time::Duration;

use anyhow::Result;

use sightline::engine::RecordingEngine;
use sightline::platform::{MemoryCameras, MemoryPermissions, MemoryShell, PermissionScript};
use sightline::{
    CameraDevice, CameraId, ControllerConfig, HardwareTier, LensFacing, LifecycleController,
    LifecycleSession, DEFAULT_CHANNEL_CAPACITY,
};

type Session = LifecycleSession<MemoryPermissions, MemoryCameras, RecordingEngine, MemoryShell>;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let (handle, events) = Session::channel(DEFAULT_CHANNEL_CAPACITY);

    // An in-memory platform: one front camera, one legacy shim, one usable
    // back camera, and a permission host that grants on request.
    let cameras = MemoryCameras::with_devices(vec![
        CameraDevice::new(CameraId::new("0")?, LensFacing::Front, HardwareTier::Full),
        CameraDevice::new(CameraId::new("1")?, LensFacing::Back, HardwareTier::Legacy),
        CameraDevice::new(CameraId::new("2")?, LensFacing::Back, HardwareTier::Full),
    ]);
    let permissions = MemoryPermissions::new(handle.sender(), PermissionScript::AutoGrant);
    let engine = RecordingEngine::new();

    let controller = LifecycleController::new(
        permissions,
        cameras,
        engine.clone(),
        MemoryShell::new(),
        ControllerConfig::default(),
    );
    let session = Session::new(controller, events);
    let task = tokio::spawn(session.run());

    // The shell brings the app up, sends it to the background, brings it
    // back, then tears it down. The pauses stand in for the time the app
    // actually spends in each state.
    let dwell = Duration::from_millis(50);
    handle.foreground().await?;
    tokio::time::sleep(dwell).await;
    handle.background().await?;
    tokio::time::sleep(dwell).await;
    handle.foreground().await?;
    tokio::time::sleep(dwell).await;
    handle.destroy().await?;

    let report = task.await??;
    println!("session ended: {}", report.end);
    println!("engine calls, in order:");
    for call in engine.calls() {
        println!("  {:?}", call);
    }
    println!(
        "starts={} stops={} final_phase={}",
        report.starts, report.stops, report.final_phase
    );

    Ok(())
}
