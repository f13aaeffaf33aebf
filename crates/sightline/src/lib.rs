//! # Sightline
//!
//! The lifecycle coordinator between an application shell and a native,
//! hardware-accelerated object-detection engine.
//!
//! ## Overview
//!
//! Sightline owns one job: the detection engine never runs without a
//! granted camera permission and a concrete device id, and never runs
//! while the application is not in the foreground. Everything the engine
//! does with the camera is out of scope past `start`/`stop`.
//!
//! - **Permission gating**: a foreground entry either confirms a held
//!   grant synchronously or suspends until the platform delivers the
//!   user's decision. Stale decisions from cancelled requests are
//!   discarded.
//! - **Camera selection**: the first back-facing, non-legacy device in
//!   enumeration order; a dead camera service counts as no device.
//! - **Engine lifecycle**: `Idle` → `AwaitingPermission` →
//!   `AwaitingDevice` → `Running` → `Stopped`, with the unconditional
//!   stop on backgrounding and fail-closed handling of engine errors.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sightline::{ControllerConfig, LifecycleController, LifecycleSession};
//! use sightline::engine::RecordingEngine;
//! use sightline::platform::{MemoryCameras, MemoryPermissions, MemoryShell, PermissionScript};
//!
//! async fn example() {
//!     let (handle, events) = LifecycleSession::<
//!         MemoryPermissions,
//!         MemoryCameras,
//!         RecordingEngine,
//!         MemoryShell,
//!     >::channel(16);
//!
//!     let controller = LifecycleController::new(
//!         MemoryPermissions::new(handle.sender(), PermissionScript::AutoGrant),
//!         MemoryCameras::new(),
//!         RecordingEngine::new(),
//!         MemoryShell::new(),
//!         ControllerConfig::default(),
//!     );
//!     let session = LifecycleSession::new(controller, events);
//!
//!     let task = tokio::spawn(session.run());
//!     handle.foreground().await.unwrap();
//!     handle.destroy().await.unwrap();
//!     let report = task.await.unwrap().unwrap();
//!     println!("session ended: {}", report.end);
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `sightline::core` - Pure types and the selection policy
//! - `sightline::platform` - Platform boundary traits and in-memory fakes
//! - `sightline::engine` - The detection engine boundary
//! - `sightline::perms` - The permission gate and state machine

pub mod controller;
pub mod error;
pub mod selector;
pub mod session;

// Re-export component crates
pub use sightline_core as core;
pub use sightline_engine as engine;
pub use sightline_perms as perms;
pub use sightline_platform as platform;

// Re-export main types for convenience
pub use controller::{ControllerConfig, LifecycleController, SessionEnd, Step};
pub use error::{LifecycleError, Result};
pub use selector::CameraSelector;
pub use session::{HostHandle, LifecycleSession, SessionReport, DEFAULT_CHANNEL_CAPACITY};

// Re-export commonly used core types
pub use sightline_core::{
    CameraDevice, CameraId, ControlEvent, EnginePhase, GrantOutcome, HardwareTier, HostEvent,
    LensFacing, PermissionResponse, RequestCode, UserNotice,
};
