//! # Sightline Testkit
//!
//! Testing utilities for the Sightline lifecycle coordinator.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a fully wired in-memory session ([`SessionFixture`])
//!   plus device constructors
//! - **Generators**: proptest strategies for devices, responses, and
//!   host-event runs
//! - **Scenarios**: a named table of scripted lifecycle runs with a
//!   run-all verifier
//!
//! ## Scenarios
//!
//! ```rust,ignore
//! use sightline_testkit::scenarios::verify_all_scenarios;
//!
//! for (name, ok) in verify_all_scenarios().await? {
//!     println!("{}: {}", name, if ok { "ok" } else { "FAILED" });
//! }
//! ```
//!
//! ## Fixtures
//!
//! ```rust,ignore
//! use sightline_testkit::fixtures::{back_camera, SessionFixture};
//! use sightline::platform::PermissionScript;
//!
//! let mut fixture = SessionFixture::new(PermissionScript::AutoGrant);
//! fixture.push_device(back_camera("0"));
//! let run = fixture.spawn();
//! run.handle.foreground().await?;
//! run.wait_for("engine started", || run.engine.start_count() == 1).await;
//! let report = run.finish().await;
//! ```

pub mod fixtures;
pub mod generators;
pub mod scenarios;

pub use fixtures::{back_camera, front_camera, legacy_back_camera, RunningSession, SessionFixture};
pub use generators::HostScript;
pub use scenarios::{all_scenarios, run_scenario, verify_all_scenarios, LifecycleScenario, ScenarioOutcome};
