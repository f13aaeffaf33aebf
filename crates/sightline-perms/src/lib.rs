//! # Sightline Permissions
//!
//! Permission gating for a session: the permission state machine and the
//! gate that drives it against a platform host.
//!
//! ## Overview
//!
//! Access to the camera is a four-state affair: `Unknown` until asked,
//! `RequestInFlight` while the platform (and the user) decide, then
//! `Granted` or `Denied`. The [`PermissionGate`] owns that state for one
//! permission and one session:
//!
//! - [`PermissionGate::ensure`] confirms a held grant synchronously or
//!   issues a request; re-entry while one is in flight is a no-op.
//! - [`PermissionGate::resolve`] applies the platform's asynchronous
//!   answer exactly once, discarding stale or repeated results.
//! - [`PermissionGate::cancel_pending`] abandons an awaited request when
//!   the session backgrounds, rewinding to `Unknown`.
//!
//! State is session-local and never persisted; every session starts at
//! `Unknown`. A malformed grant result is recorded as a denial, never as
//! success.

pub mod error;
pub mod gate;
pub mod state;

pub use error::{PermsError, Result};
pub use gate::{Ensure, PermissionGate};
pub use state::PermissionState;
