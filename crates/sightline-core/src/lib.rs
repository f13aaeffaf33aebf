//! # Sightline Core
//!
//! Pure primitives for Sightline: the camera model, lifecycle phases,
//! session events, and the selection policy.
//!
//! This crate contains no I/O, no channels, no platform calls. It is pure
//! data and pure computation, shared by every other crate in the workspace.
//!
//! ## Key Types
//!
//! - [`CameraDevice`] - One row of an inventory snapshot
//! - [`CameraId`] - Non-empty platform device identifier
//! - [`EnginePhase`] - Where the lifecycle controller stands
//! - [`ControlEvent`] - Everything a session reacts to
//! - [`RequestCode`] - Generation tag for permission requests
//!
//! ## Selection
//!
//! [`pick_back_camera`] is the whole selection policy: first back-facing,
//! non-legacy device in enumeration order.

pub mod device;
pub mod error;
pub mod events;
pub mod notice;
pub mod phase;
pub mod policy;
pub mod types;

pub use device::{CameraDevice, HardwareTier, LensFacing};
pub use error::CoreError;
pub use events::{ControlEvent, GrantOutcome, HostEvent, PermissionResponse};
pub use notice::{NoticeDuration, UserNotice};
pub use phase::EnginePhase;
pub use policy::pick_back_camera;
pub use types::{CameraId, RequestCode};
