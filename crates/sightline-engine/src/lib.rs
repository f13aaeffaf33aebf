//! # Sightline Engine
//!
//! The boundary between the lifecycle coordinator and the native
//! detection engine: a two-call trait ([`DetectionEngine`]) and a
//! call-recording implementation ([`RecordingEngine`]) for tests.
//!
//! Everything past `start`/`stop` is out of scope here: no frames, no
//! detection results, no engine state. The coordinator's job ends at
//! handing the engine a camera and taking it away again.

pub mod error;
pub mod recording;
pub mod traits;

pub use error::EngineError;
pub use recording::{EngineCall, RecordingEngine};
pub use traits::DetectionEngine;
