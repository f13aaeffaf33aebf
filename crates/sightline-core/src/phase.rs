//! Engine lifecycle phases.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the lifecycle controller currently stands.
///
/// The ordering of a session is `Idle` → `AwaitingPermission` →
/// `AwaitingDevice` → `Running` → `Stopped`, with `Stopped` re-entering
/// at `AwaitingPermission` on the next foreground. The two awaiting
/// phases are only observable while the controller actually waits on an
/// external answer; when the gate or the selector answers synchronously
/// the controller passes through them within a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EnginePhase {
    /// No session has started yet.
    #[default]
    Idle,
    /// A permission request is pending with the platform.
    AwaitingPermission,
    /// Permission granted; device selection is underway.
    AwaitingDevice,
    /// The engine has been started and not yet stopped.
    Running,
    /// The engine is stopped; a foreground event starts a fresh sequence.
    Stopped,
}

impl EnginePhase {
    /// Whether the engine is currently considered started.
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Whether the controller is waiting on permission or device acquisition.
    pub fn is_awaiting(&self) -> bool {
        matches!(self, Self::AwaitingPermission | Self::AwaitingDevice)
    }

    /// Whether the engine is stopped (terminal until the next foreground).
    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped)
    }

    /// Whether a foreground event may begin a new acquisition sequence.
    pub fn accepts_foreground(&self) -> bool {
        matches!(self, Self::Idle | Self::Stopped)
    }
}

impl fmt::Display for EnginePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::AwaitingPermission => "awaiting_permission",
            Self::AwaitingDevice => "awaiting_device",
            Self::Running => "running",
            Self::Stopped => "stopped",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_phase_is_idle() {
        assert_eq!(EnginePhase::default(), EnginePhase::Idle);
    }

    #[test]
    fn test_phase_predicates() {
        assert!(EnginePhase::Running.is_running());
        assert!(!EnginePhase::Stopped.is_running());

        assert!(EnginePhase::AwaitingPermission.is_awaiting());
        assert!(EnginePhase::AwaitingDevice.is_awaiting());
        assert!(!EnginePhase::Running.is_awaiting());

        assert!(EnginePhase::Idle.accepts_foreground());
        assert!(EnginePhase::Stopped.accepts_foreground());
        assert!(!EnginePhase::Running.accepts_foreground());
        assert!(!EnginePhase::AwaitingPermission.accepts_foreground());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(EnginePhase::AwaitingPermission.to_string(), "awaiting_permission");
        assert_eq!(EnginePhase::Running.to_string(), "running");
    }
}
