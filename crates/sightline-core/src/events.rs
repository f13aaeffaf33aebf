//! Events consumed by a lifecycle session.
//!
//! Everything that can influence the controller arrives as a
//! [`ControlEvent`] on a single channel, so arrival order is processing
//! order and no component ever observes a half-applied transition.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::RequestCode;

/// Visibility changes reported by the application shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostEvent {
    /// The application became visible and interactive.
    Foregrounded,
    /// The application left the foreground.
    Backgrounded,
    /// The shell is tearing the application down.
    Destroyed,
}

impl fmt::Display for HostEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Foregrounded => "foregrounded",
            Self::Backgrounded => "backgrounded",
            Self::Destroyed => "destroyed",
        };
        write!(f, "{}", s)
    }
}

/// One per-permission verdict inside a platform grant result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantOutcome {
    Granted,
    Denied,
}

/// The platform's asynchronous answer to a permission request.
///
/// `code` echoes the [`RequestCode`] the request was issued under.
/// `outcomes` holds one verdict per requested permission; an empty list
/// means the grant flow was interrupted before the user answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionResponse {
    pub code: RequestCode,
    pub outcomes: Vec<GrantOutcome>,
}

impl PermissionResponse {
    /// A response resolving a single-permission request as granted.
    pub fn granted(code: RequestCode) -> Self {
        Self {
            code,
            outcomes: vec![GrantOutcome::Granted],
        }
    }

    /// A response resolving a single-permission request as denied.
    pub fn denied(code: RequestCode) -> Self {
        Self {
            code,
            outcomes: vec![GrantOutcome::Denied],
        }
    }

    /// An interrupted response with no verdicts at all.
    pub fn interrupted(code: RequestCode) -> Self {
        Self {
            code,
            outcomes: Vec::new(),
        }
    }
}

/// Any input a lifecycle session reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlEvent {
    /// A visibility change from the application shell.
    Host(HostEvent),
    /// A grant result from the platform permission subsystem.
    Permission(PermissionResponse),
}

impl From<HostEvent> for ControlEvent {
    fn from(event: HostEvent) -> Self {
        Self::Host(event)
    }
}

impl From<PermissionResponse> for ControlEvent {
    fn from(response: PermissionResponse) -> Self {
        Self::Permission(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_constructors() {
        let code = RequestCode::FIRST;
        assert_eq!(
            PermissionResponse::granted(code).outcomes,
            vec![GrantOutcome::Granted]
        );
        assert_eq!(
            PermissionResponse::denied(code).outcomes,
            vec![GrantOutcome::Denied]
        );
        assert!(PermissionResponse::interrupted(code).outcomes.is_empty());
    }

    #[test]
    fn test_event_json_round_trip() {
        let ev: ControlEvent = PermissionResponse::denied(RequestCode::FIRST).into();
        let json = serde_json::to_string(&ev).unwrap();
        let back: ControlEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(ev, back);
    }

    #[test]
    fn test_event_conversions() {
        let ev: ControlEvent = HostEvent::Backgrounded.into();
        assert_eq!(ev, ControlEvent::Host(HostEvent::Backgrounded));

        let ev: ControlEvent = PermissionResponse::granted(RequestCode::FIRST).into();
        assert!(matches!(ev, ControlEvent::Permission(_)));
    }
}
