//! The permission state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a single permission stands within one session.
///
/// State is session-local and never persisted; every session starts at
/// `Unknown` and rediscovers the platform's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    /// Not yet determined this session.
    #[default]
    Unknown,
    /// The platform has granted access.
    Granted,
    /// The platform (or the user) has denied access.
    Denied,
    /// A request has been issued and no result has arrived yet.
    RequestInFlight,
}

impl PermissionState {
    /// Whether access is currently held.
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Whether a request is awaiting its result.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::RequestInFlight)
    }

    /// Whether `next` is a legal successor of this state.
    ///
    /// The machine admits exactly: issuing a request from `Unknown` or
    /// `Denied`, resolving an in-flight request either way, rewinding a
    /// cancelled request to `Unknown` (the platform never answered), and
    /// the externally observed revocation of a grant.
    pub fn may_advance_to(self, next: Self) -> bool {
        use PermissionState::*;
        matches!(
            (self, next),
            (Unknown, RequestInFlight)
                | (Denied, RequestInFlight)
                | (RequestInFlight, Granted)
                | (RequestInFlight, Denied)
                | (RequestInFlight, Unknown)
                | (Granted, Denied)
        )
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unknown => "unknown",
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::RequestInFlight => "request_in_flight",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PermissionState::*;

    const ALL: [PermissionState; 4] = [Unknown, Granted, Denied, RequestInFlight];

    #[test]
    fn test_exact_transition_matrix() {
        let legal = [
            (Unknown, RequestInFlight),
            (Denied, RequestInFlight),
            (RequestInFlight, Granted),
            (RequestInFlight, Denied),
            (RequestInFlight, Unknown),
            (Granted, Denied),
        ];

        for from in ALL {
            for to in ALL {
                let expected = legal.contains(&(from, to));
                assert_eq!(
                    from.may_advance_to(to),
                    expected,
                    "transition {} -> {}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn test_granted_never_rewinds_to_unknown() {
        assert!(!Granted.may_advance_to(Unknown));
        assert!(!Granted.may_advance_to(RequestInFlight));
        assert!(!Granted.may_advance_to(Granted));
    }

    #[test]
    fn test_default_is_unknown() {
        assert_eq!(PermissionState::default(), Unknown);
    }

    #[test]
    fn test_display() {
        assert_eq!(RequestInFlight.to_string(), "request_in_flight");
        assert_eq!(Granted.to_string(), "granted");
    }
}
