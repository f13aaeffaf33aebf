//! Error types for permission gating.

use thiserror::Error;

use sightline_platform::PlatformError;

use crate::state::PermissionState;

/// Errors that can occur while gating a permission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PermsError {
    /// The platform could not take the request at all.
    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),

    /// The gate was driven through a transition the state machine does
    /// not allow. Indicates a caller bug, never a user decision.
    #[error("illegal permission state transition: {from} -> {to}")]
    IllegalTransition {
        from: PermissionState,
        to: PermissionState,
    },
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermsError>;
