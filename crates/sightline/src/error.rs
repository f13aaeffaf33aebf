//! Error types for the lifecycle coordinator.

use thiserror::Error;

use sightline_perms::PermsError;
use sightline_platform::PlatformError;

/// Errors that can escape the lifecycle boundary.
///
/// User-level outcomes (permission denial, no usable camera) and engine
/// failures never appear here: the controller absorbs them into notices
/// and phase bookkeeping. What remains is infrastructure collapse, which
/// is a fault rather than a user decision.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The session event channel is gone; the session no longer exists.
    #[error("lifecycle session closed")]
    SessionClosed,

    /// Permission machinery failure.
    #[error("permission error: {0}")]
    Permission(#[from] PermsError),

    /// Platform boundary failure.
    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),
}

/// Result type for lifecycle operations.
pub type Result<T> = std::result::Result<T, LifecycleError>;
