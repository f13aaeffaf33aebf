//! Strong type definitions for Sightline identifiers.
//!
//! Identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, Result};

/// An opaque camera device identifier as reported by the platform.
///
/// Always non-empty. The platform camera API reports "no device" as an
/// empty string; constructing a `CameraId` from one is an error so that
/// absence stays `Option::None` throughout the system.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CameraId(String);

impl CameraId {
    /// Create a camera id, rejecting the empty string.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(CoreError::EmptyCameraId);
        }
        Ok(Self(id))
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CameraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CameraId({})", self.0)
    }
}

impl fmt::Display for CameraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CameraId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An opaque tag pairing a permission request with its asynchronous result.
///
/// The gate issues codes from a monotonically increasing sequence, so a
/// code also identifies the generation of the request: a result carrying
/// a code that is no longer in flight is stale and must be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestCode(u32);

impl RequestCode {
    /// The first code the gate hands out.
    pub const FIRST: Self = Self(1);

    /// Create a request code from its raw value.
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// Get the raw value.
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// The code following this one in the sequence.
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RequestCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_id_rejects_empty() {
        assert_eq!(CameraId::new(""), Err(CoreError::EmptyCameraId));
    }

    #[test]
    fn test_camera_id_display() {
        let id = CameraId::new("0").unwrap();
        assert_eq!(format!("{}", id), "0");
        assert_eq!(id.as_str(), "0");
    }

    #[test]
    fn test_request_code_sequence() {
        let first = RequestCode::FIRST;
        assert_eq!(first.value(), 1);
        assert_eq!(first.next().value(), 2);
        assert!(first < first.next());
    }

    #[test]
    fn test_request_code_display() {
        assert_eq!(format!("{}", RequestCode::new(7)), "#7");
    }
}
