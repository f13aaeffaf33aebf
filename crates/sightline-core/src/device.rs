//! Camera device records as reported by one inventory enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, Result};
use crate::types::CameraId;

/// The direction a camera lens faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LensFacing {
    /// Faces the same direction as the screen.
    Front,
    /// Faces away from the screen.
    Back,
    /// Not part of the device body (USB cameras and the like).
    External,
}

impl LensFacing {
    /// Map from the platform's numeric lens-facing metadata value.
    pub fn from_platform_value(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Self::Front),
            1 => Ok(Self::Back),
            2 => Ok(Self::External),
            other => Err(CoreError::UnknownLensFacing(other)),
        }
    }
}

impl fmt::Display for LensFacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Front => "front",
            Self::Back => "back",
            Self::External => "external",
        };
        write!(f, "{}", s)
    }
}

/// The platform's declared capability tier for a camera device.
///
/// `Legacy` marks devices served through a compatibility shim with reduced
/// guarantees; selection excludes them. Every other tier qualifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardwareTier {
    /// Compatibility shim over an older driver model.
    Legacy,
    /// Baseline feature set.
    Limited,
    /// Full feature set.
    Full,
    /// Full feature set plus extended output support.
    Level3,
    /// Externally connected device.
    External,
}

impl HardwareTier {
    /// Map from the platform's numeric hardware-level metadata value.
    pub fn from_platform_value(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Self::Limited),
            1 => Ok(Self::Full),
            2 => Ok(Self::Legacy),
            3 => Ok(Self::Level3),
            4 => Ok(Self::External),
            other => Err(CoreError::UnknownHardwareTier(other)),
        }
    }

    /// Whether this tier is the disqualifying legacy shim.
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy)
    }
}

impl fmt::Display for HardwareTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Legacy => "legacy",
            Self::Limited => "limited",
            Self::Full => "full",
            Self::Level3 => "level_3",
            Self::External => "external",
        };
        write!(f, "{}", s)
    }
}

/// One row of an inventory snapshot: a device id plus the two metadata
/// fields selection cares about.
///
/// Snapshots are taken fresh on every enumeration and never cached, so a
/// `CameraDevice` is only meaningful relative to the enumeration that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraDevice {
    id: CameraId,
    facing: LensFacing,
    tier: HardwareTier,
}

impl CameraDevice {
    /// Create a device record.
    pub fn new(id: CameraId, facing: LensFacing, tier: HardwareTier) -> Self {
        Self { id, facing, tier }
    }

    /// The platform identifier for this device.
    pub fn id(&self) -> &CameraId {
        &self.id
    }

    /// Which way the lens faces.
    pub fn facing(&self) -> LensFacing {
        self.facing
    }

    /// The declared capability tier.
    pub fn tier(&self) -> HardwareTier {
        self.tier
    }
}

impl fmt::Display for CameraDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.id, self.facing, self.tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lens_facing_platform_values() {
        assert_eq!(LensFacing::from_platform_value(0), Ok(LensFacing::Front));
        assert_eq!(LensFacing::from_platform_value(1), Ok(LensFacing::Back));
        assert_eq!(LensFacing::from_platform_value(2), Ok(LensFacing::External));
        assert_eq!(
            LensFacing::from_platform_value(9),
            Err(CoreError::UnknownLensFacing(9))
        );
    }

    #[test]
    fn test_hardware_tier_platform_values() {
        assert_eq!(HardwareTier::from_platform_value(2), Ok(HardwareTier::Legacy));
        assert_eq!(HardwareTier::from_platform_value(0), Ok(HardwareTier::Limited));
        assert_eq!(HardwareTier::from_platform_value(1), Ok(HardwareTier::Full));
        assert_eq!(HardwareTier::from_platform_value(3), Ok(HardwareTier::Level3));
        assert_eq!(HardwareTier::from_platform_value(4), Ok(HardwareTier::External));
        assert_eq!(
            HardwareTier::from_platform_value(-1),
            Err(CoreError::UnknownHardwareTier(-1))
        );
    }

    #[test]
    fn test_only_legacy_is_legacy() {
        assert!(HardwareTier::Legacy.is_legacy());
        assert!(!HardwareTier::Limited.is_legacy());
        assert!(!HardwareTier::Full.is_legacy());
        assert!(!HardwareTier::Level3.is_legacy());
        assert!(!HardwareTier::External.is_legacy());
    }

    #[test]
    fn test_device_display() {
        let dev = CameraDevice::new(
            CameraId::new("1").unwrap(),
            LensFacing::Back,
            HardwareTier::Full,
        );
        assert_eq!(format!("{}", dev), "1 (back, full)");
    }
}
