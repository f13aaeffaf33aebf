//! # Sightline Platform
//!
//! Boundary traits for everything the platform provides to a session:
//! the camera inventory, the permission subsystem, and the application
//! shell. In-memory implementations live in [`memory`] for tests and
//! demos; production builds supply adapters over the real OS APIs.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::PlatformError;
pub use memory::{MemoryCameras, MemoryPermissions, MemoryShell, PermissionScript};
pub use traits::{CameraInventory, HostShell, PermissionHost, PermissionRequest};
