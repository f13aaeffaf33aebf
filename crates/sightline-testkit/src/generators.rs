//! Proptest generators for property-based testing.

use proptest::prelude::*;

use sightline_core::{
    CameraDevice, CameraId, GrantOutcome, HardwareTier, HostEvent, LensFacing,
    PermissionResponse, RequestCode,
};
use sightline_perms::PermissionState;

/// Generate a non-empty camera id.
pub fn camera_id() -> impl Strategy<Value = CameraId> {
    "[a-z0-9]{1,8}".prop_map(|s| CameraId::new(s).expect("generated ids are non-empty"))
}

/// Generate a lens facing.
pub fn lens_facing() -> impl Strategy<Value = LensFacing> {
    prop_oneof![
        Just(LensFacing::Front),
        Just(LensFacing::Back),
        Just(LensFacing::External),
    ]
}

/// Generate a hardware tier.
pub fn hardware_tier() -> impl Strategy<Value = HardwareTier> {
    prop_oneof![
        Just(HardwareTier::Legacy),
        Just(HardwareTier::Limited),
        Just(HardwareTier::Full),
        Just(HardwareTier::Level3),
        Just(HardwareTier::External),
    ]
}

/// Generate a single camera device.
pub fn camera_device() -> impl Strategy<Value = CameraDevice> {
    (camera_id(), lens_facing(), hardware_tier())
        .prop_map(|(id, facing, tier)| CameraDevice::new(id, facing, tier))
}

/// Generate an inventory snapshot of up to `max` devices.
pub fn device_roster(max: usize) -> impl Strategy<Value = Vec<CameraDevice>> {
    prop::collection::vec(camera_device(), 0..=max)
}

/// Generate a grant outcome.
pub fn grant_outcome() -> impl Strategy<Value = GrantOutcome> {
    prop_oneof![Just(GrantOutcome::Granted), Just(GrantOutcome::Denied)]
}

/// Generate a permission response for an arbitrary code, including the
/// malformed empty-outcome case.
pub fn permission_response() -> impl Strategy<Value = PermissionResponse> {
    (1u32..=16, prop::collection::vec(grant_outcome(), 0..=2)).prop_map(|(code, outcomes)| {
        PermissionResponse {
            code: RequestCode::new(code),
            outcomes,
        }
    })
}

/// Generate a permission state.
pub fn permission_state() -> impl Strategy<Value = PermissionState> {
    prop_oneof![
        Just(PermissionState::Unknown),
        Just(PermissionState::Granted),
        Just(PermissionState::Denied),
        Just(PermissionState::RequestInFlight),
    ]
}

/// Generate a foreground/background visibility event.
pub fn visibility_event() -> impl Strategy<Value = HostEvent> {
    prop_oneof![Just(HostEvent::Foregrounded), Just(HostEvent::Backgrounded)]
}

/// A random run of host visibility events, always ending in teardown.
#[derive(Debug, Clone)]
pub struct HostScript {
    pub events: Vec<HostEvent>,
}

impl Arbitrary for HostScript {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop::collection::vec(visibility_event(), 0..12)
            .prop_map(|mut events| {
                events.push(HostEvent::Destroyed);
                HostScript { events }
            })
            .boxed()
    }
}
