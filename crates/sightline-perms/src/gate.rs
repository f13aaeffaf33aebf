//! The permission gate.
//!
//! One gate guards one permission for one session. It owns the permission
//! state machine, issues requests to the platform host, and matches the
//! platform's asynchronous answers back to the request they belong to.

use tracing::{debug, info, warn};

use sightline_core::{GrantOutcome, PermissionResponse, RequestCode};
use sightline_platform::{PermissionHost, PermissionRequest};

use crate::error::{PermsError, Result};
use crate::state::PermissionState;

/// What `ensure` concluded about the guarded permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ensure {
    /// Access is held right now; no request was issued.
    Granted,
    /// A request was issued under this code; the answer arrives later as
    /// a `PermissionResponse` event.
    Pending(RequestCode),
    /// A request under this code is already awaiting its answer; nothing
    /// new was issued.
    AlreadyPending(RequestCode),
}

/// Permission gate over a platform host.
///
/// Request codes come from a monotonically increasing sequence, so a code
/// identifies the generation of its request: after a cancellation, the
/// answer to the old request carries a code the gate no longer considers
/// in flight and is discarded. Exactly one decision is ever applied per
/// issued request.
pub struct PermissionGate<P: PermissionHost> {
    host: P,
    permission: String,
    reverify: bool,
    state: PermissionState,
    in_flight: Option<RequestCode>,
    next_code: RequestCode,
}

impl<P: PermissionHost> PermissionGate<P> {
    /// Create a gate for the `"camera"` permission with re-verification on.
    pub fn new(host: P) -> Self {
        Self {
            host,
            permission: "camera".to_string(),
            reverify: true,
            state: PermissionState::default(),
            in_flight: None,
            next_code: RequestCode::FIRST,
        }
    }

    /// Guard a different permission name.
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = permission.into();
        self
    }

    /// Control whether a granted gate re-probes the host on every `ensure`.
    ///
    /// With re-verification off, a grant observed once is trusted for the
    /// rest of the session; out-of-app revocation goes unnoticed.
    pub fn with_reverify(mut self, reverify: bool) -> Self {
        self.reverify = reverify;
        self
    }

    /// The permission this gate guards.
    pub fn permission(&self) -> &str {
        &self.permission
    }

    /// Where the guarded permission currently stands.
    pub fn state(&self) -> PermissionState {
        self.state
    }

    /// The code of the request currently awaiting its answer, if any.
    pub fn in_flight_code(&self) -> Option<RequestCode> {
        self.in_flight
    }

    /// Make sure the permission is held, issuing a request if needed.
    ///
    /// Re-entry while a request is in flight is a no-op: the pending code
    /// is reported back and no second request reaches the platform. A
    /// granted gate with re-verification on probes the host first; a grant
    /// that can no longer be confirmed is recorded as revoked and a fresh
    /// request is issued. The engine must never run on an unconfirmed grant.
    pub async fn ensure(&mut self) -> Result<Ensure> {
        if let Some(code) = self.in_flight {
            debug!(%code, "permission request already in flight");
            return Ok(Ensure::AlreadyPending(code));
        }

        if self.state.is_granted() {
            if !self.reverify {
                return Ok(Ensure::Granted);
            }
            match self.host.check_access(&self.permission).await {
                Ok(true) => return Ok(Ensure::Granted),
                Ok(false) => {
                    warn!(
                        permission = %self.permission,
                        "granted permission no longer held, treating as revoked"
                    );
                    self.advance(PermissionState::Denied)?;
                }
                Err(err) => {
                    warn!(%err, "permission probe failed, treating grant as revoked");
                    self.advance(PermissionState::Denied)?;
                }
            }
        }

        let code = self.next_code;
        self.host
            .request_access(PermissionRequest {
                permission: self.permission.clone(),
                code,
            })
            .await?;
        self.next_code = code.next();
        self.advance(PermissionState::RequestInFlight)?;
        self.in_flight = Some(code);
        info!(%code, permission = %self.permission, "permission request issued");
        Ok(Ensure::Pending(code))
    }

    /// Apply a platform grant result to the in-flight request.
    ///
    /// Returns `None` when the result belongs to no request this gate
    /// still considers in flight; stale results are never applied. An
    /// empty outcome list means the grant flow was interrupted and is
    /// recorded as a denial, never as success.
    pub fn resolve(&mut self, response: &PermissionResponse) -> Result<Option<GrantOutcome>> {
        match self.in_flight {
            Some(code) if code == response.code => {}
            Some(code) => {
                debug!(
                    in_flight = %code,
                    received = %response.code,
                    "grant result for a superseded request, discarding"
                );
                return Ok(None);
            }
            None => {
                debug!(
                    received = %response.code,
                    "grant result with no request in flight, discarding"
                );
                return Ok(None);
            }
        }
        self.in_flight = None;

        let outcome = match response.outcomes.first() {
            Some(GrantOutcome::Granted) => GrantOutcome::Granted,
            Some(GrantOutcome::Denied) => GrantOutcome::Denied,
            None => {
                warn!(code = %response.code, "empty grant result, treating as denied");
                GrantOutcome::Denied
            }
        };

        match outcome {
            GrantOutcome::Granted => self.advance(PermissionState::Granted)?,
            GrantOutcome::Denied => self.advance(PermissionState::Denied)?,
        }
        info!(code = %response.code, ?outcome, "permission request resolved");
        Ok(Some(outcome))
    }

    /// Abandon the in-flight request, if any.
    ///
    /// The platform never answered, so the state rewinds to `Unknown`
    /// rather than recording a decision the user never made. A result for
    /// the cancelled code arriving later resolves to `None` by code
    /// mismatch.
    pub fn cancel_pending(&mut self) -> Result<Option<RequestCode>> {
        let Some(code) = self.in_flight.take() else {
            return Ok(None);
        };
        self.advance(PermissionState::Unknown)?;
        debug!(%code, "pending permission request cancelled");
        Ok(Some(code))
    }

    fn advance(&mut self, next: PermissionState) -> Result<()> {
        if !self.state.may_advance_to(next) {
            return Err(PermsError::IllegalTransition {
                from: self.state,
                to: next,
            });
        }
        debug!(from = %self.state, to = %next, "permission state advanced");
        self.state = next;
        Ok(())
    }
}
