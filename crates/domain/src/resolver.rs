use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccessRequest, AccessRequestStatus, ExpiryBounds, Grant, RequestPhase, effective_expiry};

/// Answer from the authorization oracle for one access query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    /// Whether the oracle allowed the action.
    pub allowed: bool,
    /// Whether the oracle explicitly denied the action.
    #[serde(default)]
    pub denied: bool,
    /// Oracle-stated reason, surfaced in the request status on denial.
    #[serde(default)]
    pub reason: String,
}

impl AccessDecision {
    /// Returns whether this decision rejects the request.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        !self.allowed || self.denied
    }
}

/// Outcome of one resolution pass over a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The status is fully determined for this pass.
    Settled(AccessRequestStatus),
    /// The status still needs an authorization decision to finish.
    AwaitingDecision(AccessRequestStatus),
}

impl Resolution {
    /// Returns the status computed so far, settled or not.
    #[must_use]
    pub fn status(&self) -> &AccessRequestStatus {
        match self {
            Self::Settled(status) | Self::AwaitingDecision(status) => status,
        }
    }
}

/// Resolves the status of a request from the observed grant and the
/// current time.
///
/// Precedence is strict: an existing grant makes the request Ready; a
/// passed effective expiry overrides everything, so a Ready request past
/// its term expires in the same pass; field validation runs only for
/// requests that are neither Ready nor Expired. An existing grant is
/// authoritative even when the spec fields are empty — grants already
/// issued are not retroactively invalidated.
///
/// A request left in an unset, Pending or Denied phase still needs an
/// authorization decision, folded in with [`apply_decision`].
#[must_use]
pub fn resolve(
    request: &AccessRequest,
    grant: Option<&Grant>,
    now: DateTime<Utc>,
    bounds: ExpiryBounds,
) -> Resolution {
    let mut status = request.status.clone();

    if let Some(grant) = grant {
        status.phase = Some(RequestPhase::Ready);
        status.reason.clear();
        status.grant_ref = Some(grant.name().to_owned());
    }

    // Refreshed unconditionally, whatever the phase ends up being.
    let expires_at = effective_expiry(request.created_at, request.spec.requested_expiry, bounds);
    status.expires_at = Some(expires_at);

    if now > expires_at {
        status.phase = Some(RequestPhase::Expired);
        status.reason.clear();
    }

    if matches!(
        status.phase,
        Some(RequestPhase::Expired | RequestPhase::Ready)
    ) {
        return Resolution::Settled(status);
    }

    if request.spec.principal.is_empty() {
        status.phase = Some(RequestPhase::Error);
        status.reason = "User must be specified".to_owned();
        return Resolution::Settled(status);
    }

    if request.spec.target_role.is_empty() {
        status.phase = Some(RequestPhase::Error);
        status.reason = "Target role must be specified".to_owned();
        return Resolution::Settled(status);
    }

    // A carried-over Error marks a structurally broken request; a denial
    // is terminal-for-now and re-evaluated on the next change-driven pass.
    if matches!(status.phase, Some(RequestPhase::Error)) {
        return Resolution::Settled(status);
    }

    Resolution::AwaitingDecision(status)
}

/// Folds an authorization decision into a status awaiting one.
#[must_use]
pub fn apply_decision(
    mut status: AccessRequestStatus,
    decision: &AccessDecision,
) -> AccessRequestStatus {
    if decision.is_negative() {
        status.phase = Some(RequestPhase::Denied);
        status.reason = format!("Failed to authorize: {}", decision.reason);
    } else {
        status.phase = Some(RequestPhase::Pending);
        status.reason.clear();
    }
    status
}
