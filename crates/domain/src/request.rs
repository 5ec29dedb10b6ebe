use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sudovisor_core::AppError;
use uuid::Uuid;

/// Lifecycle phase of an access request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestPhase {
    /// Authorized, waiting for the grant to materialize.
    Pending,
    /// The authorization oracle rejected the request.
    Denied,
    /// The request is structurally invalid.
    Error,
    /// The grant exists and access is active.
    Ready,
    /// The effective expiry has passed.
    Expired,
}

impl RequestPhase {
    /// Returns a stable storage value for this phase.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Denied => "Denied",
            Self::Error => "Error",
            Self::Ready => "Ready",
            Self::Expired => "Expired",
        }
    }

    /// Returns whether no transition may ever leave this phase.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Expired)
    }
}

impl FromStr for RequestPhase {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Pending" => Ok(Self::Pending),
            "Denied" => Ok(Self::Denied),
            "Error" => Ok(Self::Error),
            "Ready" => Ok(Self::Ready),
            "Expired" => Ok(Self::Expired),
            _ => Err(AppError::Validation(format!(
                "unknown request phase value '{value}'"
            ))),
        }
    }
}

/// Desired state of an access request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequestSpec {
    /// Principal to grant elevated access to.
    #[serde(default)]
    pub principal: String,
    /// Role the principal is requesting.
    #[serde(default)]
    pub target_role: String,
    /// Free-text justification for the escalation.
    #[serde(default)]
    pub reason: String,
    /// Requested expiry instant; the system default duration applies when unset.
    #[serde(default)]
    pub requested_expiry: Option<DateTime<Utc>>,
}

/// Observed state of an access request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequestStatus {
    /// Current lifecycle phase; unset until the first resolution pass.
    #[serde(default)]
    pub phase: Option<RequestPhase>,
    /// Human-readable explanation for the current phase.
    #[serde(default)]
    pub reason: String,
    /// Name of the materialized grant, recorded once observed.
    #[serde(default)]
    pub grant_ref: Option<String>,
    /// Effective expiry instant, recomputed every reconcile pass.
    ///
    /// This applies regardless of what expiry (if any) the spec asked for.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// A request for temporary elevated access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequest {
    /// Object name within the platform store.
    pub name: String,
    /// Platform-assigned stable identity, used for owner links.
    pub uid: Uuid,
    /// Instant the request was first observed; never mutated.
    pub created_at: DateTime<Utc>,
    /// Desired state.
    pub spec: AccessRequestSpec,
    /// Observed state.
    #[serde(default)]
    pub status: AccessRequestStatus,
}
