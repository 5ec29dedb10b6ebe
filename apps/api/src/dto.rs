use serde::{Deserialize, Serialize};
use sudovisor_core::CallerIdentity;
use sudovisor_domain::AccessRequestSpec;

/// Health probe payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Static liveness marker.
    pub status: &'static str,
}

/// Write operation under admission review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionOperation {
    /// A new access request is being created.
    Create,
    /// An existing access request is being updated.
    Update,
    /// An access request is being deleted.
    Delete,
}

/// Admission review submitted by the platform before a write.
#[derive(Debug, Deserialize)]
pub struct AdmissionReviewRequest {
    /// Name of the access request under review.
    pub name: String,
    /// Operation the platform is about to apply.
    pub operation: AdmissionOperation,
    /// Desired spec of the access request.
    pub spec: AccessRequestSpec,
    /// Authenticated identity of the caller performing the write.
    pub caller: CallerIdentity,
}

/// Admission verdict returned to the platform.
#[derive(Debug, Serialize)]
pub struct AdmissionReviewResponse {
    /// Whether the write may proceed.
    pub allowed: bool,
    /// Reason the write was rejected, empty when allowed.
    pub reason: String,
}
