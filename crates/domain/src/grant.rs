use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AccessRequest;

/// Back-reference from a grant to the access request that owns it.
///
/// The platform garbage collector follows this link to remove grants
/// whose owning request was deleted directly; the reconciler is not the
/// only deleter of grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantOwner {
    /// Name of the owning access request.
    pub request_name: String,
    /// Stable identity of the owning access request.
    pub request_uid: Uuid,
}

/// A materialized permission binding for an approved access request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    name: String,
    subject: String,
    role_ref: String,
    owner: GrantOwner,
}

impl Grant {
    /// Builds the grant payload for a request, bound to its principal and
    /// role and owned by the request.
    #[must_use]
    pub fn for_request(request: &AccessRequest) -> Self {
        Self {
            name: Self::name_for(
                &request.spec.principal,
                &request.spec.target_role,
                &request.name,
                request.created_at,
            ),
            subject: request.spec.principal.clone(),
            role_ref: request.spec.target_role.clone(),
            owner: GrantOwner {
                request_name: request.name.clone(),
                request_uid: request.uid,
            },
        }
    }

    /// Deterministic grant name for a request identity.
    ///
    /// Stable across repeated reconciles of the same request; the
    /// second-precision creation timestamp makes the name fresh if the
    /// same request is recreated at a different instant.
    #[must_use]
    pub fn name_for(
        principal: &str,
        target_role: &str,
        request_name: &str,
        created_at: DateTime<Utc>,
    ) -> String {
        format!(
            "sudo-{principal}-{target_role}-{request_name}-{}",
            created_at.format("%Y.%m.%d.%H.%M.%S")
        )
    }

    /// Returns the grant name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the principal the grant binds.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the role the grant binds the subject to.
    #[must_use]
    pub fn role_ref(&self) -> &str {
        self.role_ref.as_str()
    }

    /// Returns the owning-request back-reference.
    #[must_use]
    pub fn owner(&self) -> &GrantOwner {
        &self.owner
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, Utc};
    use uuid::Uuid;

    use crate::{AccessRequest, AccessRequestSpec, AccessRequestStatus};

    use super::Grant;

    fn request(created_at: DateTime<Utc>) -> AccessRequest {
        AccessRequest {
            name: "req-1".to_owned(),
            uid: Uuid::nil(),
            created_at,
            spec: AccessRequestSpec {
                principal: "alice".to_owned(),
                target_role: "admin".to_owned(),
                reason: "incident response".to_owned(),
                requested_expiry: None,
            },
            status: AccessRequestStatus::default(),
        }
    }

    #[test]
    fn name_is_stable_for_an_unchanged_identity() {
        let created_at = DateTime::<Utc>::UNIX_EPOCH;
        let first = Grant::name_for("alice", "admin", "req-1", created_at);
        let second = Grant::name_for("alice", "admin", "req-1", created_at);
        assert_eq!(first, second);
    }

    #[test]
    fn name_changes_with_creation_instant() {
        let created_at = DateTime::<Utc>::UNIX_EPOCH;
        let recreated_at = created_at + Duration::seconds(1);
        assert_ne!(
            Grant::name_for("alice", "admin", "req-1", created_at),
            Grant::name_for("alice", "admin", "req-1", recreated_at)
        );
    }

    #[test]
    fn grant_binds_principal_role_and_owner() {
        let request = request(DateTime::<Utc>::UNIX_EPOCH);
        let grant = Grant::for_request(&request);

        assert_eq!(grant.subject(), "alice");
        assert_eq!(grant.role_ref(), "admin");
        assert_eq!(grant.owner().request_name, "req-1");
        assert_eq!(
            grant.name(),
            "sudo-alice-admin-req-1-1970.01.01.00.00.00"
        );
    }
}
