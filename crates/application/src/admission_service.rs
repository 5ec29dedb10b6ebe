use sudovisor_core::CallerIdentity;
use sudovisor_domain::AccessRequestSpec;

/// Verdict returned by admission validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionVerdict {
    /// The write may proceed.
    Allowed,
    /// The write must be rejected with the given reason.
    Denied(String),
}

impl AdmissionVerdict {
    /// Returns whether the verdict allows the write.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Returns the denial reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed => None,
            Self::Denied(reason) => Some(reason.as_str()),
        }
    }
}

/// Validates access request writes before they reach the store.
///
/// Sits in front of the store and runs independently of the
/// reconciliation core, which still re-checks the structural rules
/// defensively.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdmissionService;

impl AdmissionService {
    /// Creates the admission validator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validates a create or update of an access request spec.
    ///
    /// A caller may only request access for their own principal.
    #[must_use]
    pub fn validate(&self, spec: &AccessRequestSpec, caller: &CallerIdentity) -> AdmissionVerdict {
        if spec.principal.is_empty() {
            return AdmissionVerdict::Denied("User must be set".to_owned());
        }
        if spec.target_role.is_empty() {
            return AdmissionVerdict::Denied("Role must be set".to_owned());
        }
        if spec.principal != caller.username() {
            return AdmissionVerdict::Denied(format!(
                "{} cannot create an access request for {}",
                caller.username(),
                spec.principal
            ));
        }
        AdmissionVerdict::Allowed
    }
}

#[cfg(test)]
mod tests {
    use sudovisor_core::CallerIdentity;
    use sudovisor_domain::AccessRequestSpec;

    use super::{AdmissionService, AdmissionVerdict};

    fn spec(principal: &str, target_role: &str) -> AccessRequestSpec {
        AccessRequestSpec {
            principal: principal.to_owned(),
            target_role: target_role.to_owned(),
            reason: String::new(),
            requested_expiry: None,
        }
    }

    fn caller(username: &str) -> CallerIdentity {
        CallerIdentity::new(username, Vec::new())
    }

    #[test]
    fn own_request_is_allowed() {
        let verdict = AdmissionService::new().validate(&spec("alice", "admin"), &caller("alice"));
        assert_eq!(verdict, AdmissionVerdict::Allowed);
    }

    #[test]
    fn empty_principal_is_denied_first() {
        let verdict = AdmissionService::new().validate(&spec("", ""), &caller("alice"));
        assert_eq!(verdict.reason(), Some("User must be set"));
    }

    #[test]
    fn empty_role_is_denied() {
        let verdict = AdmissionService::new().validate(&spec("alice", ""), &caller("alice"));
        assert_eq!(verdict.reason(), Some("Role must be set"));
    }

    #[test]
    fn requesting_for_another_principal_is_denied() {
        let verdict = AdmissionService::new().validate(&spec("bob", "admin"), &caller("alice"));
        assert_eq!(
            verdict.reason(),
            Some("alice cannot create an access request for bob")
        );
    }
}
