use serde::{Deserialize, Serialize};

/// Identity of a caller as authenticated by the orchestration platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    username: String,
    #[serde(default)]
    groups: Vec<String>,
}

impl CallerIdentity {
    /// Creates a caller identity from platform authentication data.
    #[must_use]
    pub fn new(username: impl Into<String>, groups: Vec<String>) -> Self {
        Self {
            username: username.into(),
            groups,
        }
    }

    /// Returns the authenticated username.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Returns the groups the platform resolved for the caller.
    #[must_use]
    pub fn groups(&self) -> &[String] {
        self.groups.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::CallerIdentity;

    #[test]
    fn identity_deserializes_without_groups() {
        let parsed: Result<CallerIdentity, _> = serde_json::from_str(r#"{"username":"alice"}"#);
        assert_eq!(parsed.ok(), Some(CallerIdentity::new("alice", Vec::new())));
    }
}
