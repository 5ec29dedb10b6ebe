use std::collections::HashMap;

use async_trait::async_trait;
use sudovisor_application::{GrantCreation, GrantStore};
use sudovisor_core::{AppError, AppResult};
use sudovisor_domain::Grant;
use tokio::sync::RwLock;

/// In-memory grant store implementation.
#[derive(Debug, Default)]
pub struct InMemoryGrantStore {
    grants: RwLock<HashMap<String, Grant>>,
}

impl InMemoryGrantStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            grants: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl GrantStore for InMemoryGrantStore {
    async fn find_grant(&self, name: &str) -> AppResult<Option<Grant>> {
        Ok(self.grants.read().await.get(name).cloned())
    }

    async fn create_grant(&self, grant: Grant) -> AppResult<GrantCreation> {
        let mut grants = self.grants.write().await;

        if grants.contains_key(grant.name()) {
            return Ok(GrantCreation::AlreadyExists);
        }

        grants.insert(grant.name().to_owned(), grant);
        Ok(GrantCreation::Created)
    }

    async fn delete_grant(&self, name: &str) -> AppResult<()> {
        match self.grants.write().await.remove(name) {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!(
                "grant '{name}' does not exist"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use sudovisor_application::{GrantCreation, GrantStore};
    use sudovisor_domain::{AccessRequest, AccessRequestSpec, AccessRequestStatus, Grant};
    use uuid::Uuid;

    use super::InMemoryGrantStore;

    fn grant() -> Grant {
        Grant::for_request(&AccessRequest {
            name: "req-1".to_owned(),
            uid: Uuid::nil(),
            created_at: DateTime::UNIX_EPOCH,
            spec: AccessRequestSpec {
                principal: "alice".to_owned(),
                target_role: "admin".to_owned(),
                reason: String::new(),
                requested_expiry: None,
            },
            status: AccessRequestStatus::default(),
        })
    }

    #[tokio::test]
    async fn duplicate_creation_reports_already_exists() {
        let store = InMemoryGrantStore::new();

        let first = store.create_grant(grant()).await;
        let second = store.create_grant(grant()).await;

        assert_eq!(first.ok(), Some(GrantCreation::Created));
        assert_eq!(second.ok(), Some(GrantCreation::AlreadyExists));
    }

    #[tokio::test]
    async fn deleting_an_absent_grant_surfaces_not_found() {
        let store = InMemoryGrantStore::new();

        let deleted = store.delete_grant("sudo-alice-admin-req-1-gone").await;

        assert!(deleted.is_err());
    }
}
