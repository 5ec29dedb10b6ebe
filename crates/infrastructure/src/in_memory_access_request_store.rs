use std::collections::HashMap;

use async_trait::async_trait;
use sudovisor_application::AccessRequestStore;
use sudovisor_core::{AppError, AppResult};
use sudovisor_domain::{AccessRequest, AccessRequestStatus};
use tokio::sync::RwLock;

/// In-memory access request store implementation.
#[derive(Debug, Default)]
pub struct InMemoryAccessRequestStore {
    requests: RwLock<HashMap<String, AccessRequest>>,
}

impl InMemoryAccessRequestStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            requests: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts or replaces a request, for tests and local development.
    pub async fn put_request(&self, request: AccessRequest) {
        self.requests
            .write()
            .await
            .insert(request.name.clone(), request);
    }
}

#[async_trait]
impl AccessRequestStore for InMemoryAccessRequestStore {
    async fn find_request(&self, name: &str) -> AppResult<Option<AccessRequest>> {
        Ok(self.requests.read().await.get(name).cloned())
    }

    async fn list_requests(&self) -> AppResult<Vec<AccessRequest>> {
        let requests = self.requests.read().await;

        let mut listed: Vec<AccessRequest> = requests.values().cloned().collect();
        listed.sort_by(|left, right| left.name.cmp(&right.name));

        Ok(listed)
    }

    async fn update_status(&self, name: &str, status: AccessRequestStatus) -> AppResult<()> {
        match self.requests.write().await.get_mut(name) {
            Some(request) => {
                request.status = status;
                Ok(())
            }
            None => Err(AppError::NotFound(format!(
                "access request '{name}' does not exist"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use sudovisor_application::AccessRequestStore;
    use sudovisor_domain::{AccessRequest, AccessRequestSpec, AccessRequestStatus, RequestPhase};
    use uuid::Uuid;

    use super::InMemoryAccessRequestStore;

    fn request(name: &str) -> AccessRequest {
        AccessRequest {
            name: name.to_owned(),
            uid: Uuid::nil(),
            created_at: DateTime::UNIX_EPOCH,
            spec: AccessRequestSpec::default(),
            status: AccessRequestStatus::default(),
        }
    }

    #[tokio::test]
    async fn listing_is_sorted_by_name() {
        let store = InMemoryAccessRequestStore::new();
        store.put_request(request("req-b")).await;
        store.put_request(request("req-a")).await;

        let names: Vec<String> = store
            .list_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|request| request.name)
            .collect();

        assert_eq!(names, vec!["req-a".to_owned(), "req-b".to_owned()]);
    }

    #[tokio::test]
    async fn status_update_requires_an_existing_request() {
        let store = InMemoryAccessRequestStore::new();
        store.put_request(request("req-1")).await;

        let status = AccessRequestStatus {
            phase: Some(RequestPhase::Pending),
            ..AccessRequestStatus::default()
        };

        assert!(store.update_status("req-1", status.clone()).await.is_ok());
        assert!(store.update_status("req-2", status).await.is_err());
    }
}
