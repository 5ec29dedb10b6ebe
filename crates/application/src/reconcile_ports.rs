use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sudovisor_core::AppResult;
use sudovisor_domain::{AccessDecision, AccessRequest, AccessRequestStatus, Grant};

/// Store port for access requests, owned by the orchestration platform.
#[async_trait]
pub trait AccessRequestStore: Send + Sync {
    /// Finds a request by name; deleted requests resolve to `None`.
    async fn find_request(&self, name: &str) -> AppResult<Option<AccessRequest>>;

    /// Lists all requests currently in the store.
    async fn list_requests(&self) -> AppResult<Vec<AccessRequest>>;

    /// Persists the observed status of a request.
    async fn update_status(&self, name: &str, status: AccessRequestStatus) -> AppResult<()>;
}

/// Outcome of a grant creation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantCreation {
    /// The grant was created by this call.
    Created,
    /// A grant with this name already exists; creation is idempotent.
    AlreadyExists,
}

/// Store port for materialized grants.
#[async_trait]
pub trait GrantStore: Send + Sync {
    /// Looks up a grant by its deterministic name; absence is a normal,
    /// non-error outcome.
    async fn find_grant(&self, name: &str) -> AppResult<Option<Grant>>;

    /// Creates a grant; a name collision reports
    /// [`GrantCreation::AlreadyExists`] rather than an error.
    async fn create_grant(&self, grant: Grant) -> AppResult<GrantCreation>;

    /// Deletes a grant by name; deleting an absent grant surfaces
    /// `AppError::NotFound` for the caller to absorb.
    async fn delete_grant(&self, name: &str) -> AppResult<()>;
}

/// Client port for the platform authorization oracle.
#[async_trait]
pub trait AccessReviewer: Send + Sync {
    /// Asks whether the principal may assume the target role.
    ///
    /// One query, no retry, no cache. Transport failures propagate so the
    /// reconcile pass aborts unresolved and the scheduler retries it.
    async fn review_access(&self, principal: &str, target_role: &str)
    -> AppResult<AccessDecision>;
}

/// Time source injected into the reconciler.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}
