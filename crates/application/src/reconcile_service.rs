use std::sync::Arc;

use chrono::Duration;
use sudovisor_core::{AppError, AppResult};
use sudovisor_domain::{
    AccessRequest, AccessRequestStatus, ExpiryBounds, Grant, RequestPhase, Resolution,
    apply_decision, resolve,
};

use crate::{AccessRequestStore, AccessReviewer, Clock, GrantCreation, GrantStore};

/// Scheduling instruction handed back to the platform scheduler after a
/// reconcile pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Nothing further to do until the request changes.
    Done,
    /// Re-reconcile after a short delay.
    Requeue,
    /// Re-reconcile once the given duration has elapsed.
    RequeueAfter(Duration),
}

/// Drives one request through a full evaluation-and-side-effect cycle.
#[derive(Clone)]
pub struct ReconcileService {
    request_store: Arc<dyn AccessRequestStore>,
    grant_store: Arc<dyn GrantStore>,
    access_reviewer: Arc<dyn AccessReviewer>,
    clock: Arc<dyn Clock>,
    bounds: ExpiryBounds,
}

impl ReconcileService {
    /// Creates a reconcile service over the platform ports.
    #[must_use]
    pub fn new(
        request_store: Arc<dyn AccessRequestStore>,
        grant_store: Arc<dyn GrantStore>,
        access_reviewer: Arc<dyn AccessReviewer>,
        clock: Arc<dyn Clock>,
        bounds: ExpiryBounds,
    ) -> Self {
        Self {
            request_store,
            grant_store,
            access_reviewer,
            clock,
            bounds,
        }
    }

    /// Runs one reconcile pass for the named request.
    pub async fn reconcile(&self, name: &str) -> AppResult<ReconcileOutcome> {
        // A deleted request cannot be fixed by requeueing; the next pass
        // comes from a new change notification.
        let Some(request) = self.request_store.find_request(name).await? else {
            return Ok(ReconcileOutcome::Done);
        };

        let grant_name = Grant::name_for(
            &request.spec.principal,
            &request.spec.target_role,
            &request.name,
            request.created_at,
        );
        let grant = self.grant_store.find_grant(&grant_name).await?;

        let status = match resolve(&request, grant.as_ref(), self.clock.now(), self.bounds) {
            Resolution::Settled(status) => status,
            Resolution::AwaitingDecision(status) => {
                let decision = self
                    .access_reviewer
                    .review_access(&request.spec.principal, &request.spec.target_role)
                    .await?;
                apply_decision(status, &decision)
            }
        };

        self.request_store
            .update_status(&request.name, status.clone())
            .await?;

        match status.phase {
            Some(RequestPhase::Pending) => self.on_pending(&request, &status).await,
            Some(RequestPhase::Ready) => Ok(self.requeue_at_expiry(&status)),
            Some(RequestPhase::Expired) => self.on_expired(&status).await,
            Some(RequestPhase::Denied | RequestPhase::Error) | None => Ok(ReconcileOutcome::Done),
        }
    }

    async fn on_pending(
        &self,
        request: &AccessRequest,
        status: &AccessRequestStatus,
    ) -> AppResult<ReconcileOutcome> {
        match self
            .grant_store
            .create_grant(Grant::for_request(request))
            .await?
        {
            // The grant exists but was not visible to this pass's lookup;
            // re-read shortly once the store catches up.
            GrantCreation::AlreadyExists => Ok(ReconcileOutcome::Requeue),
            GrantCreation::Created => Ok(self.requeue_at_expiry(status)),
        }
    }

    async fn on_expired(&self, status: &AccessRequestStatus) -> AppResult<ReconcileOutcome> {
        if let Some(grant_ref) = status.grant_ref.as_deref() {
            match self.grant_store.delete_grant(grant_ref).await {
                Ok(()) => {}
                // Someone else revoked it first; expiry only cares that
                // the grant is gone.
                Err(AppError::NotFound(_)) => {}
                Err(error) => return Err(error),
            }
        }
        Ok(ReconcileOutcome::Done)
    }

    fn requeue_at_expiry(&self, status: &AccessRequestStatus) -> ReconcileOutcome {
        match status.expires_at {
            Some(expires_at) => ReconcileOutcome::RequeueAfter(expires_at - self.clock.now()),
            None => ReconcileOutcome::Done,
        }
    }
}
