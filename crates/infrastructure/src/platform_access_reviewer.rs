use async_trait::async_trait;
use serde::Serialize;
use sudovisor_application::AccessReviewer;
use sudovisor_core::{AppError, AppResult};
use sudovisor_domain::AccessDecision;

use crate::platform_api::{PlatformApi, response_error, transport_error};

const SUDO_VERB: &str = "sudo";
const ROLE_RESOURCE: &str = "roles";

#[derive(Debug, Serialize)]
struct AccessReviewRequest<'a> {
    principal: &'a str,
    verb: &'a str,
    resource: &'a str,
    resource_name: &'a str,
}

/// Authorization oracle client backed by the orchestration platform API.
pub struct PlatformAccessReviewer {
    api: PlatformApi,
}

impl PlatformAccessReviewer {
    /// Creates a reviewer over the given platform client.
    #[must_use]
    pub fn new(api: PlatformApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AccessReviewer for PlatformAccessReviewer {
    async fn review_access(
        &self,
        principal: &str,
        target_role: &str,
    ) -> AppResult<AccessDecision> {
        let review = AccessReviewRequest {
            principal,
            verb: SUDO_VERB,
            resource: ROLE_RESOURCE,
            resource_name: target_role,
        };

        let response = self
            .api
            .post("/v1/access-reviews")
            .json(&review)
            .send()
            .await
            .map_err(|error| transport_error("access review", error))?;

        if !response.status().is_success() {
            return Err(response_error("access review", response).await);
        }

        response.json::<AccessDecision>().await.map_err(|error| {
            AppError::Internal(format!("failed to parse access review payload: {error}"))
        })
    }
}
