use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use sudovisor_application::AccessRequestStore;
use sudovisor_core::{AppError, AppResult};
use sudovisor_domain::{AccessRequest, AccessRequestStatus};

use crate::platform_api::{PlatformApi, response_error, transport_error};

#[derive(Debug, Deserialize)]
struct AccessRequestListResponse {
    items: Vec<AccessRequest>,
}

/// Access request store backed by the orchestration platform API.
pub struct PlatformAccessRequestStore {
    api: PlatformApi,
}

impl PlatformAccessRequestStore {
    /// Creates a store over the given platform client.
    #[must_use]
    pub fn new(api: PlatformApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AccessRequestStore for PlatformAccessRequestStore {
    async fn find_request(&self, name: &str) -> AppResult<Option<AccessRequest>> {
        let response = self
            .api
            .get(&format!("/v1/access-requests/{name}"))
            .send()
            .await
            .map_err(|error| transport_error("access request lookup", error))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(response_error("access request lookup", response).await);
        }

        let request = response.json::<AccessRequest>().await.map_err(|error| {
            AppError::Internal(format!("failed to parse access request payload: {error}"))
        })?;

        Ok(Some(request))
    }

    async fn list_requests(&self) -> AppResult<Vec<AccessRequest>> {
        let response = self
            .api
            .get("/v1/access-requests")
            .send()
            .await
            .map_err(|error| transport_error("access request listing", error))?;

        if !response.status().is_success() {
            return Err(response_error("access request listing", response).await);
        }

        let listed = response
            .json::<AccessRequestListResponse>()
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to parse access request list payload: {error}"
                ))
            })?;

        Ok(listed.items)
    }

    async fn update_status(&self, name: &str, status: AccessRequestStatus) -> AppResult<()> {
        let response = self
            .api
            .put(&format!("/v1/access-requests/{name}/status"))
            .json(&status)
            .send()
            .await
            .map_err(|error| transport_error("access request status update", error))?;

        if !response.status().is_success() {
            return Err(response_error("access request status update", response).await);
        }

        Ok(())
    }
}
