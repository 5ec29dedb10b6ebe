use async_trait::async_trait;
use reqwest::StatusCode;
use sudovisor_application::{GrantCreation, GrantStore};
use sudovisor_core::{AppError, AppResult};
use sudovisor_domain::Grant;

use crate::platform_api::{PlatformApi, response_error, transport_error};

/// Grant store backed by the orchestration platform API.
pub struct PlatformGrantStore {
    api: PlatformApi,
}

impl PlatformGrantStore {
    /// Creates a store over the given platform client.
    #[must_use]
    pub fn new(api: PlatformApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl GrantStore for PlatformGrantStore {
    async fn find_grant(&self, name: &str) -> AppResult<Option<Grant>> {
        let response = self
            .api
            .get(&format!("/v1/grants/{name}"))
            .send()
            .await
            .map_err(|error| transport_error("grant lookup", error))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(response_error("grant lookup", response).await);
        }

        let grant = response.json::<Grant>().await.map_err(|error| {
            AppError::Internal(format!("failed to parse grant payload: {error}"))
        })?;

        Ok(Some(grant))
    }

    async fn create_grant(&self, grant: Grant) -> AppResult<GrantCreation> {
        let response = self
            .api
            .post("/v1/grants")
            .json(&grant)
            .send()
            .await
            .map_err(|error| transport_error("grant creation", error))?;

        if response.status() == StatusCode::CONFLICT {
            return Ok(GrantCreation::AlreadyExists);
        }
        if !response.status().is_success() {
            return Err(response_error("grant creation", response).await);
        }

        Ok(GrantCreation::Created)
    }

    async fn delete_grant(&self, name: &str) -> AppResult<()> {
        let response = self
            .api
            .delete(&format!("/v1/grants/{name}"))
            .send()
            .await
            .map_err(|error| transport_error("grant deletion", error))?;

        if !response.status().is_success() {
            return Err(response_error("grant deletion", response).await);
        }

        Ok(())
    }
}
