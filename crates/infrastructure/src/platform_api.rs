use reqwest::StatusCode;
use sudovisor_core::AppError;

/// Connection settings for the orchestration platform API.
#[derive(Debug, Clone)]
pub struct PlatformApiConfig {
    /// Base URL of the platform API.
    pub base_url: String,
    /// Bearer token presented on every call.
    pub token: String,
}

/// Shared HTTP client for the platform-backed adapters.
#[derive(Debug, Clone)]
pub struct PlatformApi {
    http_client: reqwest::Client,
    base_url: String,
    token: String,
}

impl PlatformApi {
    /// Creates a platform API client from connection settings.
    #[must_use]
    pub fn new(http_client: reqwest::Client, config: PlatformApiConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            token: config.token,
        }
    }

    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http_client.get(self.endpoint(path)))
    }

    pub(crate) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http_client.post(self.endpoint(path)))
    }

    pub(crate) fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http_client.put(self.endpoint(path)))
    }

    pub(crate) fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http_client.delete(self.endpoint(path)))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.bearer_auth(self.token.as_str())
    }
}

pub(crate) fn transport_error(context: &str, error: reqwest::Error) -> AppError {
    AppError::Internal(format!("{context} transport error: {error}"))
}

pub(crate) async fn response_error(context: &str, response: reqwest::Response) -> AppError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<body unavailable>".to_owned());

    match status {
        StatusCode::NOT_FOUND => AppError::NotFound(format!("{context}: {body}")),
        StatusCode::CONFLICT => AppError::Conflict(format!("{context}: {body}")),
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(format!("{context}: {body}")),
        StatusCode::FORBIDDEN => AppError::Forbidden(format!("{context}: {body}")),
        _ => AppError::Internal(format!(
            "{context} returned status {}: {body}",
            status.as_u16()
        )),
    }
}
