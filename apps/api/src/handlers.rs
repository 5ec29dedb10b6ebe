use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use sudovisor_core::AppError;
use tracing::info;

use crate::dto::{
    AdmissionOperation, AdmissionReviewRequest, AdmissionReviewResponse, HealthResponse,
};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Validates an access request write on behalf of the platform store.
pub async fn validate_admission_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(review): Json<AdmissionReviewRequest>,
) -> ApiResult<Json<AdmissionReviewResponse>> {
    require_shared_secret(&state, &headers)?;

    info!(
        request = %review.name,
        operation = ?review.operation,
        "validating access request write"
    );

    let response = match review.operation {
        AdmissionOperation::Create | AdmissionOperation::Update => {
            let verdict = state.admission_service.validate(&review.spec, &review.caller);
            AdmissionReviewResponse {
                allowed: verdict.is_allowed(),
                reason: verdict.reason().unwrap_or_default().to_owned(),
            }
        }
        // Deletions are always admitted; revocation is the reconciler's job.
        AdmissionOperation::Delete => AdmissionReviewResponse {
            allowed: true,
            reason: String::new(),
        },
    };

    Ok(Json(response))
}

fn require_shared_secret(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(secret) = state.shared_secret.as_deref() else {
        return Ok(());
    };

    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if presented == Some(secret) {
        Ok(())
    } else {
        Err(ApiError(AppError::Unauthorized(
            "admission shared secret mismatch".to_owned(),
        )))
    }
}
