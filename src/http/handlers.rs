// Moderation endpoint handlers.
//
// validate -> classify -> (report if flagged) -> respond.
// Every failure ends the request with an explicit non-2xx response.

use super::responses::{outcome_body, ApiError};
use super::AppState;
use crate::core::moderation::{decode_payload, validate_request, ValidationError};
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

/// `POST` handler: moderate one piece of content.
pub async fn moderate_content(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let payload = decode_payload(&body).map_err(reject)?;
    let request = validate_request(&payload).map_err(reject)?;

    let service = match &state {
        AppState::Ready(service) => service,
        AppState::Misconfigured(err) => {
            tracing::error!(
                entity_type = %request.entity_type,
                entity_id = %request.entity_id,
                "Cannot moderate content: {}",
                err
            );
            return Err(ApiError::Config);
        }
    };

    let outcome = service.moderate(&request).await.map_err(|err| {
        tracing::error!(
            entity_type = %request.entity_type,
            entity_id = %request.entity_id,
            "Moderation failed: {}",
            err
        );
        ApiError::from(err)
    })?;

    Ok(Json(outcome_body(&outcome)))
}

/// Any `OPTIONS` request, browser preflight included.
pub async fn preflight() -> &'static str {
    "ok"
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

fn reject(err: ValidationError) -> ApiError {
    tracing::warn!("Rejected moderation request: {}", err);
    ApiError::from(err)
}
