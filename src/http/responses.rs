// JSON bodies and error mapping for the moderation endpoint.

use crate::core::moderation::{ModerationError, ModerationOutcome, ValidationError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

const CONFIG_ERROR_MESSAGE: &str = "Missing required environment variables";

/// Error type returned by the moderation handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Missing required environment variables")]
    Config,

    #[error(transparent)]
    Moderation(#[from] ModerationError),

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation(err) => (StatusCode::BAD_REQUEST, validation_body(err)),
            ApiError::Config => (
                StatusCode::INTERNAL_SERVER_ERROR,
                internal_error_body(CONFIG_ERROR_MESSAGE),
            ),
            ApiError::Moderation(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                internal_error_body(&err.to_string()),
            ),
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({ "error": "Method not allowed" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

fn validation_body(err: &ValidationError) -> Value {
    match err {
        ValidationError::MissingFields(missing) => json!({
            "error": "Missing required fields",
            "missing": missing,
        }),
        ValidationError::InvalidEntityType => json!({ "error": err.to_string() }),
        ValidationError::InvalidFieldType(field) => json!({
            "error": "Invalid field type",
            "field": field,
        }),
        ValidationError::MalformedBody(message) => json!({
            "error": "Malformed request body",
            "message": message,
        }),
    }
}

fn internal_error_body(message: &str) -> Value {
    json!({
        "error": "Internal server error",
        "message": message,
    })
}

/// Success body for a finished moderation pass.
pub fn outcome_body(outcome: &ModerationOutcome) -> Value {
    match outcome {
        ModerationOutcome::Approved => json!({
            "flagged": false,
            "action": "approved",
            "message": "Content passed moderation",
        }),
        ModerationOutcome::ReportCreated {
            report_id,
            categories,
            priority,
        } => json!({
            "flagged": true,
            "action": "report_created",
            "report_id": report_id,
            "categories": categories,
            "priority": priority,
        }),
    }
}
