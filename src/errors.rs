use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;
use validator::ValidationErrors;

/// Everything a handler can fail with. Each variant carries a stable `kind`
/// discriminant in the response body so the presentation layer can match on
/// it instead of probing messages.
#[derive(Debug)]
pub enum ApiError {
    /// Write attempted without a resolved identity.
    Unauthenticated,
    InvalidCredentials,
    /// Signup collided with an existing email or username.
    Conflict(&'static str),
    /// Content shape/content rule violated, scoped to one field.
    Validation { field: String, reason: String },
    /// Per-identity write quota exceeded.
    RateLimited,
    NotFound(String),
    /// Enrichment could not resolve an author for a stored post.
    InternalConsistency(String),
    /// The persistence call itself failed.
    Store(String),
}

impl ApiError {
    /// Collapse a `validator` report to its first field-scoped message.
    pub fn from_validation(errors: ValidationErrors) -> Self {
        for (field, field_errors) in errors.field_errors() {
            if let Some(e) = field_errors.first() {
                let reason = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                return ApiError::Validation {
                    field: field.to_string(),
                    reason,
                };
            }
        }
        ApiError::Validation {
            field: "body".to_string(),
            reason: "Invalid input".to_string(),
        }
    }
}

/// Convert our custom errors to HTTP responses
///
/// `IntoResponse` trait: Axum calls this to convert errors to responses
/// This is how we control what users see when errors occur
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "unauthenticated",
                "Sign in to do that".to_string(),
            ),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "Invalid credentials".to_string(),
            ),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.to_string()),
            ApiError::Validation { field, reason } => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({
                      "error": reason,
                      "kind": "validation",
                      "field": field
                    })),
                )
                    .into_response();
            }
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
                "Please slow down, you are posting too fast.".to_string(),
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::InternalConsistency(msg) => {
                error!("Consistency fault: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
            ApiError::Store(msg) => {
                error!("Store error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(serde_json::json!({
              "error": message,
              "kind": kind
            })),
        )
            .into_response()
    }
}
