//! API error handling
//!
//! Maps application errors onto HTTP responses without leaking tenant
//! existence: an unknown tenant, a deactivated tenant, and a missing tenant
//! signal all produce the same 401 body. In production mode, internal
//! error details are stripped entirely.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Global flag to control error detail exposure
/// Set to false in production to prevent information leakage
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

/// Configure whether internal error details should be exposed in responses.
///
/// In production environments, this should be set to `false`.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No active tenant could be attached to the request. Deliberately
    /// carries no detail about why.
    #[error("Tenant required")]
    TenantRequired,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None)
            },
            // One indistinguishable body for every tenant-resolution
            // rejection, regardless of mode.
            Self::TenantRequired => (
                StatusCode::UNAUTHORIZED,
                "tenant_required",
                "A tenant is required for this request".to_string(),
                None,
            ),
            Self::Forbidden(msg) => {
                let sanitized = if should_expose_details() {
                    msg.clone()
                } else {
                    "Access denied".to_string()
                };
                (StatusCode::FORBIDDEN, "forbidden", sanitized, None)
            },
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone(), None),
            Self::ServiceUnavailable(msg) => {
                let sanitized = if should_expose_details() {
                    msg.clone()
                } else {
                    "Service temporarily unavailable".to_string()
                };
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "service_unavailable",
                    sanitized,
                    None,
                )
            },
            Self::Internal(msg) => {
                let details = if should_expose_details() {
                    Some(msg.clone())
                } else {
                    None
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    details,
                )
            },
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::TenantNotResolved | ApplicationError::TenantInactiveOrUnknown => {
                Self::TenantRequired
            },
            ApplicationError::SuperAdminRequired => {
                Self::Forbidden("Super admin privileges required".to_string())
            },
            ApplicationError::HandleConstruction(msg) => Self::ServiceUnavailable(msg),
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::Directory(msg)
            | ApplicationError::Configuration(msg)
            | ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}
