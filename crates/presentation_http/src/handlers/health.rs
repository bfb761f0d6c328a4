//! Health and readiness endpoints
//!
//! Both are excluded from tenant resolution. Readiness additionally proves
//! the data layer is reachable by constructing (or reusing) the unscoped
//! super handle.

use application::ports::HandleScope;
use axum::{Json, extract::State};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: &'static str,
    /// Crate version
    pub version: &'static str,
}

/// Liveness check
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness check: verifies the control-plane database is reachable
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, ApiError> {
    state
        .handles
        .get(&HandleScope::Super)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(HealthResponse {
        status: "ready",
        version: env!("CARGO_PKG_VERSION"),
    }))
}
