//! Super-admin endpoints
//!
//! All routes here sit behind the super-admin guard. Deactivation flips the
//! tenant's flag, then invalidates the directory cache and evicts the
//! tenant's data handle so the change is effective immediately rather than
//! after the directory TTL.

use application::ports::{HandleScope, TenantDirectory};
use axum::{
    Json,
    extract::{Path, State},
};
use domain::TenantSlug;
use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::handlers::tenants::TenantSnapshot;
use crate::state::AppState;

/// Full tenant record for operators
pub async fn get_tenant(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<TenantSnapshot>, ApiError> {
    let Ok(slug) = TenantSlug::parse(slug) else {
        return Err(ApiError::NotFound("tenant".to_string()));
    };

    match state
        .directory
        .find_by_slug(&slug)
        .await
        .map_err(ApiError::from)?
    {
        Some(tenant) => Ok(Json(TenantSnapshot::from(&tenant))),
        None => Err(ApiError::NotFound("tenant".to_string())),
    }
}

/// Deactivation outcome
#[derive(Debug, Serialize)]
pub struct DeactivateResponse {
    pub slug: String,
    pub deactivated: bool,
}

/// Deactivate a tenant
///
/// The record is kept; the tenant simply stops resolving. Cache entries
/// are invalidated and the scoped handle is closed in the same call.
pub async fn deactivate_tenant(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<DeactivateResponse>, ApiError> {
    let Ok(slug) = TenantSlug::parse(slug) else {
        return Err(ApiError::NotFound("tenant".to_string()));
    };

    // Read through the uncached store: only an active tenant can be
    // deactivated, and the snapshot is needed for cache invalidation.
    let Some(tenant) = state
        .store
        .find_by_slug(&slug)
        .await
        .map_err(ApiError::from)?
    else {
        return Err(ApiError::NotFound("tenant".to_string()));
    };

    state
        .store
        .deactivate(tenant.id())
        .await
        .map_err(ApiError::from)?;

    state.directory.invalidate(&tenant).await;
    state.handles.evict(&HandleScope::Tenant(tenant.id())).await;

    info!(tenant_id = %tenant.id(), slug = %tenant.slug(), "tenant deactivated");

    Ok(Json(DeactivateResponse {
        slug: slug.into_string(),
        deactivated: true,
    }))
}

/// Handle-cache flush outcome
#[derive(Debug, Serialize)]
pub struct FlushResponse {
    /// How many live handles were closed
    pub closed: usize,
}

/// Close and evict every cached data handle
pub async fn flush_handles(State(state): State<AppState>) -> Json<FlushResponse> {
    let closed = state.handles.flush().await;
    info!(closed, "handle cache flushed by operator");
    Json(FlushResponse { closed })
}
