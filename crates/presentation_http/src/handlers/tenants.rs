//! Tenant-facing endpoints

use application::TenantContext;
use application::ports::TenantDirectory;
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use domain::{Tenant, TenantSlug};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Full tenant snapshot exposed to resolved callers
#[derive(Debug, Serialize)]
pub struct TenantSnapshot {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub custom_domain: Option<String>,
    pub plan_type: String,
    pub settings: serde_json::Value,
}

impl From<&Tenant> for TenantSnapshot {
    fn from(tenant: &Tenant) -> Self {
        Self {
            id: tenant.id().to_string(),
            slug: tenant.slug().to_string(),
            name: tenant.name().to_string(),
            custom_domain: tenant.custom_domain().map(ToOwned::to_owned),
            plan_type: tenant.plan_type().to_string(),
            settings: tenant.settings().clone(),
        }
    }
}

/// The resolved request context as handlers see it
#[derive(Debug, Serialize)]
pub struct ContextResponse {
    pub tenant_id: Option<String>,
    pub tenant: Option<TenantSnapshot>,
    pub is_super_admin: bool,
}

/// Current tenant context for the request
///
/// Requires tenant resolution; a cross-tenant super admin sees a null
/// tenant with the flag set.
pub async fn current(Extension(ctx): Extension<TenantContext>) -> Json<ContextResponse> {
    Json(ContextResponse {
        tenant_id: ctx.tenant_id().map(|id| id.to_string()),
        tenant: ctx.tenant().map(TenantSnapshot::from),
        is_super_admin: ctx.is_super_admin(),
    })
}

/// Public tenant info, safe to expose without a resolved tenant
#[derive(Debug, Serialize)]
pub struct PublicTenant {
    pub slug: String,
    pub name: String,
}

/// Public lookup of an active tenant by slug
///
/// Lives behind optional resolution so it stays reachable from anywhere.
/// Unknown, inactive, and syntactically invalid slugs are all the same 404.
pub async fn lookup(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PublicTenant>, ApiError> {
    let Ok(slug) = TenantSlug::parse(slug) else {
        return Err(ApiError::NotFound("tenant".to_string()));
    };

    match state
        .directory
        .find_by_slug(&slug)
        .await
        .map_err(ApiError::from)?
    {
        Some(tenant) => Ok(Json(PublicTenant {
            slug: tenant.slug().to_string(),
            name: tenant.name().to_string(),
        })),
        None => Err(ApiError::NotFound("tenant".to_string())),
    }
}
