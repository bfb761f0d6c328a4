//! Route definitions
//!
//! Three route groups with different resolution modes:
//! - health/readiness: no resolution
//! - tenant-scoped API: required resolution
//! - public lookup and admin: optional resolution (admin routes add the
//!   super-admin guard, which must reject independently of whether a
//!   tenant resolved)

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{SuperAdminLayer, TenantResolutionLayer};
use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let resolver = Arc::clone(&state.resolver);

    let health = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    let tenant_api = Router::new()
        .route("/v1/tenant", get(handlers::tenants::current))
        .layer(TenantResolutionLayer::required(Arc::clone(&resolver)));

    let public_api = Router::new()
        .route("/v1/tenants/{slug}", get(handlers::tenants::lookup))
        .layer(TenantResolutionLayer::optional(Arc::clone(&resolver)));

    // Guard first, resolution second: the last-added layer is outermost,
    // so resolution runs before the guard reads the context.
    let admin_api = Router::new()
        .route("/v1/admin/tenants/{slug}", get(handlers::admin::get_tenant))
        .route(
            "/v1/admin/tenants/{slug}/deactivate",
            post(handlers::admin::deactivate_tenant),
        )
        .route("/v1/admin/handles/flush", post(handlers::admin::flush_handles))
        .layer(SuperAdminLayer::new())
        .layer(TenantResolutionLayer::optional(resolver));

    Router::new()
        .merge(health)
        .merge(tenant_api)
        .merge(public_api)
        .merge(admin_api)
        .with_state(state)
}
