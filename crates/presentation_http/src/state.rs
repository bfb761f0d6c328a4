//! Application state shared across handlers

use std::sync::Arc;

use application::TenantResolver;
use infrastructure::{
    AppConfig, CachedTenantDirectory, ScopedHandleCache, SqliteTenantDirectory,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Tenant resolution orchestrator
    pub resolver: Arc<TenantResolver>,
    /// TTL-cached tenant directory used by read handlers
    pub directory: Arc<CachedTenantDirectory<SqliteTenantDirectory>>,
    /// Uncached directory store, for admin writes
    pub store: SqliteTenantDirectory,
    /// Scoped data-handle cache
    pub handles: Arc<ScopedHandleCache>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}
