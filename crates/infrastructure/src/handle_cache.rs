//! Scoped data-handle cache
//!
//! Process-wide cache mapping a `HandleScope` to its live data handle.
//! Construction is coalesced per key: concurrent first requests for the
//! same scope await a single factory call instead of racing, and a failed
//! construction is never cached, so the next caller retries. Entries live
//! until an administrator flush or process shutdown.
//!
//! Before constructing a tenant handle the scope is re-validated as active
//! against the directory passed in here — which must be the uncached store,
//! not the TTL decorator, so a deactivation that the read cache has not
//! noticed yet still cannot produce a fresh handle.

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{DataHandleFactory, HandleScope, TenantDataHandle, TenantDirectory};
use moka::future::Cache;
use tracing::{debug, info, instrument, warn};

/// Cache of live scoped data handles
pub struct ScopedHandleCache {
    factory: Arc<dyn DataHandleFactory>,
    directory: Arc<dyn TenantDirectory>,
    handles: Cache<HandleScope, Arc<dyn TenantDataHandle>>,
}

impl std::fmt::Debug for ScopedHandleCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedHandleCache")
            .field("entries", &self.handles.entry_count())
            .finish_non_exhaustive()
    }
}

impl ScopedHandleCache {
    /// Create a handle cache over a factory and the uncached directory
    #[must_use]
    pub fn new(factory: Arc<dyn DataHandleFactory>, directory: Arc<dyn TenantDirectory>) -> Self {
        Self {
            factory,
            directory,
            handles: Cache::builder().build(),
        }
    }

    /// Get the handle for a scope, constructing it on first use
    ///
    /// # Errors
    ///
    /// - `TenantInactiveOrUnknown` when a tenant scope no longer refers to
    ///   an active tenant
    /// - `HandleConstruction` when the factory fails; the failure is not
    ///   cached and the next call constructs again
    #[instrument(skip(self, scope), fields(scope = %scope))]
    pub async fn get(
        &self,
        scope: &HandleScope,
    ) -> Result<Arc<dyn TenantDataHandle>, ApplicationError> {
        self.handles
            .try_get_with_by_ref(scope, self.construct(scope))
            .await
            .map_err(|e: Arc<ApplicationError>| (*e).clone())
    }

    async fn construct(
        &self,
        scope: &HandleScope,
    ) -> Result<Arc<dyn TenantDataHandle>, ApplicationError> {
        if let HandleScope::Tenant(id) = scope {
            if self.directory.find_by_id(id).await?.is_none() {
                warn!(tenant_id = %id, "refusing handle for inactive or unknown tenant");
                return Err(ApplicationError::TenantInactiveOrUnknown);
            }
        }
        debug!("constructing scoped data handle");
        self.factory.create(scope).await
    }

    /// Close and evict the handle for one scope, if cached
    ///
    /// Used when a tenant is deactivated so its pooled resources are
    /// released right away.
    pub async fn evict(&self, scope: &HandleScope) {
        let handle = self.handles.get(scope).await;
        self.handles.invalidate(scope).await;
        if let Some(handle) = handle {
            if let Err(e) = handle.close().await {
                warn!(scope = %scope, error = %e, "error closing evicted handle");
            }
        }
    }

    /// Close and evict every cached handle. Returns how many were closed.
    pub async fn flush(&self) -> usize {
        self.handles.run_pending_tasks().await;
        let handles: Vec<Arc<dyn TenantDataHandle>> =
            self.handles.iter().map(|(_, handle)| handle).collect();
        self.handles.invalidate_all();

        for handle in &handles {
            if let Err(e) = handle.close().await {
                warn!(scope = %handle.scope(), error = %e, "error closing handle during flush");
            }
        }
        handles.len()
    }

    /// Dispose every handle at process shutdown
    pub async fn shutdown(&self) {
        let closed = self.flush().await;
        info!(closed, "scoped handle cache shut down");
    }

    /// Number of live cached handles
    pub async fn entry_count(&self) -> u64 {
        self.handles.run_pending_tasks().await;
        self.handles.entry_count()
    }
}
