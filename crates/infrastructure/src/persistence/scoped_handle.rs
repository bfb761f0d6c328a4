//! Scoped SQLite data handles
//!
//! Tenant isolation by separate database files: every tenant's data lives
//! in its own SQLite database under `data_dir/tenants/`, and the unscoped
//! super handle opens the control-plane database. A handle owns its
//! connection pool and releases it on `close()`.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use application::error::ApplicationError;
use application::ports::{DataHandleFactory, HandleScope, TenantDataHandle};
use async_trait::async_trait;
use tokio::task;
use tracing::{debug, instrument};

use super::connection::{ConnectionPool, PooledConn, create_pool};
use crate::config::DatabaseConfig;

/// A data handle backed by one SQLite connection pool
pub struct SqliteDataHandle {
    scope: HandleScope,
    pool: RwLock<Option<ConnectionPool>>,
}

impl std::fmt::Debug for SqliteDataHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let closed = self
            .pool
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none();
        f.debug_struct("SqliteDataHandle")
            .field("scope", &self.scope)
            .field("closed", &closed)
            .finish()
    }
}

impl SqliteDataHandle {
    fn new(scope: HandleScope, pool: ConnectionPool) -> Self {
        Self {
            scope,
            pool: RwLock::new(Some(pool)),
        }
    }

    /// Check out a connection from the handle's pool
    ///
    /// # Errors
    ///
    /// Returns `HandleConstruction` once the handle has been closed, and
    /// `Internal` when the pool cannot hand out a connection.
    pub fn conn(&self) -> Result<PooledConn, ApplicationError> {
        let guard = self.pool.read().unwrap_or_else(PoisonError::into_inner);
        let pool = guard.as_ref().ok_or_else(|| {
            ApplicationError::HandleConstruction(format!("handle for {} is closed", self.scope))
        })?;
        pool.get()
            .map_err(|e| ApplicationError::Internal(e.to_string()))
    }
}

#[async_trait]
impl TenantDataHandle for SqliteDataHandle {
    fn scope(&self) -> &HandleScope {
        &self.scope
    }

    async fn close(&self) -> Result<(), ApplicationError> {
        let dropped = self
            .pool
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if dropped.is_some() {
            debug!(scope = %self.scope, "Closed data handle");
        }
        Ok(())
    }
}

/// Factory opening per-scope SQLite pools
#[derive(Debug, Clone)]
pub struct SqliteHandleFactory {
    config: DatabaseConfig,
}

impl SqliteHandleFactory {
    /// Create a factory over the given database configuration
    #[must_use]
    pub const fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    fn db_path(&self, scope: &HandleScope) -> PathBuf {
        match scope {
            HandleScope::Super => self.config.control_db_path(),
            HandleScope::Tenant(id) => self.config.tenant_db_dir().join(format!("{id}.db")),
        }
    }
}

#[async_trait]
impl DataHandleFactory for SqliteHandleFactory {
    #[instrument(skip(self, scope), fields(scope = %scope))]
    async fn create(
        &self,
        scope: &HandleScope,
    ) -> Result<Arc<dyn TenantDataHandle>, ApplicationError> {
        let path = self.db_path(scope);
        let max_connections = self.config.max_connections;
        let scope = scope.clone();

        // Opening the database touches the filesystem; keep it off the
        // async executor.
        let pool = task::spawn_blocking(move || create_pool(&path, max_connections))
            .await
            .map_err(|e| ApplicationError::Internal(e.to_string()))?
            .map_err(|e| ApplicationError::HandleConstruction(e.to_string()))?;

        debug!("Constructed scoped data handle");
        Ok(Arc::new(SqliteDataHandle::new(scope, pool)))
    }
}
