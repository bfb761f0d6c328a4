//! SQLite tenant directory implementation
//!
//! Implements the `TenantDirectory` port against the control-plane
//! database. Every finder filters on `is_active = 1`, so a deactivated
//! tenant is indistinguishable from a missing one at the lowest layer.
//! Also carries the provisioning/deactivation writes used by the admin
//! surface and tests; those are not part of the port.

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::TenantDirectory;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{Tenant, TenantId, TenantSlug, UserId};
use rusqlite::{OptionalExtension, Row, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

const TENANT_COLUMNS: &str =
    "id, slug, name, custom_domain, is_active, settings, plan_type, created_at";

/// SQLite-based tenant directory
#[derive(Debug, Clone)]
pub struct SqliteTenantDirectory {
    pool: Arc<ConnectionPool>,
}

impl SqliteTenantDirectory {
    /// Create a new SQLite tenant directory
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Insert a tenant record (provisioning flows and test fixtures)
    #[instrument(skip(self, tenant), fields(slug = %tenant.slug()))]
    pub async fn insert_tenant(&self, tenant: &Tenant) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let tenant = tenant.clone();
        let now = Utc::now().to_rfc3339();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Directory(e.to_string()))?;

            let settings = serde_json::to_string(tenant.settings())
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            conn.execute(
                "INSERT INTO tenants (id, slug, name, custom_domain, is_active, settings, plan_type, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
                params![
                    tenant.id().to_string(),
                    tenant.slug().as_str(),
                    tenant.name(),
                    tenant.custom_domain(),
                    tenant.is_active(),
                    settings,
                    tenant.plan_type(),
                    now,
                ],
            )
            .map_err(|e| ApplicationError::Directory(e.to_string()))?;

            debug!("Inserted tenant");
            Ok(())
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    /// Deactivate a tenant. Returns whether a row changed.
    ///
    /// Never deletes; a deactivated tenant simply stops resolving once the
    /// directory cache entry expires or is invalidated.
    #[instrument(skip(self))]
    pub async fn deactivate(&self, id: TenantId) -> Result<bool, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let now = Utc::now().to_rfc3339();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Directory(e.to_string()))?;

            let changed = conn
                .execute(
                    "UPDATE tenants SET is_active = 0, updated_at = ?2 WHERE id = ?1",
                    params![id.to_string(), now],
                )
                .map_err(|e| ApplicationError::Directory(e.to_string()))?;

            debug!(changed, "Deactivated tenant");
            Ok(changed > 0)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    /// Insert a user record with the given role flag (test fixtures and
    /// provisioning flows)
    pub async fn insert_user(
        &self,
        user: UserId,
        is_super_admin: bool,
    ) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let now = Utc::now().to_rfc3339();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Directory(e.to_string()))?;

            conn.execute(
                "INSERT INTO users (id, is_super_admin, created_at) VALUES (?1, ?2, ?3)",
                params![user.to_string(), is_super_admin, now],
            )
            .map_err(|e| ApplicationError::Directory(e.to_string()))?;
            Ok(())
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    async fn find_one(
        &self,
        where_clause: &'static str,
        key: String,
    ) -> Result<Option<Tenant>, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Directory(e.to_string()))?;

            let sql =
                format!("SELECT {TENANT_COLUMNS} FROM tenants WHERE {where_clause} AND is_active = 1");
            conn.query_row(&sql, params![key], row_to_tenant)
                .optional()
                .map_err(|e| ApplicationError::Directory(e.to_string()))
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}

/// Convert a database row to a `Tenant`
fn row_to_tenant(row: &Row<'_>) -> Result<Tenant, rusqlite::Error> {
    let id_str: String = row.get(0)?;
    let slug_str: String = row.get(1)?;
    let name: String = row.get(2)?;
    let custom_domain: Option<String> = row.get(3)?;
    let is_active: bool = row.get(4)?;
    let settings_str: String = row.get(5)?;
    let plan_type: String = row.get(6)?;
    let created_at_str: String = row.get(7)?;

    let id = TenantId::parse(&id_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let slug = TenantSlug::parse(slug_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let settings: serde_json::Value = serde_json::from_str(&settings_str)
        .unwrap_or_else(|_| serde_json::Value::Object(serde_json::Map::new()));

    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

    Ok(Tenant::restore(
        id,
        slug,
        name,
        custom_domain,
        is_active,
        settings,
        plan_type,
        created_at,
    ))
}

#[async_trait]
impl TenantDirectory for SqliteTenantDirectory {
    #[instrument(skip(self), level = "debug")]
    async fn find_by_slug(&self, slug: &TenantSlug) -> Result<Option<Tenant>, ApplicationError> {
        self.find_one("slug = ?1", slug.as_str().to_string()).await
    }

    #[instrument(skip(self), level = "debug")]
    async fn find_by_custom_domain(
        &self,
        host: &str,
    ) -> Result<Option<Tenant>, ApplicationError> {
        self.find_one("custom_domain = ?1", host.to_string()).await
    }

    #[instrument(skip(self), level = "debug")]
    async fn find_by_id(&self, id: &TenantId) -> Result<Option<Tenant>, ApplicationError> {
        self.find_one("id = ?1", id.to_string()).await
    }

    #[instrument(skip(self), level = "debug")]
    async fn is_super_admin(&self, user: &UserId) -> Result<bool, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let key = user.to_string();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Directory(e.to_string()))?;

            let flag: Option<bool> = conn
                .query_row(
                    "SELECT is_super_admin FROM users WHERE id = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()
                .map_err(|e| ApplicationError::Directory(e.to_string()))?;

            Ok(flag.unwrap_or(false))
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}
