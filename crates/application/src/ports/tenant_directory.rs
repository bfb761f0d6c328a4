//! Tenant directory port
//!
//! Lookup interface for canonical tenant records and for the caller's
//! super-admin role. Implementations must treat inactive tenants exactly
//! like missing ones: every finder returns `Ok(None)` for a deactivated
//! tenant so that no layer above can leak its existence.

use async_trait::async_trait;
use domain::{Tenant, TenantId, TenantSlug, UserId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Directory of canonical tenant records
///
/// Sits on the hot path of every request; implementations are expected to
/// be point reads against a fast store, usually wrapped in a short-TTL
/// cache decorator.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TenantDirectory: Send + Sync + std::fmt::Debug {
    /// Look up an active tenant by its slug
    async fn find_by_slug(&self, slug: &TenantSlug)
    -> Result<Option<Tenant>, ApplicationError>;

    /// Look up an active tenant by its mapped custom domain (normalized,
    /// lower-case hostname without port)
    async fn find_by_custom_domain(&self, host: &str)
    -> Result<Option<Tenant>, ApplicationError>;

    /// Look up an active tenant by its stable ID
    async fn find_by_id(&self, id: &TenantId) -> Result<Option<Tenant>, ApplicationError>;

    /// Whether the caller's account carries the super-admin role
    ///
    /// Keyed off the authenticated caller only; tenant signals play no part
    /// in this check.
    async fn is_super_admin(&self, user: &UserId) -> Result<bool, ApplicationError>;
}
