//! Scoped data-access handle port
//!
//! A `TenantDataHandle` is an opaque, possibly-pooled resource bound to
//! exactly one tenant (or to the unscoped super mode). A handle obtained
//! for tenant A must never touch tenant B's data; the `HandleScope` sum
//! type makes the unscoped/super handle and tenant-scoped handles distinct
//! keys by construction.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use domain::TenantId;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;
use crate::request_context::TenantContext;

/// The isolation scope a data handle is bound to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HandleScope {
    /// Scoped to a single tenant's data
    Tenant(TenantId),
    /// Unscoped superuser access for cross-tenant super-admin operations
    Super,
}

impl HandleScope {
    /// Derive the scope for a resolved request context
    ///
    /// A context with a tenant snapshot maps to that tenant's scope — also
    /// when a super admin is impersonating the tenant, since inspection
    /// reads that tenant's data. A super admin without a tenant gets the
    /// unscoped super handle. A context with neither cannot be scoped.
    pub fn for_context(ctx: &TenantContext) -> Result<Self, ApplicationError> {
        match (ctx.tenant_id(), ctx.is_super_admin()) {
            (Some(id), _) => Ok(Self::Tenant(id)),
            (None, true) => Ok(Self::Super),
            (None, false) => Err(ApplicationError::TenantNotResolved),
        }
    }

    /// The tenant this scope is bound to, if any
    #[must_use]
    pub const fn tenant_id(&self) -> Option<TenantId> {
        match self {
            Self::Tenant(id) => Some(*id),
            Self::Super => None,
        }
    }

    /// Whether this is the unscoped super mode
    #[must_use]
    pub const fn is_super(&self) -> bool {
        matches!(self, Self::Super)
    }
}

impl fmt::Display for HandleScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tenant(id) => write!(f, "tenant:{id}"),
            Self::Super => write!(f, "super"),
        }
    }
}

/// An opaque data-access handle bound to one scope
///
/// How isolation is implemented (separate schema, row filter, separate
/// connection string) is the adapter's business; callers only rely on the
/// handle being scope-exclusive.
#[async_trait]
pub trait TenantDataHandle: Send + Sync + fmt::Debug {
    /// The scope this handle is bound to
    fn scope(&self) -> &HandleScope;

    /// Release the underlying resource
    ///
    /// Called on cache flush and at process shutdown. Must be idempotent.
    async fn close(&self) -> Result<(), ApplicationError>;
}

/// Factory for constructing scoped data handles
///
/// Construction may open network resources and is the one potentially slow
/// step on the request path; the handle cache wraps it so each scope is
/// constructed at most once.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DataHandleFactory: Send + Sync + fmt::Debug {
    /// Construct a fresh handle for the given scope
    async fn create(
        &self,
        scope: &HandleScope,
    ) -> Result<Arc<dyn TenantDataHandle>, ApplicationError>;
}
