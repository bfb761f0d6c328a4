//! Per-request tenant context
//!
//! This module provides the `TenantContext` value the resolution middleware
//! attaches to every request. Downstream handlers read it to learn which
//! tenant the request belongs to and whether the caller operates with
//! cross-tenant super-admin privileges. It is never persisted.
//!
//! # Examples
//!
//! ```
//! use application::TenantContext;
//! use domain::{Tenant, TenantSlug};
//!
//! let tenant = Tenant::new(TenantSlug::parse("acme").unwrap(), "Acme Corp");
//! let ctx = TenantContext::for_tenant(tenant, false);
//!
//! assert!(ctx.tenant_id().is_some());
//! assert!(!ctx.is_super_admin());
//! ```

use domain::{Tenant, TenantId};
use uuid::Uuid;

/// Context for a single request, carrying the resolved tenant and the
/// caller's super-admin flag
///
/// At most one tenant is ever attached; `tenant_id()` is derived from the
/// snapshot so the two can never disagree. A super admin may carry a tenant
/// (impersonation for inspection) or none (cross-tenant mode).
#[derive(Debug, Clone)]
pub struct TenantContext {
    tenant: Option<Tenant>,
    is_super_admin: bool,
    request_id: Uuid,
}

impl TenantContext {
    /// Context for a request resolved to a specific tenant
    #[must_use]
    pub fn for_tenant(tenant: Tenant, is_super_admin: bool) -> Self {
        Self {
            tenant: Some(tenant),
            is_super_admin,
            request_id: Uuid::new_v4(),
        }
    }

    /// Cross-tenant context for a super admin with no tenant claim
    #[must_use]
    pub fn cross_tenant() -> Self {
        Self {
            tenant: None,
            is_super_admin: true,
            request_id: Uuid::new_v4(),
        }
    }

    /// The no-tenant, no-privilege context used by optional resolution when
    /// nothing resolves
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            tenant: None,
            is_super_admin: false,
            request_id: Uuid::new_v4(),
        }
    }

    /// Replace the generated request ID with one provided by upstream
    /// middleware, for log correlation
    #[must_use]
    pub const fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }

    /// The resolved tenant snapshot, if any
    #[must_use]
    pub const fn tenant(&self) -> Option<&Tenant> {
        self.tenant.as_ref()
    }

    /// The resolved tenant's ID, if any
    #[must_use]
    pub fn tenant_id(&self) -> Option<TenantId> {
        self.tenant.as_ref().map(Tenant::id)
    }

    /// Whether a tenant is attached
    #[must_use]
    pub const fn has_tenant(&self) -> bool {
        self.tenant.is_some()
    }

    /// Whether the caller holds cross-tenant super-admin privileges
    #[must_use]
    pub const fn is_super_admin(&self) -> bool {
        self.is_super_admin
    }

    /// The unique request identifier
    #[must_use]
    pub const fn request_id(&self) -> Uuid {
        self.request_id
    }
}

#[cfg(test)]
mod tests {
    use domain::TenantSlug;

    use super::*;

    fn tenant(slug: &str) -> Tenant {
        Tenant::new(TenantSlug::parse(slug).unwrap(), "Test Tenant")
    }

    #[test]
    fn for_tenant_attaches_snapshot() {
        let t = tenant("acme");
        let id = t.id();
        let ctx = TenantContext::for_tenant(t, false);

        assert_eq!(ctx.tenant_id(), Some(id));
        assert!(ctx.has_tenant());
        assert!(!ctx.is_super_admin());
    }

    #[test]
    fn super_admin_can_carry_a_tenant() {
        let ctx = TenantContext::for_tenant(tenant("acme"), true);
        assert!(ctx.has_tenant());
        assert!(ctx.is_super_admin());
    }

    #[test]
    fn cross_tenant_has_no_tenant() {
        let ctx = TenantContext::cross_tenant();
        assert!(ctx.tenant().is_none());
        assert!(ctx.tenant_id().is_none());
        assert!(ctx.is_super_admin());
    }

    #[test]
    fn anonymous_has_neither() {
        let ctx = TenantContext::anonymous();
        assert!(!ctx.has_tenant());
        assert!(!ctx.is_super_admin());
    }

    #[test]
    fn request_ids_are_unique() {
        assert_ne!(
            TenantContext::anonymous().request_id(),
            TenantContext::anonymous().request_id()
        );
    }

    #[test]
    fn with_request_id_overrides() {
        let id = Uuid::new_v4();
        let ctx = TenantContext::cross_tenant().with_request_id(id);
        assert_eq!(ctx.request_id(), id);
    }
}
