//! Tenant entity
//!
//! The canonical record for an organization hosted on the platform. Tenants
//! are provisioned elsewhere; this core only ever reads them. Deactivation
//! flips `is_active` — tenants are never hard-deleted, and an inactive
//! tenant is indistinguishable from a missing one to ordinary callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{TenantId, TenantSlug};

/// An organization hosted on the platform
///
/// Carries the identity fields the resolution layer needs plus two opaque
/// pass-through fields (`settings`, `plan_type`) that downstream handlers
/// interpret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    /// Opaque stable identifier
    id: TenantId,
    /// URL-safe short name, unique and immutable once assigned
    slug: TenantSlug,
    /// Display name
    name: String,
    /// Optional unique hostname mapping (e.g. `contests.acme.com`)
    custom_domain: Option<String>,
    /// Deactivated tenants resolve as not-found
    is_active: bool,
    /// Opaque settings blob, not interpreted by this core
    settings: serde_json::Value,
    /// Plan tag, not interpreted by this core
    plan_type: String,
    /// When the tenant was provisioned
    created_at: DateTime<Utc>,
}

impl Tenant {
    /// Create a new active tenant
    #[must_use]
    pub fn new(slug: TenantSlug, name: impl Into<String>) -> Self {
        Self {
            id: TenantId::new(),
            slug,
            name: name.into(),
            custom_domain: None,
            is_active: true,
            settings: serde_json::Value::Object(serde_json::Map::new()),
            plan_type: "standard".to_string(),
            created_at: Utc::now(),
        }
    }

    /// Restore a tenant from storage
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn restore(
        id: TenantId,
        slug: TenantSlug,
        name: String,
        custom_domain: Option<String>,
        is_active: bool,
        settings: serde_json::Value,
        plan_type: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            slug,
            name,
            custom_domain,
            is_active,
            settings,
            plan_type,
            created_at,
        }
    }

    /// Set the custom domain mapping
    #[must_use]
    pub fn with_custom_domain(mut self, domain: impl Into<String>) -> Self {
        self.custom_domain = Some(domain.into());
        self
    }

    /// Set the plan tag
    #[must_use]
    pub fn with_plan_type(mut self, plan_type: impl Into<String>) -> Self {
        self.plan_type = plan_type.into();
        self
    }

    /// Get the tenant ID
    #[must_use]
    pub const fn id(&self) -> TenantId {
        self.id
    }

    /// Get the tenant slug
    #[must_use]
    pub const fn slug(&self) -> &TenantSlug {
        &self.slug
    }

    /// Get the display name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the custom domain, if mapped
    #[must_use]
    pub fn custom_domain(&self) -> Option<&str> {
        self.custom_domain.as_deref()
    }

    /// Whether the tenant is active
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Get the opaque settings blob
    #[must_use]
    pub const fn settings(&self) -> &serde_json::Value {
        &self.settings
    }

    /// Get the plan tag
    #[must_use]
    pub fn plan_type(&self) -> &str {
        &self.plan_type
    }

    /// Get the provisioning timestamp
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug(s: &str) -> TenantSlug {
        TenantSlug::parse(s).unwrap()
    }

    #[test]
    fn new_tenant_is_active() {
        let tenant = Tenant::new(slug("acme"), "Acme Corp");
        assert!(tenant.is_active());
        assert_eq!(tenant.slug().as_str(), "acme");
        assert_eq!(tenant.name(), "Acme Corp");
        assert!(tenant.custom_domain().is_none());
        assert_eq!(tenant.plan_type(), "standard");
    }

    #[test]
    fn with_custom_domain_sets_mapping() {
        let tenant = Tenant::new(slug("acme"), "Acme").with_custom_domain("contests.acme.com");
        assert_eq!(tenant.custom_domain(), Some("contests.acme.com"));
    }

    #[test]
    fn restore_preserves_all_fields() {
        let id = TenantId::new();
        let created = Utc::now();
        let tenant = Tenant::restore(
            id,
            slug("beta"),
            "Beta Events".to_string(),
            None,
            false,
            serde_json::json!({"theme": "dark"}),
            "pro".to_string(),
            created,
        );
        assert_eq!(tenant.id(), id);
        assert!(!tenant.is_active());
        assert_eq!(tenant.settings()["theme"], "dark");
        assert_eq!(tenant.plan_type(), "pro");
        assert_eq!(tenant.created_at(), created);
    }

    #[test]
    fn serde_round_trip() {
        let tenant = Tenant::new(slug("acme"), "Acme").with_plan_type("enterprise");
        let json = serde_json::to_string(&tenant).unwrap();
        let back: Tenant = serde_json::from_str(&json).unwrap();
        assert_eq!(tenant, back);
    }
}
