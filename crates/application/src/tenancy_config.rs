//! Tenancy configuration
//!
//! Controls how tenant identifiers are extracted from requests. Embedded
//! into the infrastructure `AppConfig` so it can be set from the config
//! file or `PODIUM_TENANCY_*` environment variables.

use serde::{Deserialize, Serialize};

/// Configuration for tenant identification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenancyConfig {
    /// Base domain tenants live under (e.g. `podium.events` for
    /// `acme.podium.events`)
    #[serde(default = "default_base_domain")]
    pub base_domain: String,

    /// Subdomain labels that never identify a tenant
    #[serde(default = "default_reserved_subdomains")]
    pub reserved_subdomains: Vec<String>,

    /// Header carrying an explicit tenant identifier
    #[serde(default = "default_tenant_header")]
    pub tenant_header: String,

    /// Query parameter carrying a tenant identifier
    #[serde(default = "default_tenant_query_param")]
    pub tenant_query_param: String,

    /// Whether the low-trust header/query identification strategies are
    /// enabled. Intended for development and tooling; disable in production.
    #[serde(default = "default_allow_untrusted")]
    pub allow_untrusted_identifiers: bool,
}

fn default_base_domain() -> String {
    "localhost".to_string()
}

fn default_reserved_subdomains() -> Vec<String> {
    vec!["www".to_string(), "api".to_string(), "app".to_string()]
}

fn default_tenant_header() -> String {
    "x-tenant-id".to_string()
}

fn default_tenant_query_param() -> String {
    "tenant".to_string()
}

const fn default_allow_untrusted() -> bool {
    true
}

impl Default for TenancyConfig {
    fn default() -> Self {
        Self {
            base_domain: default_base_domain(),
            reserved_subdomains: default_reserved_subdomains(),
            tenant_header: default_tenant_header(),
            tenant_query_param: default_tenant_query_param(),
            allow_untrusted_identifiers: default_allow_untrusted(),
        }
    }
}

impl TenancyConfig {
    /// Whether a subdomain label is reserved for platform infrastructure
    #[must_use]
    pub fn is_reserved(&self, label: &str) -> bool {
        self.reserved_subdomains
            .iter()
            .any(|r| r.eq_ignore_ascii_case(label))
    }
}
