//! Application-level errors
//!
//! The two tenant-rejection variants intentionally render the same message:
//! a caller must not be able to tell an unknown tenant from a deactivated
//! one, or from no tenant signal at all.

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Clone, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Required resolution found no usable tenant candidate
    #[error("A tenant is required for this request")]
    TenantNotResolved,

    /// A candidate was found but did not resolve to an active tenant
    #[error("A tenant is required for this request")]
    TenantInactiveOrUnknown,

    /// Guarded route invoked without super-admin privileges
    #[error("Super admin privileges required")]
    SuperAdminRequired,

    /// The scoped data handle could not be constructed
    #[error("Data handle construction failed: {0}")]
    HandleConstruction(String),

    /// Tenant directory lookup failed (store-level problem, not a miss)
    #[error("Tenant directory error: {0}")]
    Directory(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether this error is a tenant rejection that optional resolution
    /// degrades to the anonymous context instead of raising
    pub const fn is_tenant_rejection(&self) -> bool {
        matches!(self, Self::TenantNotResolved | Self::TenantInactiveOrUnknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_variants_render_identically() {
        assert_eq!(
            ApplicationError::TenantNotResolved.to_string(),
            ApplicationError::TenantInactiveOrUnknown.to_string()
        );
    }

    #[test]
    fn is_tenant_rejection_covers_both_variants() {
        assert!(ApplicationError::TenantNotResolved.is_tenant_rejection());
        assert!(ApplicationError::TenantInactiveOrUnknown.is_tenant_rejection());
        assert!(!ApplicationError::SuperAdminRequired.is_tenant_rejection());
        assert!(!ApplicationError::HandleConstruction("boom".to_string()).is_tenant_rejection());
    }

    #[test]
    fn domain_errors_convert() {
        let err: ApplicationError = DomainError::not_found("Tenant", "acme").into();
        assert!(matches!(err, ApplicationError::Domain(_)));
    }
}
