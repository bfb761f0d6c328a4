//! HTTP middleware components
//!
//! Tenant resolution and the super-admin guard.

pub mod super_admin;
pub mod tenant;

pub use super_admin::{SuperAdminGuard, SuperAdminLayer};
pub use tenant::{ResolutionMode, TenantResolution, TenantResolutionLayer};
