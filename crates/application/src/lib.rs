//! Application layer - Tenant resolution and orchestration
//!
//! Contains the resolution orchestrator, port definitions for the tenant
//! directory and scoped data handles, and the per-request tenant context.

pub mod error;
pub mod ports;
pub mod request_context;
pub mod resolver;
pub mod tenancy_config;

pub use error::ApplicationError;
pub use ports::*;
pub use request_context::TenantContext;
pub use resolver::{RequestSignals, TenantResolver};
pub use tenancy_config::TenancyConfig;
