//! Podium HTTP presentation layer
//!
//! Tenant resolution middleware, the super-admin guard, and the thin API
//! surface over the tenancy core.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::{SuperAdminLayer, TenantResolutionLayer};
pub use routes::create_router;
pub use state::AppState;
