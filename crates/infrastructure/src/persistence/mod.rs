//! SQLite persistence
//!
//! Connection pooling, schema migrations, the tenant directory store, and
//! the per-tenant scoped handle factory.

mod connection;
mod migrations;
mod scoped_handle;
mod tenant_store;

pub use connection::{ConnectionPool, DatabaseError, PooledConn, create_pool};
pub use migrations::run_migrations;
pub use scoped_handle::{SqliteDataHandle, SqliteHandleFactory};
pub use tenant_store::SqliteTenantDirectory;
