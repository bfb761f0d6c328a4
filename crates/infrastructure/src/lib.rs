//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the SQLite-backed
//! tenant directory with its TTL cache decorator, the scoped data-handle
//! cache, configuration loading, and migrations.

pub mod config;
pub mod directory_cache;
pub mod handle_cache;
pub mod persistence;

pub use config::{AppConfig, DatabaseConfig, DirectoryCacheConfig, Environment, ServerConfig};
pub use directory_cache::CachedTenantDirectory;
pub use handle_cache::ScopedHandleCache;
pub use persistence::{
    ConnectionPool, SqliteHandleFactory, SqliteTenantDirectory, create_pool,
};
