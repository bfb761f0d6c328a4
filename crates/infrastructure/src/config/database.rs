//! Database configuration.
//!
//! Podium keeps the control plane (tenants, users) in one SQLite database
//! and gives every tenant its own database file under `data_dir/tenants/`.

use serde::{Deserialize, Serialize};

/// SQLite database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Directory all database files live under
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Control-plane database file name (inside `data_dir`)
    #[serde(default = "default_control_db")]
    pub control_db: String,

    /// Maximum connections per pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Run schema migrations on startup
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_control_db() -> String {
    "podium.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

const fn default_run_migrations() -> bool {
    true
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            control_db: default_control_db(),
            max_connections: default_max_connections(),
            run_migrations: default_run_migrations(),
        }
    }
}

impl DatabaseConfig {
    /// Path of the control-plane database file
    #[must_use]
    pub fn control_db_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.data_dir).join(&self.control_db)
    }

    /// Directory per-tenant database files live under
    #[must_use]
    pub fn tenant_db_dir(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.data_dir).join("tenants")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths() {
        let config = DatabaseConfig::default();
        assert_eq!(config.control_db_path(), std::path::Path::new("data/podium.db"));
        assert_eq!(config.tenant_db_dir(), std::path::Path::new("data/tenants"));
    }
}
