//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `database`: control-plane and per-tenant SQLite settings
//! - `cache`: tenant directory cache TTL settings
//!
//! The tenancy settings themselves (`TenancyConfig`) are defined in the
//! application crate and embedded here, so the resolver stays free of any
//! configuration-loading machinery.

mod cache;
mod database;
mod server;

use std::fmt;

use application::TenancyConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use cache::DirectoryCacheConfig;
pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Application environment (development or production)
///
/// Controls how strictly insecure settings are treated at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - relaxed warnings
    #[default]
    Development,
    /// Production environment - strict validation
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Tenant identification configuration
    #[serde(default)]
    pub tenancy: TenancyConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Tenant directory cache configuration
    #[serde(default)]
    pub directory_cache: DirectoryCacheConfig,
}

impl AppConfig {
    /// Load configuration from defaults, an optional `config` file, and
    /// `PODIUM_*` environment variables (e.g. `PODIUM_SERVER_PORT`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("PODIUM")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        let app_config: Self = config.try_deserialize()?;
        app_config.warn_on_insecure_settings();
        Ok(app_config)
    }

    /// Emit warnings for settings that are unsafe outside development
    fn warn_on_insecure_settings(&self) {
        if self.environment == Environment::Production
            && self.tenancy.allow_untrusted_identifiers
        {
            warn!(
                "tenancy.allow_untrusted_identifiers is enabled in production; \
                 header/query tenant identification should be disabled"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_environment_is_development() {
        assert_eq!(Environment::default(), Environment::Development);
    }

    #[test]
    fn environment_parses_aliases() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn environment_display() {
        assert_eq!(Environment::Development.to_string(), "development");
        assert_eq!(Environment::Production.to_string(), "production");
    }

    #[test]
    fn default_config_is_complete() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.tenancy.base_domain, "localhost");
        assert_eq!(config.directory_cache.ttl_secs, 30);
    }

    #[test]
    fn deserializes_from_toml_fragment() {
        let toml = r#"
            environment = "production"

            [server]
            port = 8080

            [tenancy]
            base_domain = "podium.events"
            allow_untrusted_identifiers = false
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.tenancy.base_domain, "podium.events");
        assert!(!config.tenancy.allow_untrusted_identifiers);
    }
}
