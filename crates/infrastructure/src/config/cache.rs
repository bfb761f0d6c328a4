//! Tenant directory cache configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the short-TTL cache in front of the tenant directory
///
/// The directory sits on every request's hot path; the TTL bounds how long
/// a deactivated tenant can keep resolving after the fact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DirectoryCacheConfig {
    /// Entry time-to-live in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Maximum number of cached lookups
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

const fn default_ttl_secs() -> u64 {
    30
}

const fn default_max_entries() -> u64 {
    10_000
}

impl Default for DirectoryCacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
        }
    }
}

impl DirectoryCacheConfig {
    /// The TTL as a `Duration`
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}
