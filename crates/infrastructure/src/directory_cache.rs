//! TTL-cached tenant directory decorator
//!
//! Wraps any `TenantDirectory` with a short-TTL in-memory cache. Misses are
//! cached too: an unknown or deactivated tenant should not hammer the store
//! on every request either. The TTL bounds how long a deactivation can go
//! unnoticed; the admin deactivation path calls `invalidate` to make it
//! immediate.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use application::error::ApplicationError;
use application::ports::TenantDirectory;
use async_trait::async_trait;
use domain::{Tenant, TenantId, TenantSlug, UserId};
use moka::future::Cache;
use tracing::{debug, instrument};

use crate::config::DirectoryCacheConfig;

/// Cache key covering all four lookup dimensions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum LookupKey {
    Slug(String),
    Domain(String),
    Id(TenantId),
    Role(UserId),
}

/// Cached lookup outcome
#[derive(Debug, Clone)]
enum LookupValue {
    Tenant(Option<Tenant>),
    Role(bool),
}

/// Caching decorator for tenant directories
pub struct CachedTenantDirectory<D> {
    inner: D,
    cache: Cache<LookupKey, LookupValue>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<D: std::fmt::Debug> std::fmt::Debug for CachedTenantDirectory<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedTenantDirectory")
            .field("inner", &self.inner)
            .field("entries", &self.cache.entry_count())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

impl<D: TenantDirectory> CachedTenantDirectory<D> {
    /// Wrap a directory with the given cache settings
    #[must_use]
    pub fn new(inner: D, config: &DirectoryCacheConfig) -> Self {
        Self {
            inner,
            cache: Cache::builder()
                .max_capacity(config.max_entries)
                .time_to_live(config.ttl())
                .build(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Drop every cached lookup for a tenant
    ///
    /// Called when a tenant is deactivated so the change takes effect
    /// immediately instead of after the TTL.
    pub async fn invalidate(&self, tenant: &Tenant) {
        self.cache
            .invalidate(&LookupKey::Slug(tenant.slug().as_str().to_string()))
            .await;
        if let Some(domain) = tenant.custom_domain() {
            self.cache
                .invalidate(&LookupKey::Domain(domain.to_string()))
                .await;
        }
        self.cache.invalidate(&LookupKey::Id(tenant.id())).await;
        debug!(tenant_id = %tenant.id(), "Invalidated directory cache entries");
    }

    async fn get_or_load<F>(
        &self,
        key: LookupKey,
        load: F,
    ) -> Result<LookupValue, ApplicationError>
    where
        F: Future<Output = Result<LookupValue, ApplicationError>>,
    {
        if let Some(value) = self.cache.get(&key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(value);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let value = load.await?;
        self.cache.insert(key, value.clone()).await;
        Ok(value)
    }
}

#[async_trait]
impl<D: TenantDirectory> TenantDirectory for CachedTenantDirectory<D> {
    #[instrument(skip(self), level = "debug")]
    async fn find_by_slug(&self, slug: &TenantSlug) -> Result<Option<Tenant>, ApplicationError> {
        let key = LookupKey::Slug(slug.as_str().to_string());
        let value = self
            .get_or_load(key, async {
                self.inner.find_by_slug(slug).await.map(LookupValue::Tenant)
            })
            .await?;
        match value {
            LookupValue::Tenant(tenant) => Ok(tenant),
            LookupValue::Role(_) => Err(ApplicationError::Internal(
                "directory cache key/value mismatch".to_string(),
            )),
        }
    }

    #[instrument(skip(self), level = "debug")]
    async fn find_by_custom_domain(
        &self,
        host: &str,
    ) -> Result<Option<Tenant>, ApplicationError> {
        let key = LookupKey::Domain(host.to_string());
        let value = self
            .get_or_load(key, async {
                self.inner
                    .find_by_custom_domain(host)
                    .await
                    .map(LookupValue::Tenant)
            })
            .await?;
        match value {
            LookupValue::Tenant(tenant) => Ok(tenant),
            LookupValue::Role(_) => Err(ApplicationError::Internal(
                "directory cache key/value mismatch".to_string(),
            )),
        }
    }

    #[instrument(skip(self), level = "debug")]
    async fn find_by_id(&self, id: &TenantId) -> Result<Option<Tenant>, ApplicationError> {
        let key = LookupKey::Id(*id);
        let value = self
            .get_or_load(key, async {
                self.inner.find_by_id(id).await.map(LookupValue::Tenant)
            })
            .await?;
        match value {
            LookupValue::Tenant(tenant) => Ok(tenant),
            LookupValue::Role(_) => Err(ApplicationError::Internal(
                "directory cache key/value mismatch".to_string(),
            )),
        }
    }

    #[instrument(skip(self), level = "debug")]
    async fn is_super_admin(&self, user: &UserId) -> Result<bool, ApplicationError> {
        let key = LookupKey::Role(*user);
        let value = self
            .get_or_load(key, async {
                self.inner.is_super_admin(user).await.map(LookupValue::Role)
            })
            .await?;
        match value {
            LookupValue::Role(flag) => Ok(flag),
            LookupValue::Tenant(_) => Err(ApplicationError::Internal(
                "directory cache key/value mismatch".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use super::*;

    /// Counting in-memory directory for decorator tests
    #[derive(Debug, Default)]
    struct CountingDirectory {
        tenants: Vec<Tenant>,
        super_admins: Vec<UserId>,
        calls: AtomicUsize,
    }

    impl CountingDirectory {
        fn with_tenant(tenant: Tenant) -> Self {
            Self {
                tenants: vec![tenant],
                ..Self::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TenantDirectory for Arc<CountingDirectory> {
        async fn find_by_slug(
            &self,
            slug: &TenantSlug,
        ) -> Result<Option<Tenant>, ApplicationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.tenants.iter().find(|t| t.slug() == slug).cloned())
        }

        async fn find_by_custom_domain(
            &self,
            host: &str,
        ) -> Result<Option<Tenant>, ApplicationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .tenants
                .iter()
                .find(|t| t.custom_domain() == Some(host))
                .cloned())
        }

        async fn find_by_id(&self, id: &TenantId) -> Result<Option<Tenant>, ApplicationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.tenants.iter().find(|t| t.id() == *id).cloned())
        }

        async fn is_super_admin(&self, user: &UserId) -> Result<bool, ApplicationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.super_admins.contains(user))
        }
    }

    fn tenant(slug: &str) -> Tenant {
        Tenant::new(TenantSlug::parse(slug).unwrap(), "Test")
    }

    fn config() -> DirectoryCacheConfig {
        DirectoryCacheConfig {
            ttl_secs: 30,
            max_entries: 100,
        }
    }

    #[tokio::test]
    async fn repeated_lookups_hit_the_cache() {
        let inner = Arc::new(CountingDirectory::with_tenant(tenant("acme")));
        let cached = CachedTenantDirectory::new(Arc::clone(&inner), &config());
        let slug = TenantSlug::parse("acme").unwrap();

        for _ in 0..5 {
            assert!(cached.find_by_slug(&slug).await.unwrap().is_some());
        }
        assert_eq!(inner.calls(), 1);
    }

    #[tokio::test]
    async fn misses_are_cached_too() {
        let inner = Arc::new(CountingDirectory::default());
        let cached = CachedTenantDirectory::new(Arc::clone(&inner), &config());
        let slug = TenantSlug::parse("ghost").unwrap();

        for _ in 0..3 {
            assert!(cached.find_by_slug(&slug).await.unwrap().is_none());
        }
        assert_eq!(inner.calls(), 1);
    }

    #[tokio::test]
    async fn invalidate_forces_a_fresh_lookup() {
        let acme = tenant("acme").with_custom_domain("contests.acme.com");
        let inner = Arc::new(CountingDirectory::with_tenant(acme.clone()));
        let cached = CachedTenantDirectory::new(Arc::clone(&inner), &config());
        let slug = TenantSlug::parse("acme").unwrap();

        cached.find_by_slug(&slug).await.unwrap();
        cached.find_by_custom_domain("contests.acme.com").await.unwrap();
        cached.find_by_id(&acme.id()).await.unwrap();
        assert_eq!(inner.calls(), 3);

        cached.invalidate(&acme).await;

        cached.find_by_slug(&slug).await.unwrap();
        cached.find_by_custom_domain("contests.acme.com").await.unwrap();
        cached.find_by_id(&acme.id()).await.unwrap();
        assert_eq!(inner.calls(), 6);
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let inner = Arc::new(CountingDirectory::with_tenant(tenant("acme")));
        let cached = CachedTenantDirectory::new(
            Arc::clone(&inner),
            &DirectoryCacheConfig {
                ttl_secs: 1,
                max_entries: 100,
            },
        );
        let slug = TenantSlug::parse("acme").unwrap();

        cached.find_by_slug(&slug).await.unwrap();
        cached.find_by_slug(&slug).await.unwrap();
        assert_eq!(inner.calls(), 1);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        cached.find_by_slug(&slug).await.unwrap();
        assert_eq!(inner.calls(), 2);
    }

    #[tokio::test]
    async fn role_lookups_are_cached_per_user() {
        let operator = UserId::new();
        let inner = Arc::new(CountingDirectory {
            super_admins: vec![operator],
            ..CountingDirectory::default()
        });
        let cached = CachedTenantDirectory::new(Arc::clone(&inner), &config());

        assert!(cached.is_super_admin(&operator).await.unwrap());
        assert!(cached.is_super_admin(&operator).await.unwrap());
        assert_eq!(inner.calls(), 1);

        let other = UserId::new();
        assert!(!cached.is_super_admin(&other).await.unwrap());
        assert_eq!(inner.calls(), 2);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        #[derive(Debug)]
        struct FailingDirectory {
            calls: AtomicUsize,
        }

        #[async_trait]
        impl TenantDirectory for Arc<FailingDirectory> {
            async fn find_by_slug(
                &self,
                _slug: &TenantSlug,
            ) -> Result<Option<Tenant>, ApplicationError> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                Err(ApplicationError::Directory("db down".to_string()))
            }

            async fn find_by_custom_domain(
                &self,
                _host: &str,
            ) -> Result<Option<Tenant>, ApplicationError> {
                unreachable!("not exercised by this test")
            }

            async fn find_by_id(
                &self,
                _id: &TenantId,
            ) -> Result<Option<Tenant>, ApplicationError> {
                unreachable!("not exercised by this test")
            }

            async fn is_super_admin(&self, _user: &UserId) -> Result<bool, ApplicationError> {
                unreachable!("not exercised by this test")
            }
        }

        let inner = Arc::new(FailingDirectory {
            calls: AtomicUsize::new(0),
        });
        let cached = CachedTenantDirectory::new(Arc::clone(&inner), &config());
        let slug = TenantSlug::parse("acme").unwrap();

        assert!(cached.find_by_slug(&slug).await.is_err());
        assert!(cached.find_by_slug(&slug).await.is_err());
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }
}
