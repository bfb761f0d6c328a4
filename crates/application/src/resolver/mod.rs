//! Resolution orchestrator
//!
//! Determines which tenant an inbound request belongs to. Extractors run in
//! a fixed precedence order — subdomain, custom domain, header, credential
//! claim, query parameter — and the first one to yield a candidate wins;
//! there is no fallthrough to weaker signals once a candidate exists. The
//! domain-level signals come from routing infrastructure and are trusted
//! ahead of the cryptographically-verified claim, which in turn outranks
//! the header/query conveniences.

mod extractors;
mod signals;

pub use signals::RequestSignals;

use std::fmt;
use std::sync::Arc;

use domain::{Tenant, TenantSlug};
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::TenantDirectory;
use crate::request_context::TenantContext;
use crate::tenancy_config::TenancyConfig;

/// Which extractor produced a candidate, for routing and tracing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CandidateSource {
    Subdomain,
    CustomDomain,
    Header,
    Claim,
    Query,
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Subdomain => "subdomain",
            Self::CustomDomain => "custom_domain",
            Self::Header => "header",
            Self::Claim => "claim",
            Self::Query => "query",
        };
        write!(f, "{name}")
    }
}

/// A candidate identifier produced by one extractor
#[derive(Debug, Clone)]
struct Candidate {
    value: String,
    source: CandidateSource,
}

/// Tenant resolution orchestrator
///
/// Shared by the required and optional resolution middlewares; safe for
/// concurrent use across requests.
#[derive(Debug)]
pub struct TenantResolver {
    directory: Arc<dyn TenantDirectory>,
    config: TenancyConfig,
}

impl TenantResolver {
    /// Create a resolver over the given directory
    pub fn new(directory: Arc<dyn TenantDirectory>, config: TenancyConfig) -> Self {
        Self { directory, config }
    }

    /// The tenancy configuration this resolver runs with
    #[must_use]
    pub const fn config(&self) -> &TenancyConfig {
        &self.config
    }

    /// Required resolution: every request must end up with a tenant, or be
    /// a super admin operating cross-tenant.
    ///
    /// # Errors
    ///
    /// - `TenantNotResolved` when no extractor yields a candidate and the
    ///   caller is not a super admin
    /// - `TenantInactiveOrUnknown` when the winning candidate does not
    ///   resolve to an active tenant (no fallthrough to weaker signals)
    /// - `Directory` when the underlying store fails
    #[instrument(skip(self, signals), level = "debug")]
    pub async fn resolve(
        &self,
        signals: &RequestSignals,
    ) -> Result<TenantContext, ApplicationError> {
        let is_super_admin = self.caller_is_super_admin(signals).await?;

        let Some(candidate) = self.first_candidate(signals) else {
            if is_super_admin {
                debug!("no tenant candidate; proceeding in cross-tenant super-admin mode");
                return Ok(TenantContext::cross_tenant());
            }
            debug!("no tenant candidate and caller is not a super admin");
            return Err(ApplicationError::TenantNotResolved);
        };

        match self.lookup(&candidate).await? {
            Some(tenant) => {
                debug!(
                    tenant_id = %tenant.id(),
                    slug = %tenant.slug(),
                    source = %candidate.source,
                    "tenant resolved"
                );
                Ok(TenantContext::for_tenant(tenant, is_super_admin))
            },
            None => {
                // Higher-precedence candidates do not fall through: a stale
                // or wrong routing signal should fail loudly, also for
                // super admins.
                debug!(source = %candidate.source, "candidate did not resolve to an active tenant");
                Err(ApplicationError::TenantInactiveOrUnknown)
            },
        }
    }

    /// Optional resolution: identical precedence logic, but tenant
    /// rejections degrade to the anonymous context instead of raising.
    /// Store-level failures still propagate.
    #[instrument(skip(self, signals), level = "debug")]
    pub async fn resolve_optional(
        &self,
        signals: &RequestSignals,
    ) -> Result<TenantContext, ApplicationError> {
        match self.resolve(signals).await {
            Ok(ctx) => Ok(ctx),
            Err(e) if e.is_tenant_rejection() => {
                debug!("optional resolution degrading to anonymous context");
                Ok(TenantContext::anonymous())
            },
            Err(e) => Err(e),
        }
    }

    /// Run the extractors in precedence order and keep the first candidate
    fn first_candidate(&self, signals: &RequestSignals) -> Option<Candidate> {
        let strategies: [(CandidateSource, Option<String>); 5] = [
            (
                CandidateSource::Subdomain,
                extractors::subdomain(signals, &self.config),
            ),
            (
                CandidateSource::CustomDomain,
                extractors::custom_domain(signals, &self.config),
            ),
            (
                CandidateSource::Header,
                extractors::header(signals, &self.config),
            ),
            (CandidateSource::Claim, extractors::credential_claim(signals)),
            (
                CandidateSource::Query,
                extractors::query_param(signals, &self.config),
            ),
        ];

        strategies
            .into_iter()
            .find_map(|(source, value)| value.map(|value| Candidate { value, source }))
    }

    /// Resolve a candidate against the directory.
    ///
    /// Custom-domain candidates go through the domain index; everything
    /// else is treated as a slug. A candidate that is not even a valid slug
    /// is an unknown tenant, not a validation error — the rejection must
    /// not reveal which candidates are well-formed.
    async fn lookup(&self, candidate: &Candidate) -> Result<Option<Tenant>, ApplicationError> {
        match candidate.source {
            CandidateSource::CustomDomain => {
                self.directory.find_by_custom_domain(&candidate.value).await
            },
            _ => match TenantSlug::parse(candidate.value.clone()) {
                Ok(slug) => self.directory.find_by_slug(&slug).await,
                Err(_) => Ok(None),
            },
        }
    }

    /// Look up the caller's super-admin role, independent of tenant signals
    async fn caller_is_super_admin(
        &self,
        signals: &RequestSignals,
    ) -> Result<bool, ApplicationError> {
        match signals.caller() {
            Some(caller) => self.directory.is_super_admin(&caller.user_id()).await,
            None => Ok(false),
        }
    }
}
