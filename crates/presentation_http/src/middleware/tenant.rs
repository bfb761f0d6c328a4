//! Tenant resolution middleware
//!
//! Runs the resolution orchestrator for every request and attaches the
//! resulting `TenantContext` to the request extensions. Comes in two
//! modes: required (rejects requests that resolve to no tenant, unless the
//! caller is a cross-tenant super admin) and optional (never rejects,
//! degrades to the anonymous context) for endpoints that must stay
//! reachable without a tenant.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use application::{RequestSignals, TenantResolver};
use axum::{
    extract::Request,
    http::header::{AUTHORIZATION, HOST},
    response::{IntoResponse, Response},
};
use domain::CallerIdentity;
use tower::{Layer, Service};
use tracing::debug;

use crate::error::ApiError;

/// Resolution mode applied by the layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode {
    /// Reject requests without a resolvable tenant (super admins may pass
    /// tenant-less in cross-tenant mode)
    Required,
    /// Never reject; unresolved requests proceed with the anonymous context
    Optional,
}

/// Layer that applies tenant resolution
#[derive(Clone, Debug)]
pub struct TenantResolutionLayer {
    resolver: Arc<TenantResolver>,
    mode: ResolutionMode,
    excluded_paths: Vec<String>,
}

impl TenantResolutionLayer {
    /// Required resolution for tenant-scoped routes
    #[must_use]
    pub fn required(resolver: Arc<TenantResolver>) -> Self {
        Self {
            resolver,
            mode: ResolutionMode::Required,
            excluded_paths: vec!["/health".to_string(), "/ready".to_string()],
        }
    }

    /// Optional resolution for public and guarded-by-role routes
    #[must_use]
    pub fn optional(resolver: Arc<TenantResolver>) -> Self {
        Self {
            resolver,
            mode: ResolutionMode::Optional,
            excluded_paths: vec!["/health".to_string(), "/ready".to_string()],
        }
    }

    /// Add paths that skip resolution entirely
    #[must_use]
    pub fn exclude_paths(mut self, paths: Vec<String>) -> Self {
        self.excluded_paths.extend(paths);
        self
    }
}

impl<S> Layer<S> for TenantResolutionLayer {
    type Service = TenantResolution<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TenantResolution {
            inner,
            resolver: Arc::clone(&self.resolver),
            mode: self.mode,
            excluded_paths: self.excluded_paths.clone(),
        }
    }
}

/// Middleware service for tenant resolution
#[derive(Clone, Debug)]
pub struct TenantResolution<S> {
    inner: S,
    resolver: Arc<TenantResolver>,
    mode: ResolutionMode,
    excluded_paths: Vec<String>,
}

impl<S> Service<Request> for TenantResolution<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let resolver = Arc::clone(&self.resolver);
        let mode = self.mode;
        let excluded_paths = self.excluded_paths.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let path = req.uri().path();
            if excluded_paths.iter().any(|p| path.starts_with(p)) {
                return inner.call(req).await;
            }

            let signals = signals_from_request(&req, &resolver);
            let result = match mode {
                ResolutionMode::Required => resolver.resolve(&signals).await,
                ResolutionMode::Optional => resolver.resolve_optional(&signals).await,
            };

            match result {
                Ok(ctx) => {
                    debug!(
                        request_id = %ctx.request_id(),
                        tenant = ?ctx.tenant_id(),
                        super_admin = ctx.is_super_admin(),
                        "tenant context attached"
                    );
                    req.extensions_mut().insert(ctx);
                    inner.call(req).await
                },
                Err(e) => Ok(ApiError::from(e).into_response()),
            }
        })
    }
}

/// Copy the signal-bearing parts of the request into a `RequestSignals`
fn signals_from_request(req: &Request, resolver: &TenantResolver) -> RequestSignals {
    let config = resolver.config();
    let mut signals = RequestSignals::new();

    let host = req
        .headers()
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned)
        .or_else(|| req.uri().host().map(ToOwned::to_owned));
    if let Some(host) = host {
        signals = signals.with_host(host);
    }

    if let Some(value) = req
        .headers()
        .get(config.tenant_header.as_str())
        .and_then(|v| v.to_str().ok())
    {
        signals = signals.with_header_value(value);
    }

    if let Some(value) = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    {
        signals = signals.with_authorization(value);
    }

    if let Some(value) = query_value(req.uri().query(), &config.tenant_query_param) {
        signals = signals.with_query_value(value);
    }

    if let Some(caller) = req.extensions().get::<CallerIdentity>() {
        signals = signals.with_caller(*caller);
    }

    signals
}

/// Pull one parameter out of a raw query string
fn query_value(query: Option<&str>, param: &str) -> Option<String> {
    query?.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == param && !value.is_empty()).then(|| value.to_string())
    })
}
