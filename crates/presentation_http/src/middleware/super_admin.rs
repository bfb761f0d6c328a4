//! Super-admin guard
//!
//! Gates routes behind the `is_super_admin` flag that tenant resolution
//! already computed. The guard only reads the context extension — it never
//! re-derives the flag, so resolution stays the single source of truth.
//! Apply after (inside) the resolution layer.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use application::TenantContext;
use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};
use tracing::warn;

use crate::error::ApiError;

/// Layer that rejects non-super-admin callers
#[derive(Clone, Debug, Default)]
pub struct SuperAdminLayer;

impl SuperAdminLayer {
    /// Create the guard layer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for SuperAdminLayer {
    type Service = SuperAdminGuard<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SuperAdminGuard { inner }
    }
}

/// Middleware service enforcing super-admin access
#[derive(Clone, Debug)]
pub struct SuperAdminGuard<S> {
    inner: S,
}

impl<S> Service<Request> for SuperAdminGuard<S>
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

    fn call(&mut self, req: Request) -> Self::Future {
        let mut inner = self.inner.clone();

        let is_super_admin = req
            .extensions()
            .get::<TenantContext>()
            .is_some_and(TenantContext::is_super_admin);

        Box::pin(async move {
            if is_super_admin {
                inner.call(req).await
            } else {
                warn!("non-super-admin caller rejected from guarded route");
                Ok(ApiError::Forbidden("Super admin privileges required".to_string())
                    .into_response())
            }
        })
    }
}
