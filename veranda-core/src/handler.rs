// Handler contract and per-request context

use crate::{Error, HttpRequest, HttpResponse};
use async_trait::async_trait;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by type-erased handlers
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<HttpResponse, Error>> + Send>>;

/// A type-erased route handler
pub type HandlerFn = Arc<dyn Fn(RequestContext) -> HandlerFuture + Send + Sync>;

/// Headers and base URL for calls to the upstream REST API.
///
/// Computed once per request by a [`HeaderProvider`] and handed to the
/// handler by value on its context.
#[derive(Debug, Clone, Default)]
pub struct UpstreamContext {
    pub headers: HashMap<String, String>,
    pub base_url: String,
}

/// Per-request context passed to handlers.
///
/// Carries the request (with bound path parameters) and, for handlers
/// registered through [`with_upstream`], the upstream header mapping.
/// The handler's return value is the response.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request: HttpRequest,
    pub upstream: Option<UpstreamContext>,
}

impl RequestContext {
    pub fn new(request: HttpRequest) -> Self {
        Self {
            request,
            upstream: None,
        }
    }

    /// Get a bound path parameter by name
    pub fn param(&self, name: &str) -> Option<&String> {
        self.request.param(name)
    }

    /// Get a query parameter by name
    pub fn query(&self, name: &str) -> Option<&String> {
        self.request.query(name)
    }

    /// Upstream headers and base URL, present when the route was registered
    /// through an upstream-aware wrapper
    pub fn upstream(&self) -> Option<&UpstreamContext> {
        self.upstream.as_ref()
    }
}

/// Computes the per-request upstream context (auth headers plus base URL).
///
/// The OAuth-backed implementation lives in the auth crate; tests can supply
/// a fixed one.
#[async_trait]
pub trait HeaderProvider: Send + Sync {
    async fn provide(&self) -> Result<UpstreamContext, Error>;
}

/// Convert an async function or closure into a type-erased [`HandlerFn`]
pub fn into_handler<F, Fut>(f: F) -> HandlerFn
where
    F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
{
    Arc::new(move |ctx| Box::pin(f(ctx)))
}

/// Wrap a handler so the provider runs at call time and the resulting
/// upstream context is attached before delegation.
///
/// Every invocation of the wrapped handler sees the provider's headers;
/// token refresh and expiry live entirely behind the provider.
pub fn with_upstream(provider: Arc<dyn HeaderProvider>, handler: HandlerFn) -> HandlerFn {
    Arc::new(move |mut ctx: RequestContext| {
        let provider = provider.clone();
        let handler = handler.clone();
        Box::pin(async move {
            ctx.upstream = Some(provider.provide().await?);
            handler(ctx).await
        })
    })
}
