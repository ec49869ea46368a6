// Application facade and HTTP server

use crate::handler::{with_upstream, HandlerFn, HeaderProvider, RequestContext};
use crate::routing::Router;
use crate::static_assets::StaticAssetServer;
use crate::traits::TemplateRenderer;
use crate::{Error, HttpRequest, HttpResponse};
use http_body_util::BodyExt;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{body::Incoming as IncomingBody, Request, Response};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// The main application struct.
///
/// Composes the route table, the static asset root, the template renderer,
/// and the upstream header provider. Constructed explicitly at startup;
/// there is no process-global instance.
pub struct Application {
    router: Router,
    assets: Option<StaticAssetServer>,
    renderer: Option<Arc<dyn TemplateRenderer>>,
    header_provider: Option<Arc<dyn HeaderProvider>>,
}

impl Application {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            assets: None,
            renderer: None,
            header_provider: None,
        }
    }

    /// Serve static files from the given server before consulting routes
    pub fn with_assets(mut self, assets: StaticAssetServer) -> Self {
        self.assets = Some(assets);
        self
    }

    /// Attach the template renderer backing `template()`
    pub fn with_renderer(mut self, renderer: Arc<dyn TemplateRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Attach the provider used by `upstream_handler()`
    pub fn with_header_provider(mut self, provider: Arc<dyn HeaderProvider>) -> Self {
        self.header_provider = Some(provider);
        self
    }

    /// Bulk-register pattern-to-handler mappings
    pub fn add_routes<I>(&mut self, mappings: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (String, HandlerFn)>,
    {
        self.router.add_routes(mappings)
    }

    /// Wrap a handler so it receives the upstream header mapping on every
    /// invocation. Requires a configured header provider.
    pub fn upstream_handler(&self, handler: HandlerFn) -> Result<HandlerFn, Error> {
        let provider = self
            .header_provider
            .clone()
            .ok_or_else(|| Error::Internal("no header provider configured".to_string()))?;
        Ok(with_upstream(provider, handler))
    }

    /// Render a template to bytes through the configured renderer.
    ///
    /// Identical name and context always produce identical output.
    pub fn template(&self, name: &str, context: &serde_json::Value) -> Result<Vec<u8>, Error> {
        let renderer = self
            .renderer
            .as_ref()
            .ok_or_else(|| Error::Template("no template renderer configured".to_string()))?;
        Ok(renderer.render(name, context)?.into_bytes())
    }

    /// Handle a single request: static assets first, then route dispatch.
    ///
    /// Never panics outward; unmatched paths produce a plain 404 and handler
    /// errors map to status-coded responses.
    pub async fn handle(&self, request: HttpRequest) -> HttpResponse {
        if let Some(assets) = &self.assets {
            match assets.try_serve(&request).await {
                Ok(Some(response)) => return response,
                Ok(None) => {}
                Err(err) => {
                    error!(error = %err, path = %request.path, "static asset error");
                    return error_response(&err);
                }
            }
        }

        let ctx = RequestContext::new(request);
        match self.router.dispatch(ctx).await {
            Ok(response) => response,
            Err(Error::RouteNotFound(path)) => {
                debug!(%path, "no route matched");
                not_found_response()
            }
            Err(err) => {
                error!(error = %err, "handler failed");
                error_response(&err)
            }
        }
    }

    /// Start the HTTP server on the specified port
    pub async fn listen(self, port: u16) -> Result<(), Error> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await?;

        info!(%addr, "server listening");

        let app = Arc::new(self);

        loop {
            let (stream, _) = listener.accept().await?;
            let io = TokioIo::new(stream);
            let app = app.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req: Request<IncomingBody>| {
                    let app = app.clone();
                    async move { serve_request(req, app).await }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    warn!(error = ?err, "error serving connection");
                }
            });
        }
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle an incoming hyper request
async fn serve_request(
    req: Request<IncomingBody>,
    app: Arc<Application>,
) -> Result<Response<Full<bytes::Bytes>>, hyper::Error> {
    let (parts, body) = req.into_parts();

    let path = parts
        .uri
        .path_and_query()
        .map(|pq| pq.to_string())
        .unwrap_or_else(|| parts.uri.path().to_string());

    let mut request = HttpRequest::new(parts.method.to_string(), path);

    for (name, value) in &parts.headers {
        if let Ok(value_str) = value.to_str() {
            request
                .headers
                .insert(name.to_string(), value_str.to_string());
        }
    }

    let body_bytes = body.collect().await?.to_bytes();
    request.body = body_bytes.to_vec();

    let method = request.method.clone();
    let path = request.path.clone();

    let response = app.handle(request).await;

    info!(%method, %path, status = response.status, "request");

    // Convert our HttpResponse to a hyper response
    let mut builder = Response::builder().status(response.status);
    for (key, value) in response.headers {
        builder = builder.header(key, value);
    }

    let body = Full::new(bytes::Bytes::from(response.body));
    match builder.body(body) {
        Ok(response) => Ok(response),
        Err(err) => {
            error!(error = %err, "failed to finalize response");
            Ok(Response::builder()
                .status(500)
                .body(Full::new(bytes::Bytes::new()))
                .unwrap())
        }
    }
}

/// Plain-text 404 returned when neither assets nor routes claim the path
fn not_found_response() -> HttpResponse {
    HttpResponse::not_found()
        .with_header("Content-Type", "text/plain; charset=utf-8")
        .with_body(b"Not found.".to_vec())
}

/// Map an error to a status-coded plain-text response
fn error_response(err: &Error) -> HttpResponse {
    HttpResponse::new(err.status_code())
        .with_header("Content-Type", "text/plain; charset=utf-8")
        .with_body(err.to_string().into_bytes())
}
