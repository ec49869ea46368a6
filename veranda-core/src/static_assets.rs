//! Static asset serving.
//!
//! The asset root (conventionally `static/`) is consulted for every request
//! path before routing, so a miss falls through to the route table rather
//! than producing a response. Serving covers Content-Type detection,
//! Cache-Control strategies, and ETag / Last-Modified conditional requests.

use crate::{Error, HttpRequest, HttpResponse};
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Cache strategy for static assets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStrategy {
    /// No caching (Cache-Control: no-cache, no-store)
    NoCache,

    /// Public cache with max-age
    Public(Duration),

    /// Private cache with max-age
    Private(Duration),

    /// Immutable assets, for hashed or versioned filenames
    Immutable,
}

impl CacheStrategy {
    /// Convert strategy to Cache-Control header value
    pub fn to_header_value(&self) -> String {
        match self {
            CacheStrategy::NoCache => "no-cache, no-store, must-revalidate".to_string(),
            CacheStrategy::Public(duration) => {
                format!("public, max-age={}", duration.as_secs())
            }
            CacheStrategy::Private(duration) => {
                format!("private, max-age={}", duration.as_secs())
            }
            CacheStrategy::Immutable => "public, max-age=31536000, immutable".to_string(),
        }
    }
}

/// Configuration for static asset serving
#[derive(Debug, Clone)]
pub struct StaticAssetsConfig {
    /// Root directory for static files
    pub root_dir: PathBuf,

    /// Cache strategy applied to served files
    pub default_strategy: CacheStrategy,

    /// Enable ETag generation and validation
    pub enable_etag: bool,

    /// Enable Last-Modified headers
    pub enable_last_modified: bool,

    /// Index files tried for directory requests
    pub index_files: Vec<String>,
}

impl StaticAssetsConfig {
    /// Create a new configuration with root directory
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            default_strategy: CacheStrategy::Public(Duration::from_secs(3600)),
            enable_etag: true,
            enable_last_modified: true,
            index_files: vec!["index.html".to_string()],
        }
    }

    /// Set the cache strategy
    pub fn with_strategy(mut self, strategy: CacheStrategy) -> Self {
        self.default_strategy = strategy;
        self
    }

    /// Enable/disable ETag support
    pub fn with_etag(mut self, enable: bool) -> Self {
        self.enable_etag = enable;
        self
    }

    /// Enable/disable Last-Modified headers
    pub fn with_last_modified(mut self, enable: bool) -> Self {
        self.enable_last_modified = enable;
        self
    }

    /// Set index files
    pub fn with_index_files(mut self, files: Vec<String>) -> Self {
        self.index_files = files;
        self
    }

    /// Configure for development (no caching, no validators)
    pub fn development(self) -> Self {
        self.with_strategy(CacheStrategy::NoCache)
            .with_etag(false)
            .with_last_modified(false)
    }
}

impl Default for StaticAssetsConfig {
    fn default() -> Self {
        Self::new("static")
    }
}

/// Static asset server
#[derive(Clone)]
pub struct StaticAssetServer {
    config: StaticAssetsConfig,
}

impl StaticAssetServer {
    /// Create a new static asset server
    pub fn new(config: StaticAssetsConfig) -> Result<Self, Error> {
        if !config.root_dir.exists() {
            return Err(Error::Internal(format!(
                "Static assets directory not found: {:?}",
                config.root_dir
            )));
        }

        Ok(Self { config })
    }

    /// Serve the file the request path maps to, or report a miss.
    ///
    /// Returns `Ok(None)` when no file under the root corresponds to the
    /// path, so the caller can fall through to route dispatch.
    pub async fn try_serve(&self, req: &HttpRequest) -> Result<Option<HttpResponse>, Error> {
        let path = match self.resolve_path(&req.path) {
            Some(path) => path,
            None => return Ok(None),
        };

        if !path.exists() {
            return Ok(None);
        }

        if path.is_dir() {
            for index_file in &self.config.index_files {
                let index_path = path.join(index_file);
                if index_path.is_file() {
                    return self.serve_file(&index_path, req).await.map(Some);
                }
            }
            // Directory listings are never produced
            return Ok(None);
        }

        self.serve_file(&path, req).await.map(Some)
    }

    /// Map a request path to a file below the root.
    ///
    /// Rejects parent-directory components so a crafted path can never
    /// escape the root. Returns `None` for unservable paths.
    fn resolve_path(&self, request_path: &str) -> Option<PathBuf> {
        let path = request_path.split('?').next().unwrap_or(request_path);
        let relative = path.trim_start_matches('/');

        let candidate = Path::new(relative);
        for component in candidate.components() {
            match component {
                Component::Normal(_) => {}
                Component::CurDir => {}
                _ => return None,
            }
        }

        Some(self.config.root_dir.join(candidate))
    }

    /// Serve a specific file
    async fn serve_file(&self, path: &Path, req: &HttpRequest) -> Result<HttpResponse, Error> {
        let metadata = tokio::fs::metadata(path).await?;
        let modified = metadata.modified().ok();

        let etag = if self.config.enable_etag {
            modified.map(|m| file_etag(metadata.len(), m))
        } else {
            None
        };

        if let Some(response) = self.check_conditional(req, etag.as_deref(), modified) {
            return Ok(response);
        }

        let body = tokio::fs::read(path).await?;

        let mut response = HttpResponse::ok()
            .with_header("Content-Type", content_type_for(path))
            .with_header(
                "Cache-Control",
                self.config.default_strategy.to_header_value(),
            )
            .with_body(body);

        if let Some(etag) = etag {
            response = response.with_header("ETag", etag);
        }
        if self.config.enable_last_modified {
            if let Some(modified) = modified {
                response = response.with_header("Last-Modified", httpdate::fmt_http_date(modified));
            }
        }

        Ok(response)
    }

    /// Answer conditional requests with 304 when the validators match
    fn check_conditional(
        &self,
        req: &HttpRequest,
        etag: Option<&str>,
        modified: Option<SystemTime>,
    ) -> Option<HttpResponse> {
        if let (Some(etag), Some(if_none_match)) = (etag, req.header("If-None-Match")) {
            if if_none_match == etag {
                return Some(HttpResponse::not_modified().with_header("ETag", etag));
            }
        }

        if self.config.enable_last_modified {
            if let (Some(modified), Some(since)) = (modified, req.header("If-Modified-Since")) {
                if let Ok(since) = httpdate::parse_http_date(since) {
                    // HTTP dates have second precision
                    let modified_secs = modified
                        .duration_since(UNIX_EPOCH)
                        .unwrap_or_default()
                        .as_secs();
                    let since_secs = since
                        .duration_since(UNIX_EPOCH)
                        .unwrap_or_default()
                        .as_secs();
                    if modified_secs <= since_secs {
                        return Some(HttpResponse::not_modified());
                    }
                }
            }
        }

        None
    }
}

/// Strong-enough validator from file size and modification time
fn file_etag(len: u64, modified: SystemTime) -> String {
    let mtime = modified
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("\"{:x}-{:x}\"", len, mtime)
}

/// Content-Type from the file extension
fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("txt") => "text/plain; charset=utf-8",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_root() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("styles.css"), "body { margin: 0; }").unwrap();
        fs::create_dir(temp_dir.path().join("img")).unwrap();
        fs::write(temp_dir.path().join("img/logo.svg"), "<svg/>").unwrap();
        fs::write(temp_dir.path().join("index.html"), "<h1>home</h1>").unwrap();
        temp_dir
    }

    fn server(root: &TempDir) -> StaticAssetServer {
        StaticAssetServer::new(StaticAssetsConfig::new(root.path())).unwrap()
    }

    #[test]
    fn test_missing_root_rejected() {
        let result = StaticAssetServer::new(StaticAssetsConfig::new("/nonexistent-root-dir"));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_serves_existing_file() {
        let root = create_test_root();
        let req = HttpRequest::new("GET", "/styles.css");

        let response = server(&root).try_serve(&req).await.unwrap().unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(
            response.headers.get("Content-Type"),
            Some(&"text/css".to_string())
        );
        assert_eq!(response.body, b"body { margin: 0; }".to_vec());
        assert!(response.headers.contains_key("ETag"));
        assert!(response.headers.contains_key("Last-Modified"));
    }

    #[tokio::test]
    async fn test_nested_path() {
        let root = create_test_root();
        let req = HttpRequest::new("GET", "/img/logo.svg");

        let response = server(&root).try_serve(&req).await.unwrap().unwrap();
        assert_eq!(
            response.headers.get("Content-Type"),
            Some(&"image/svg+xml".to_string())
        );
    }

    #[tokio::test]
    async fn test_miss_falls_through() {
        let root = create_test_root();
        let req = HttpRequest::new("GET", "/site/42");

        let result = server(&root).try_serve(&req).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_traversal_rejected() {
        let root = create_test_root();
        let req = HttpRequest::new("GET", "/../secret.txt");

        let result = server(&root).try_serve(&req).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_directory_serves_index() {
        let root = create_test_root();
        let req = HttpRequest::new("GET", "/");

        let response = server(&root).try_serve(&req).await.unwrap().unwrap();
        assert_eq!(response.body, b"<h1>home</h1>".to_vec());
    }

    #[tokio::test]
    async fn test_etag_conditional() {
        let root = create_test_root();
        let srv = server(&root);

        let req = HttpRequest::new("GET", "/styles.css");
        let first = srv.try_serve(&req).await.unwrap().unwrap();
        let etag = first.headers.get("ETag").cloned().unwrap();

        let mut conditional = HttpRequest::new("GET", "/styles.css");
        conditional
            .headers
            .insert("If-None-Match".to_string(), etag);
        let second = srv.try_serve(&conditional).await.unwrap().unwrap();
        assert_eq!(second.status, 304);
        assert!(second.body.is_empty());
    }

    #[tokio::test]
    async fn test_development_mode_omits_validators() {
        let root = create_test_root();
        let srv =
            StaticAssetServer::new(StaticAssetsConfig::new(root.path()).development()).unwrap();

        let req = HttpRequest::new("GET", "/styles.css");
        let response = srv.try_serve(&req).await.unwrap().unwrap();
        assert!(!response.headers.contains_key("ETag"));
        assert!(!response.headers.contains_key("Last-Modified"));
        assert_eq!(
            response.headers.get("Cache-Control"),
            Some(&"no-cache, no-store, must-revalidate".to_string())
        );
    }
}
