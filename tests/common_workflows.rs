//! Integration tests for common Veranda workflows.
//!
//! These tests wire the crates together the way an application would:
//! settings file, token store, header provider, templates, static assets,
//! and the route table.

use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use veranda_auth::{BearerHeaderProvider, OAuthToken, TokenBroker, TokenStore};
use veranda_config::Settings;
use veranda_core::*;
use veranda_handlebars::{HandlebarsConfig, HandlebarsEngine};

// =============================================================================
// HTTP Response Tests
// =============================================================================

#[test]
fn test_http_response_convenience_methods() {
    let response = HttpResponse::json(&serde_json::json!({"message": "hello"})).unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(
        response.headers.get("Content-Type"),
        Some(&"application/json".to_string())
    );

    let response = HttpResponse::html("<h1>Hello</h1>");
    assert_eq!(response.status, 200);
    assert_eq!(
        response.headers.get("Content-Type"),
        Some(&"text/html; charset=utf-8".to_string())
    );
    assert_eq!(response.body, b"<h1>Hello</h1>".to_vec());

    let response = HttpResponse::redirect("/login");
    assert_eq!(response.status, 302);
    assert_eq!(response.headers.get("Location"), Some(&"/login".to_string()));

    assert_eq!(HttpResponse::unauthorized().status, 401);
    assert_eq!(HttpResponse::forbidden().status, 403);
    assert_eq!(HttpResponse::no_content().status, 204);
}

// =============================================================================
// Routing Workflows
// =============================================================================

#[tokio::test]
async fn test_placeholder_binding_end_to_end() {
    let mut app = Application::new();
    let handler = into_handler(|ctx: RequestContext| async move {
        let vdr_id = ctx.param("vdr_id").cloned().unwrap_or_default();
        Ok(HttpResponse::text(format!("site:{}", vdr_id)))
    });
    app.add_routes([("/site/{vdr_id}".to_string(), handler)])
        .unwrap();

    let response = app.handle(HttpRequest::new("GET", "/site/42")).await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body, b"site:42".to_vec());
}

#[tokio::test]
async fn test_unmatched_path_yields_404_without_handler() {
    use std::sync::atomic::{AtomicBool, Ordering};

    static CALLED: AtomicBool = AtomicBool::new(false);

    let mut app = Application::new();
    let handler = into_handler(|_ctx: RequestContext| async move {
        CALLED.store(true, Ordering::SeqCst);
        Ok(HttpResponse::text("handled"))
    });
    app.add_routes([("/site/{vdr_id}".to_string(), handler)])
        .unwrap();

    let response = app.handle(HttpRequest::new("GET", "/unknown")).await;
    assert_eq!(response.status, 404);
    assert_eq!(response.body, b"Not found.".to_vec());
    assert!(!CALLED.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_duplicate_registration_rejected() {
    let mut app = Application::new();
    let handler = |body: &'static str| {
        into_handler(move |_ctx: RequestContext| async move { Ok(HttpResponse::text(body)) })
    };

    app.add_routes([("/home".to_string(), handler("a"))]).unwrap();
    assert!(app.add_routes([("/home".to_string(), handler("b"))]).is_err());
}

// =============================================================================
// Upstream Header Workflow
// =============================================================================

#[tokio::test]
async fn test_decorated_handler_sees_bearer_headers() {
    let dir = TempDir::new().unwrap();
    let seed = OAuthToken {
        access_token: "abc123".to_string(),
        access_expiry: 3600,
        refresh_token: "rrr".to_string(),
        refresh_expiry: 86400,
        token_type: "Bearer".to_string(),
        user: "ops@example.com".to_string(),
        issued_at: chrono::Utc::now(),
    };
    let store = TokenStore::open(dir.path().join("token.json"), &seed).unwrap();
    let broker = Arc::new(TokenBroker::new(store, "vendor.example.com"));
    let provider = Arc::new(BearerHeaderProvider::new(broker, "vendor.example.com"));

    let mut app = Application::new().with_header_provider(provider);
    let inner = into_handler(|ctx: RequestContext| async move {
        let upstream = ctx.upstream().cloned().unwrap_or_default();
        assert!(!upstream.headers.is_empty());
        assert_eq!(
            upstream.headers.get("Authorization"),
            Some(&"Bearer abc123".to_string())
        );
        Ok(HttpResponse::text(upstream.base_url))
    });
    let wrapped = app.upstream_handler(inner).unwrap();
    app.add_routes([("/site/{vdr_id}".to_string(), wrapped)])
        .unwrap();

    let response = app.handle(HttpRequest::new("GET", "/site/9")).await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body, b"vendor.example.com".to_vec());
}

// =============================================================================
// Full Page Application Workflow
// =============================================================================

#[tokio::test]
async fn test_pages_assets_and_templates_together() {
    let dir = TempDir::new().unwrap();

    let static_dir = dir.path().join("static");
    fs::create_dir(&static_dir).unwrap();
    fs::write(static_dir.join("styles.css"), "body {}").unwrap();

    let template_dir = dir.path().join("templates");
    fs::create_dir(&template_dir).unwrap();
    fs::write(template_dir.join("site.hbs"), "<h1>Site {{vdr_id}}</h1>").unwrap();

    let engine = HandlebarsEngine::new(HandlebarsConfig::new(&template_dir)).unwrap();
    let assets = StaticAssetServer::new(StaticAssetsConfig::new(&static_dir)).unwrap();

    let mut app = Application::new()
        .with_assets(assets)
        .with_renderer(Arc::new(engine.clone()));

    let page = into_handler(move |ctx: RequestContext| {
        let engine = engine.clone();
        async move {
            let vdr_id = ctx.param("vdr_id").cloned().unwrap_or_default();
            let html = engine
                .render("site", &serde_json::json!({"vdr_id": vdr_id}))
                .map_err(|e| Error::Template(e.to_string()))?;
            Ok(HttpResponse::html(html))
        }
    });
    app.add_routes([("/site/{vdr_id}".to_string(), page)])
        .unwrap();

    // Static asset wins before routing
    let response = app.handle(HttpRequest::new("GET", "/styles.css")).await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body, b"body {}".to_vec());

    // Dynamic page renders through the template
    let response = app.handle(HttpRequest::new("GET", "/site/42")).await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body, b"<h1>Site 42</h1>".to_vec());

    // Anything else is a plain 404
    let response = app.handle(HttpRequest::new("GET", "/nope")).await;
    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn test_template_passthrough_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let template_dir = dir.path().join("templates");
    fs::create_dir(&template_dir).unwrap();
    fs::write(template_dir.join("page.hbs"), "{{greeting}}, {{name}}!").unwrap();

    let engine = HandlebarsEngine::new(HandlebarsConfig::new(&template_dir)).unwrap();
    let app = Application::new().with_renderer(Arc::new(engine));

    let context = serde_json::json!({"greeting": "Hello", "name": "Veranda"});
    let first = app.template("page", &context).unwrap();
    let second = app.template("page", &context).unwrap();

    assert_eq!(first, b"Hello, Veranda!".to_vec());
    assert_eq!(first, second);
}

// =============================================================================
// Settings Workflow
// =============================================================================

#[test]
fn test_settings_wire_into_auth_types() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(
        &path,
        r#"
            [app]
            name = "demo"

            [instance]
            host = "vendor.example.com"

            [auth]
            access_token = "aaa"
            access_expiry = 3600
            refresh_token = "rrr"
            refresh_expiry = 86400
            token_type = "Bearer"
            user = "ops@example.com"
        "#,
    )
    .unwrap();

    let settings = Settings::load(&path).unwrap();

    let seed = OAuthToken {
        access_token: settings.auth.access_token.clone(),
        access_expiry: settings.auth.access_expiry,
        refresh_token: settings.auth.refresh_token.clone(),
        refresh_expiry: settings.auth.refresh_expiry,
        token_type: settings.auth.token_type.clone(),
        user: settings.auth.user.clone(),
        issued_at: chrono::Utc::now(),
    };

    let store = TokenStore::open(dir.path().join(&settings.paths.token_file), &seed).unwrap();
    assert_eq!(store.load().unwrap().access_token, "aaa");
}
