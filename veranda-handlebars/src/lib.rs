//! Handlebars templating integration for the Veranda framework.
//!
//! Templates live in a `templates/` directory by convention and are
//! registered under their relative path without the extension. The engine
//! implements the core [`TemplateRenderer`] seam, so it plugs straight into
//! `Application::with_renderer`.
//!
//! ## Example
//!
//! ```no_run
//! use veranda_handlebars::{HandlebarsConfig, HandlebarsEngine};
//! use serde_json::json;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HandlebarsConfig::new("templates").with_dev_mode(false);
//! let engine = HandlebarsEngine::new(config)?;
//!
//! let html = engine.render("site", &json!({"vdr_id": "42"}))?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;

pub use config::HandlebarsConfig;
pub use engine::HandlebarsEngine;
pub use error::{Result, TemplateError};

use veranda_core::{Error, HttpResponse, TemplateRenderer};

impl TemplateRenderer for HandlebarsEngine {
    fn render(&self, name: &str, context: &serde_json::Value) -> std::result::Result<String, Error> {
        HandlebarsEngine::render(self, name, context).map_err(|e| Error::Template(e.to_string()))
    }
}

/// Render a template straight into an HTML response
pub fn render_response(
    engine: &HandlebarsEngine,
    template: &str,
    data: &serde_json::Value,
) -> Result<HttpResponse> {
    let html = engine.render(template, data)?;
    Ok(HttpResponse::html(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn engine_with(template: &str) -> (TempDir, HandlebarsEngine) {
        let temp_dir = TempDir::new().unwrap();
        let templates_dir = temp_dir.path().join("templates");
        fs::create_dir(&templates_dir).unwrap();
        fs::write(templates_dir.join("page.hbs"), template).unwrap();

        let engine = HandlebarsEngine::new(HandlebarsConfig::new(templates_dir)).unwrap();
        (temp_dir, engine)
    }

    #[test]
    fn test_renderer_seam() {
        let (_dir, engine) = engine_with("<h1>{{title}}</h1>");
        let renderer: &dyn TemplateRenderer = &engine;

        let html = renderer.render("page", &json!({"title": "Home"})).unwrap();
        assert_eq!(html, "<h1>Home</h1>");

        let err = renderer.render("missing", &json!({})).unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }

    #[test]
    fn test_render_response_sets_html_headers() {
        let (_dir, engine) = engine_with("<p>{{body}}</p>");
        let response = render_response(&engine, "page", &json!({"body": "hello"})).unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(
            response.headers.get("Content-Type"),
            Some(&"text/html; charset=utf-8".to_string())
        );
        assert_eq!(response.body, b"<p>hello</p>".to_vec());
    }
}
