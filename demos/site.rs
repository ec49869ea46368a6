// Thin status pages over a vendor REST API.
//
// Expects the conventional layout next to the binary's working directory:
// settings.toml, templates/ (site.hbs, home.hbs), and static/.
//
// Run with: cargo run --example site --features full

use std::sync::Arc;
use veranda::logging::{info, LogConfig, LogFormat, LogLevel};
use veranda::{
    into_handler, Application, Error, HttpResponse, RequestContext, StaticAssetServer,
    StaticAssetsConfig,
};
use veranda_auth::{BearerHeaderProvider, OAuthToken, TokenBroker, TokenStore};
use veranda_config::Settings;
use veranda_handlebars::{HandlebarsConfig, HandlebarsEngine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = LogConfig::new()
        .level(LogLevel::Info)
        .format(LogFormat::Pretty)
        .init();

    let settings = Settings::load("settings.toml")?;

    let seed = OAuthToken {
        access_token: settings.auth.access_token.clone(),
        access_expiry: settings.auth.access_expiry,
        refresh_token: settings.auth.refresh_token.clone(),
        refresh_expiry: settings.auth.refresh_expiry,
        token_type: settings.auth.token_type.clone(),
        user: settings.auth.user.clone(),
        issued_at: chrono::Utc::now(),
    };
    let store = TokenStore::open(&settings.paths.token_file, &seed)?;
    let broker = Arc::new(TokenBroker::new(store, settings.instance.host.clone()));
    let provider = Arc::new(BearerHeaderProvider::new(
        broker,
        settings.instance.host.clone(),
    ));

    let engine = HandlebarsEngine::new(HandlebarsConfig::new(&settings.paths.template_dir))?;
    let assets = StaticAssetServer::new(StaticAssetsConfig::new(&settings.paths.static_dir))?;

    let mut app = Application::new()
        .with_assets(assets)
        .with_renderer(Arc::new(engine.clone()))
        .with_header_provider(provider);

    let home = into_handler(|_ctx: RequestContext| async move {
        Ok(HttpResponse::html("<h1>Veranda demo</h1><p>Try /site/42</p>"))
    });

    let site_engine = engine.clone();
    let site = app.upstream_handler(into_handler(move |ctx: RequestContext| {
        let engine = site_engine.clone();
        async move {
            let vdr_id = ctx.param("vdr_id").cloned().unwrap_or_default();
            let upstream = ctx.upstream().cloned().unwrap_or_default();

            // A real page would call the vendor API here, e.g.
            // GET https://{upstream.base_url}/rest/sites/{vdr_id}
            // with upstream.headers applied to the request.
            let html = engine
                .render(
                    "site",
                    &serde_json::json!({
                        "vdr_id": vdr_id,
                        "instance": upstream.base_url,
                    }),
                )
                .map_err(|e| Error::Template(e.to_string()))?;
            Ok(HttpResponse::html(html))
        }
    }))?;

    app.add_routes([
        ("/".to_string(), home),
        ("/site/{vdr_id}".to_string(), site),
    ])?;

    info!(name = %settings.app.name, port = settings.app.port, "starting");
    app.listen(settings.app.port).await?;
    Ok(())
}
