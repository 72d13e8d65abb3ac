use axum::http::{HeaderValue, Method};
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tower_http::cors::{Any, CorsLayer};
use walkiepal::{
    constants::SCHEDULER_POLL_INTERVAL_MS,
    handlers::{create_router, ServerState, SharedApp},
    services::{AssetCache, CacheStorage, DirOrigin, FeedbackClient, ResponseSimulator, SystemClock},
    store::{JsonFileStore, KeyValueStore},
    utils,
    view::TracingView,
    App, AppSettings, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    utils::init_logging();

    let config = Config::from_env()?;
    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(&config.store_path));
    let settings = AppSettings::from_config(&config)?;
    let simulator = ResponseSimulator::from_entropy(settings.response_delay, settings.accept_probability);

    let app = App::start(
        settings,
        store,
        Arc::new(SystemClock),
        simulator,
        Box::new(TracingView),
        "/",
    );

    let origin = Arc::new(DirOrigin::new(&config.asset_dir));
    let mut assets = AssetCache::new(CacheStorage::new(), &config.cache_version);
    match assets.install(origin.as_ref()) {
        Ok(count) => tracing::info!("📦 Cached {} static assets", count),
        Err(e) => tracing::warn!("⚠️ Static asset install failed, serving uncached: {}", e),
    }
    assets.activate();

    let state = ServerState::new(app, FeedbackClient::new(&config.feedback_endpoint), assets, origin);
    tokio::spawn(run_scheduler(state.app.clone()));

    let port = config.port;
    let router = create_router(state).layer(create_cors_layer(&config));

    let listener = tokio::net::TcpListener::bind(&format!("0.0.0.0:{}", port)).await?;
    tracing::info!("🚶 WalkiePal running on port {}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

/// Fires due sweeper and simulator tasks for the lifetime of the process.
async fn run_scheduler(app: SharedApp) {
    let mut interval = time::interval(Duration::from_millis(SCHEDULER_POLL_INTERVAL_MS));
    loop {
        interval.tick().await;
        let fired = app.lock().await.run_due();
        if fired > 0 {
            tracing::debug!("⏰ Ran {} scheduled tasks", fired);
        }
    }
}

fn create_cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any)
        .allow_credentials(false);

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        // No usable origins configured: stay permissive for development
        cors.allow_origin(Any)
    } else {
        tracing::info!("🔒 CORS restricted to {} origins", origins.len());
        cors.allow_origin(origins)
    }
}
