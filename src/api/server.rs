//! Axum server for the restaurant assistant API.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::cache::PromptCache;
use crate::config::Config;
use crate::providers::CompletionProvider;
use crate::store::MenuStore;

/// Shared state for all API handlers.
///
/// Everything a handler touches is injected here; no module-level mutable
/// state. The store handle and the cache are both safe to share across
/// concurrent requests.
#[derive(Clone)]
pub struct AppState {
    /// Menu database handle.
    pub store: MenuStore,
    /// Completion source (Gemini in production, a stub in tests).
    pub llm: Arc<dyn CompletionProvider>,
    /// TTL cache for the `{prompt}` chat variant.
    pub cache: Arc<PromptCache>,
}

impl AppState {
    pub fn new(store: MenuStore, llm: Arc<dyn CompletionProvider>, cache: PromptCache) -> Self {
        Self {
            store,
            llm,
            cache: Arc::new(cache),
        }
    }
}

/// Build the axum router with all API routes.
pub fn build_router(state: AppState) -> Router {
    // The surface is consumed by browser frontends served from anywhere, so
    // CORS is open to all origins.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(super::routes::health::get_health))
        .route("/api/menu", get(super::routes::menu::list_menu))
        .route("/api/menu/filter", get(super::routes::menu::filter_menu))
        .route("/api/chat", post(super::routes::chat::chat))
        .route(
            "/api/menu/recommend",
            post(super::routes::recommend::recommend),
        )
        // Body size limit: 1 MiB. A menu embedded in a chat body stays far
        // below this.
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Bind and serve until the process is stopped.
pub async fn start_server(config: &Config, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state);
    let addr = format!("{}:{}", config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("API server listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
