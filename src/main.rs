use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use platter::api::server::{start_server, AppState};
use platter::cache::PromptCache;
use platter::config::Config;
use platter::providers::GeminiClient;
use platter::store::MenuStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("invalid configuration")?;

    // A store that cannot be opened and probed at startup is fatal: the
    // service must not begin serving without it.
    let store = MenuStore::connect(&config.database_path)
        .await
        .context("failed to connect to the menu store")?;

    let llm = Arc::new(GeminiClient::new(
        &config.gemini_api_key,
        &config.gemini_model,
    ));
    let cache = PromptCache::new(config.cache_ttl_secs);

    let state = AppState::new(store, llm, cache);
    start_server(&config, state).await
}
