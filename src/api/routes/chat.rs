//! Chat route.
//!
//! One route, two preserved behaviors selected by body shape:
//!
//! - `{ "message": ..., "menu": [...]? }` — recommendation flow. The menu
//!   comes from the body when provided, otherwise from the store. The
//!   completion is reconciled by dish name and returned together with the
//!   matching menu subset. Never cached.
//! - `{ "prompt": ... }` — ordering-assistant flow. Responses are cached
//!   under the verbatim prompt text; a fresh cache hit skips the
//!   completion call entirely.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::server::AppState;
use crate::error::{PlatterError, Result};
use crate::store::MenuItem;
use crate::{prompt, reconcile};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Ordering-assistant variant input.
    pub prompt: Option<String>,
    /// Recommendation variant input.
    pub message: Option<String>,
    /// Optional client-supplied menu for the recommendation variant.
    pub menu: Option<Vec<MenuItem>>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(rename = "recommendedMenu", skip_serializing_if = "Option::is_none")]
    pub recommended_menu: Option<Vec<MenuItem>>,
}

/// POST /api/chat
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    if let Some(message) = request.message {
        return recommend_dishes(&state, &message, request.menu).await;
    }
    if let Some(prompt_text) = request.prompt {
        return assist_ordering(&state, prompt_text).await;
    }
    Err(PlatterError::MalformedPayload(
        "request body must include either \"message\" or \"prompt\"".into(),
    ))
}

/// `{message}` variant: completion formatted as a numbered dish list,
/// reconciled against the menu by name.
async fn recommend_dishes(
    state: &AppState,
    message: &str,
    menu: Option<Vec<MenuItem>>,
) -> Result<Json<ChatResponse>> {
    let menu = match menu {
        Some(menu) => menu,
        None => state.store.list_all().await?,
    };

    let prompt = prompt::dish_list_prompt(message, &menu);
    let response = state.llm.complete(&prompt).await?;

    let names = reconcile::extract_item_names(&response);
    let recommended = reconcile::filter_menu_by_names(&menu, &names);

    Ok(Json(ChatResponse {
        response,
        recommended_menu: Some(recommended),
    }))
}

/// `{prompt}` variant: free-text assistant reply, cached by exact prompt
/// text.
async fn assist_ordering(state: &AppState, prompt_text: String) -> Result<Json<ChatResponse>> {
    if let Some(cached) = state.cache.get(&prompt_text) {
        return Ok(Json(ChatResponse {
            response: cached,
            recommended_menu: None,
        }));
    }

    let menu = state.store.list_all().await?;
    let prompt = prompt::ordering_prompt(&prompt_text, &menu);
    let response = state.llm.complete(&prompt).await?;
    state.cache.set(prompt_text, response.clone());

    Ok(Json(ChatResponse {
        response,
        recommended_menu: None,
    }))
}
