//! ID-based recommendation route.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::server::AppState;
use crate::error::Result;
use crate::store::MenuItem;
use crate::{prompt, reconcile};

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub prompt: String,
}

/// POST /api/menu/recommend
///
/// Asks the model for a JSON array of menu ids and returns the matching
/// rows. When the completion cannot be parsed as an id array, the entire
/// menu is returned instead — the caller must treat "no parse" as "show
/// everything".
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<Vec<MenuItem>>> {
    let menu = state.store.list_all().await?;

    let prompt = prompt::id_selection_prompt(&request.prompt, &menu);
    let completion = state.llm.complete(&prompt).await?;

    let items = match reconcile::recommended_ids(&completion) {
        Some(ids) => state.store.list_by_ids(ids).await?,
        None => menu,
    };
    Ok(Json(items))
}
