//! Menu listing and filtering routes.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::server::AppState;
use crate::error::Result;
use crate::store::MenuItem;

#[derive(Debug, Deserialize)]
pub struct FilterParams {
    pub filter: Option<String>,
}

/// GET /api/menu — the full menu.
pub async fn list_menu(State(state): State<Arc<AppState>>) -> Result<Json<Vec<MenuItem>>> {
    Ok(Json(state.store.list_all().await?))
}

/// GET /api/menu/filter?filter=... — substring-filtered menu.
///
/// An absent or empty filter behaves exactly like `/api/menu`.
pub async fn filter_menu(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Vec<MenuItem>>> {
    let items = match params.filter.as_deref() {
        Some(filter) if !filter.is_empty() => state.store.list_filtered(filter).await?,
        _ => state.store.list_all().await?,
    };
    Ok(Json(items))
}
