// Blog endpoints of the /v1 namespace
use crate::common::models::{BlogEntry, BlogSummary};
use crate::server::error::ApiError;
use crate::server::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use log::debug;
use uuid::Uuid;

/// Liveness probe.
pub async fn ping() -> &'static str {
    "pong"
}

/// Summaries of every entry, newest first.
pub async fn newest(State(state): State<AppState>) -> Result<Json<Vec<BlogSummary>>, ApiError> {
    let summaries = state.db.newest_summaries().await?;
    debug!("[BLOG] newest -> {} entries", summaries.len());
    Ok(Json(summaries))
}

pub async fn blog_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BlogEntry>, ApiError> {
    let unique_id = Uuid::parse_str(&id).map_err(|_| ApiError::InvalidId)?;
    let entry = state
        .db
        .entry_by_id(unique_id)
        .await?
        .ok_or(ApiError::NotFound(id))?;
    Ok(Json(entry))
}
