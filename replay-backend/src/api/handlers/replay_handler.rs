// src/api/handlers/replay_handler.rs

use crate::api::dto::replay_dto::{ReplayListQuery, ReplayListResponse, ReplayResponse};
use crate::api::AppState;
use crate::error::{AppError, AppResult};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

pub async fn get_replay_handler(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ReplayResponse>> {
    let (replay, players) = app_state
        .replay_repo
        .find_with_players(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Replay not found".to_string()))?;
    Ok(Json(ReplayResponse::from_parts(replay, players)))
}

pub async fn list_replays_handler(
    State(app_state): State<AppState>,
    Query(query): Query<ReplayListQuery>,
) -> AppResult<Json<ReplayListResponse>> {
    let (replays, total_count) = app_state
        .replay_repo
        .find_most_recent(query.page, query.page_size)
        .await?;

    Ok(Json(ReplayListResponse {
        replays: replays.into_iter().map(Into::into).collect(),
        total_count,
        page: query.page,
        page_size: query.page_size,
    }))
}

/// リプレイ閲覧ルーター（公開、認証不要）
pub fn replay_router(app_state: AppState) -> Router {
    Router::new()
        .route("/replays", get(list_replays_handler))
        .route("/replays/{id}", get(get_replay_handler))
        .with_state(app_state)
}
