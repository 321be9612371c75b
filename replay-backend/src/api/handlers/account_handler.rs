// src/api/handlers/account_handler.rs

use crate::api::dto::account_dto::{
    AccountResponse, AdminTargetQuery, DeleteAccountQuery, DeletionResponse,
    FavoriteToggleResponse, LoginResponse, SettingsResponse, UpdateSettingsRequest,
};
use crate::api::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::service::export_service::ExportArchive;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

/// ログイン後のアカウント作成・更新。墓標化済みGUIDは403で、
/// クライアントはセッションを破棄する
pub async fn login_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<LoginResponse>> {
    let outcome = app_state.account_service.on_login(user.guid).await?;
    Ok(Json(outcome.into()))
}

pub async fn get_account_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<AccountResponse>> {
    let details = app_state.account_service.get_account(user.guid).await?;
    Ok(Json(details.into()))
}

pub async fn update_settings_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<UpdateSettingsRequest>,
) -> AppResult<Json<SettingsResponse>> {
    let settings = app_state
        .account_service
        .update_settings(user.guid, request.redact_information, request.friends)
        .await?;
    Ok(Json(settings.into()))
}

pub async fn toggle_favorite_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(replay_id): Path<i32>,
) -> AppResult<Json<FavoriteToggleResponse>> {
    let favorited = app_state
        .account_service
        .toggle_favorite(user.guid, replay_id)
        .await?;
    Ok(Json(FavoriteToggleResponse {
        replay_id,
        favorited,
    }))
}

/// 自分のアカウントの削除。`?permanently=true` でGDPR削除になる
pub async fn delete_account_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<DeleteAccountQuery>,
) -> AppResult<Json<DeletionResponse>> {
    let outcome = app_state
        .account_service
        .delete_own(user.guid, query.permanently)
        .await?;
    Ok(Json(DeletionResponse {
        permanent: query.permanently,
        redaction: outcome.redaction,
    }))
}

/// 自分の保存データ一式をzipでダウンロードする
pub async fn download_account_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Response> {
    let archive = app_state.export_service.export_for(user.guid, false).await?;
    zip_response(archive)
}

/// 管理者による任意GUIDのデータダウンロード
pub async fn admin_download_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<AdminTargetQuery>,
) -> AppResult<Response> {
    let target_guid = parse_target_guid(&query.guid)?;
    app_state.account_service.ensure_admin(user.guid).await?;

    let archive = app_state.export_service.export_for(target_guid, true).await?;
    zip_response(archive)
}

/// 管理者によるGDPR削除。対象がログイン経験のないGUIDでも墓標化できる
pub async fn admin_delete_gdpr_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<AdminTargetQuery>,
) -> AppResult<Json<DeletionResponse>> {
    let target_guid = parse_target_guid(&query.guid)?;
    let outcome = app_state
        .account_service
        .admin_delete(user.guid, target_guid, true)
        .await?;
    Ok(Json(DeletionResponse {
        permanent: true,
        redaction: outcome.redaction,
    }))
}

/// 管理者によるモデレーション削除。アカウント行だけを消し、
/// 過去の参加レコードには触れない
pub async fn admin_delete_non_gdpr_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<AdminTargetQuery>,
) -> AppResult<Json<DeletionResponse>> {
    let target_guid = parse_target_guid(&query.guid)?;
    let outcome = app_state
        .account_service
        .admin_delete(user.guid, target_guid, false)
        .await?;
    Ok(Json(DeletionResponse {
        permanent: false,
        redaction: outcome.redaction,
    }))
}

/// 管理者操作の対象GUIDは、ストアに触れる前に検証する
fn parse_target_guid(raw: &str) -> AppResult<Uuid> {
    if raw.trim().is_empty() {
        return Err(AppError::BadRequest("Guid is null or empty.".to_string()));
    }
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::BadRequest("Guid is not a valid guid.".to_string()))
}

fn zip_response(archive: ExportArchive) -> AppResult<Response> {
    let file_name = archive.file_name.clone();
    let bytes = archive.into_zip_bytes()?;

    let headers = [
        (header::CONTENT_TYPE, "application/zip".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        ),
    ];
    Ok((headers, bytes).into_response())
}

/// アカウントルーター
pub fn account_router(app_state: AppState) -> Router {
    Router::new()
        .route("/account/login", post(login_handler))
        .route(
            "/account",
            get(get_account_handler).delete(delete_account_handler),
        )
        .route("/account/settings", put(update_settings_handler))
        .route("/account/favorites/{replay_id}", post(toggle_favorite_handler))
        .route("/account/download", get(download_account_handler))
        .route("/account/download-data-admin", get(admin_download_handler))
        .route("/account/delete-admin", post(admin_delete_gdpr_handler))
        .route(
            "/account/delete-admin-non-gdpr",
            post(admin_delete_non_gdpr_handler),
        )
        .with_state(app_state)
}
