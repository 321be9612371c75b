// src/api/mod.rs

use crate::config::Config;
use crate::db::DbPool;
use crate::repository::replay_repository::ReplayRepository;
use crate::service::account_service::AccountService;
use crate::service::export_service::ExportService;
use crate::service::identity_service::{HttpIdentityResolver, IdentityResolver};
use crate::utils::jwt::JwtManager;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod handlers;

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService>,
    pub export_service: Arc<ExportService>,
    pub replay_repo: Arc<ReplayRepository>,
    pub jwt_manager: Arc<JwtManager>,
    pub db: DbPool,
}

impl AppState {
    pub fn new(db: DbPool, config: &Config) -> Self {
        let resolver: Arc<dyn IdentityResolver> =
            Arc::new(HttpIdentityResolver::new(config.identity_api_url.clone()));
        Self::with_resolver(db, config, resolver)
    }

    /// テストや別実装のリゾルバを差し込むためのコンストラクタ
    pub fn with_resolver(
        db: DbPool,
        config: &Config,
        resolver: Arc<dyn IdentityResolver>,
    ) -> Self {
        Self {
            account_service: Arc::new(AccountService::new(db.clone(), resolver)),
            export_service: Arc::new(ExportService::new(db.clone())),
            replay_repo: Arc::new(ReplayRepository::new(db.clone())),
            jwt_manager: Arc::new(JwtManager::new(
                &config.jwt_secret,
                config.jwt_expiry_hours,
            )),
            db,
        }
    }
}

/// 全ルートを束ねたルーター
pub fn app_router(app_state: AppState) -> Router {
    Router::new()
        .merge(handlers::account_handler::account_router(app_state.clone()))
        .merge(handlers::replay_handler::replay_router(app_state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
