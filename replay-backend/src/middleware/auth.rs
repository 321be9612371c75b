// src/middleware/auth.rs

use crate::api::AppState;
use crate::error::AppError;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// 認証済みの呼び出し主体。GUIDは常にセッショントークン由来で、
/// 呼び出し側が自称したGUIDをそのまま信用することはない
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub guid: Uuid,
    pub username: String,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Authorization ヘッダー優先、なければセッションクッキー
        let bearer = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.to_string());

        let token = match bearer {
            Some(token) => token,
            None => CookieJar::from_headers(&parts.headers)
                .get(ACCESS_TOKEN_COOKIE)
                .map(|cookie| cookie.value().to_string())
                .ok_or_else(|| AppError::Unauthorized("Missing access token".to_string()))?,
        };

        let claims = state
            .jwt_manager
            .verify(&token)
            .map_err(|_| AppError::Unauthorized("Invalid or expired access token".to_string()))?;

        let guid = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid access token subject".to_string()))?;

        Ok(Self {
            guid,
            username: claims.name,
        })
    }
}
