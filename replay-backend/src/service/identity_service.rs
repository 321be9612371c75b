// src/service/identity_service.rs

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

/// 外部IDの解決に失敗したときに代わりに使う表示名。
/// ログインを外部API障害でブロックしない一方、名前をでっち上げない
pub const FALLBACK_DISPLAY_NAME: &str = "API Error";

/// 外部の認証API呼び出しに関するエラー
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("identity API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("identity API returned status {0}")]
    Status(reqwest::StatusCode),
}

/// 認証済み外部IDから表示名を解決する外部コラボレーター。
/// 特権的なID変更操作のIDは常にここ経由で得る
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn fetch_display_name(&self, guid: Uuid) -> Result<String, IdentityError>;
}

#[derive(Debug, Clone)]
pub struct HttpIdentityResolver {
    client: reqwest::Client,
    base_url: String,
}

impl HttpIdentityResolver {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PlayerDataResponse {
    #[serde(rename = "userName")]
    user_name: String,
}

#[async_trait]
impl IdentityResolver for HttpIdentityResolver {
    async fn fetch_display_name(&self, guid: Uuid) -> Result<String, IdentityError> {
        let url = format!("{}/api/player/{}", self.base_url, guid);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(IdentityError::Status(response.status()));
        }

        let data: PlayerDataResponse = response.json().await?;
        Ok(data.user_name)
    }
}
