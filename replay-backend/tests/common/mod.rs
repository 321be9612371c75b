// tests/common/mod.rs

pub mod db;
pub mod test_data;

use async_trait::async_trait;
use replay_backend::service::identity_service::{IdentityError, IdentityResolver};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// 外部認証APIの代わりに使うインメモリのリゾルバ
#[derive(Default)]
pub struct StubResolver {
    names: Mutex<HashMap<Uuid, String>>,
}

impl StubResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, guid: Uuid, name: &str) {
        self.names
            .lock()
            .expect("resolver lock")
            .insert(guid, name.to_string());
    }
}

#[async_trait]
impl IdentityResolver for StubResolver {
    async fn fetch_display_name(&self, guid: Uuid) -> Result<String, IdentityError> {
        self.names
            .lock()
            .expect("resolver lock")
            .get(&guid)
            .cloned()
            .ok_or(IdentityError::Status(reqwest::StatusCode::NOT_FOUND))
    }
}

/// 常に失敗するリゾルバ。ログインのフォールバック経路の検証に使う
pub struct FailingResolver;

#[async_trait]
impl IdentityResolver for FailingResolver {
    async fn fetch_display_name(&self, _guid: Uuid) -> Result<String, IdentityError> {
        Err(IdentityError::Status(
            reqwest::StatusCode::SERVICE_UNAVAILABLE,
        ))
    }
}
