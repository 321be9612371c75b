// src/api/dto/account_dto.rs

use crate::domain::{account_settings_model, history_entry_model};
use crate::service::account_service::{AccountDetails, LoginOutcome};
use crate::service::redaction_service::RedactionSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub guid: Uuid,
    pub username: String,
    pub is_admin: bool,
    pub created: bool,
    pub resolution_degraded: bool,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            guid: outcome.account.guid,
            username: outcome.account.username,
            is_admin: outcome.account.is_admin,
            created: outcome.created,
            resolution_degraded: outcome.resolution_degraded,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub redact_information: bool,
    pub friends: Vec<Uuid>,
}

impl From<account_settings_model::Model> for SettingsResponse {
    fn from(settings: account_settings_model::Model) -> Self {
        Self {
            redact_information: settings.redact_information,
            friends: settings.friends.0,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryEntryResponse {
    pub action: String,
    pub details: String,
    pub time: DateTime<Utc>,
}

impl From<history_entry_model::Model> for HistoryEntryResponse {
    fn from(entry: history_entry_model::Model) -> Self {
        Self {
            action: entry.action,
            details: entry.details,
            time: entry.time,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub guid: Uuid,
    pub username: String,
    pub is_admin: bool,
    pub favorite_replays: Vec<i32>,
    pub created_at: DateTime<Utc>,
    pub settings: SettingsResponse,
    pub history: Vec<HistoryEntryResponse>,
}

impl From<AccountDetails> for AccountResponse {
    fn from(details: AccountDetails) -> Self {
        Self {
            guid: details.account.guid,
            username: details.account.username,
            is_admin: details.account.is_admin,
            favorite_replays: details.account.favorite_replays.0,
            created_at: details.account.created_at,
            settings: details.settings.into(),
            history: details.history.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub redact_information: bool,
    #[serde(default)]
    pub friends: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteAccountQuery {
    #[serde(default)]
    pub permanently: bool,
}

#[derive(Debug, Deserialize)]
pub struct AdminTargetQuery {
    pub guid: String,
}

#[derive(Debug, Serialize)]
pub struct DeletionResponse {
    pub permanent: bool,
    /// 恒久削除のときだけ入る。failed_ids が空でなければ運用側の再実行が要る
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redaction: Option<RedactionSummary>,
}

#[derive(Debug, Serialize)]
pub struct FavoriteToggleResponse {
    pub replay_id: i32,
    pub favorited: bool,
}
