// src/service/export_service.rs

use crate::db::DbPool;
use crate::domain::{account_settings_model, history_entry_model, player_model, replay_model};
use crate::error::{AppError, AppResult};
use crate::repository::account_repository::AccountRepository;
use crate::repository::history_repository::HistoryRepository;
use crate::repository::player_repository::PlayerRepository;
use crate::repository::replay_repository::ReplayRepository;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{Cursor, Write};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

/// アーカイブ内の1エントリ。yieldされる前に必ず全量シリアライズされる
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ArchiveEntry {
    fn json<T: Serialize>(name: &str, value: &T) -> AppResult<Self> {
        let bytes = serde_json::to_vec(value).map_err(|err| {
            AppError::InternalServerError(format!("Failed to serialize export entry: {}", err))
        })?;
        Ok(Self {
            name: name.to_string(),
            bytes,
        })
    }
}

/// 1回のエクスポートの成果物。entries の順序は決定的
#[derive(Debug, Clone)]
pub struct ExportArchive {
    pub file_name: String,
    pub entries: Vec<ArchiveEntry>,
}

impl ExportArchive {
    /// エントリ列をzipに書き出す
    pub fn into_zip_bytes(self) -> AppResult<Vec<u8>> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in &self.entries {
            writer
                .start_file(entry.name.as_str(), options)
                .map_err(|err| {
                    AppError::InternalServerError(format!("Failed to create archive entry: {}", err))
                })?;
            writer.write_all(&entry.bytes).map_err(|err| {
                AppError::InternalServerError(format!("Failed to write archive entry: {}", err))
            })?;
        }

        let cursor = writer.finish().map_err(|err| {
            AppError::InternalServerError(format!("Failed to finalize archive: {}", err))
        })?;
        Ok(cursor.into_inner())
    }
}

/// user.json のスキーマ。履歴は history.json 側に出すので重複させない
#[derive(Debug, Serialize)]
struct AccountExportEntry {
    guid: Uuid,
    username: String,
    is_admin: bool,
    favorite_replays: Vec<i32>,
    created_at: DateTime<Utc>,
    settings: Option<SettingsExportEntry>,
}

#[derive(Debug, Serialize)]
struct SettingsExportEntry {
    redact_information: bool,
    friends: Vec<Uuid>,
}

impl From<account_settings_model::Model> for SettingsExportEntry {
    fn from(settings: account_settings_model::Model) -> Self {
        Self {
            redact_information: settings.redact_information,
            friends: settings.friends.0,
        }
    }
}

/// replay-<id>.json のスキーマ。参加レコードは対象GUIDの分だけを含め、
/// 他参加者の個人データをエクスポートに漏らさない
#[derive(Debug, Serialize)]
struct ReplayExportEntry {
    #[serde(flatten)]
    replay: replay_model::Model,
    round_end_players: Vec<player_model::Model>,
}

/// 対象GUIDの保存データ一式を、名前付きエントリ列として実体化するサービス。
/// 状態は一切変更しない
#[derive(Clone)]
pub struct ExportService {
    account_repo: Arc<AccountRepository>,
    history_repo: Arc<HistoryRepository>,
    replay_repo: Arc<ReplayRepository>,
    player_repo: Arc<PlayerRepository>,
}

impl ExportService {
    pub fn new(db: DbPool) -> Self {
        Self {
            account_repo: Arc::new(AccountRepository::new(db.clone())),
            history_repo: Arc::new(HistoryRepository::new(db.clone())),
            replay_repo: Arc::new(ReplayRepository::new(db.clone())),
            player_repo: Arc::new(PlayerRepository::new(db)),
        }
    }

    /// GUIDのデータ一式をアーカイブとして組み立てる。
    ///
    /// 対象リプレイの集合は冒頭の1クエリでスナップショットされる。以降に同じ
    /// GUIDへ縮約が走った場合、作成済みのエントリは遡って直さないが、
    /// 各エントリは必ず完全な形でしか追加されない（ベストエフォート契約）。
    ///
    /// セルフサービス版はアカウントが無ければ `NotFound`。管理者版
    /// （`requested_by_admin`）はアカウントが無いGUIDでもリプレイ分だけを出す
    pub async fn export_for(
        &self,
        guid: Uuid,
        requested_by_admin: bool,
    ) -> AppResult<ExportArchive> {
        let account = self.account_repo.find_by_guid(guid).await?;
        if account.is_none() && !requested_by_admin {
            return Err(AppError::NotFound(
                "No account exists for this identifier".to_string(),
            ));
        }

        let mut entries = Vec::new();

        if let Some(account) = account {
            let history: Vec<history_entry_model::Model> =
                self.history_repo.find_by_account(account.id).await?;
            entries.push(ArchiveEntry::json("history.json", &history)?);

            let settings = self.account_repo.find_settings(account.id).await?;
            let profile = AccountExportEntry {
                guid: account.guid,
                username: account.username,
                is_admin: account.is_admin,
                favorite_replays: account.favorite_replays.0,
                created_at: account.created_at,
                settings: settings.map(SettingsExportEntry::from),
            };
            entries.push(ArchiveEntry::json("user.json", &profile)?);
        }

        // 対象リプレイ集合の一貫スナップショット
        let replay_ids = self.replay_repo.find_ids_by_participant(guid).await?;
        for replay_id in replay_ids {
            let Some(replay) = self.replay_repo.find_by_id(replay_id).await? else {
                continue;
            };
            let players = self
                .player_repo
                .find_by_replay_and_guid(replay_id, guid)
                .await?;
            let entry = ReplayExportEntry {
                replay,
                round_end_players: players,
            };
            entries.push(ArchiveEntry::json(&format!("replay-{}.json", replay_id), &entry)?);
        }

        let date = Utc::now().format("%Y-%m-%d");
        let file_name = if requested_by_admin {
            format!("account-{}-admin_{}.zip", guid, date)
        } else {
            format!("account-{}_{}.zip", guid, date)
        };

        info!(%guid, entries = entries.len(), requested_by_admin, "Built account export archive");

        Ok(ExportArchive { file_name, entries })
    }
}
