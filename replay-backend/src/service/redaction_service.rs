// src/service/redaction_service.rs

use crate::db::DbPool;
use crate::error::AppResult;
use crate::repository::player_repository::PlayerRepository;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// 1回のスキャンで取得するレコードID数
const REDACTION_PAGE_SIZE: u64 = 256;

/// 縮約パスの結果。部分失敗は例外ではなくここに載せて返す。
/// アカウント削除自体は縮約の不調でブロックしない決まりなので、
/// 呼び出し側はこのサマリーを見て再実行を判断する
#[derive(Debug, Clone, Default, Serialize)]
pub struct RedactionSummary {
    /// スナップショットに入った参加レコード数
    pub scanned: u64,
    /// 今回新たに縮約したレコード数
    pub redacted: u64,
    /// 既に縮約済みでスキップしたレコード数
    pub already_redacted: u64,
    /// 永続化に失敗したレコードID。空でなければ再実行が必要
    pub failed_ids: Vec<i32>,
}

impl RedactionSummary {
    pub fn is_complete(&self) -> bool {
        self.failed_ids.is_empty()
    }
}

#[derive(Clone)]
pub struct RedactionService {
    player_repo: Arc<PlayerRepository>,
}

impl RedactionService {
    pub fn new(db: DbPool) -> Self {
        Self {
            player_repo: Arc::new(PlayerRepository::new(db)),
        }
    }

    /// 指定GUIDの全参加レコードから個人フィールドを不可逆に消し込む。
    ///
    /// レコード単位の条件付きUPDATEに依存し、リプレイ単位のロックは取らない。
    /// スキャン順に依存せず、部分失敗後の再実行でも縮約済み行を別の値で
    /// 上書きすることはない。スナップショット取得後に追記された参加レコードは
    /// この呼び出しでは保証されない（墓標が既に在るため後続パスで拾われる）
    pub async fn redact(&self, guid: Uuid) -> AppResult<RedactionSummary> {
        let mut summary = RedactionSummary::default();
        let mut cursor: Option<i32> = None;

        loop {
            let page = self
                .player_repo
                .find_matching_page(guid, cursor, REDACTION_PAGE_SIZE)
                .await?;

            let Some(&last_id) = page.last() else {
                break;
            };

            for player_id in &page {
                summary.scanned += 1;
                match self.player_repo.redact_one(*player_id).await {
                    Ok(0) => summary.already_redacted += 1,
                    Ok(_) => summary.redacted += 1,
                    Err(err) => {
                        warn!(
                            player_id = *player_id,
                            error = %err,
                            "Failed to persist redaction for participation record"
                        );
                        summary.failed_ids.push(*player_id);
                    }
                }
            }

            cursor = Some(last_id);
            if (page.len() as u64) < REDACTION_PAGE_SIZE {
                break;
            }
        }

        info!(
            %guid,
            scanned = summary.scanned,
            redacted = summary.redacted,
            already_redacted = summary.already_redacted,
            failed = summary.failed_ids.len(),
            "Redaction pass finished"
        );

        Ok(summary)
    }
}
