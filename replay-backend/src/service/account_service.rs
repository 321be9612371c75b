// src/service/account_service.rs

use crate::db::DbPool;
use crate::domain::history_entry_model::{
    self, ACTION_FAVORITE_ADDED, ACTION_FAVORITE_REMOVED, ACTION_SETTINGS_UPDATED,
};
use crate::domain::{account_model, account_settings_model};
use crate::error::{AppError, AppResult};
use crate::repository::account_repository::AccountRepository;
use crate::repository::gdpr_request_repository::GdprRequestRepository;
use crate::repository::history_repository::HistoryRepository;
use crate::repository::replay_repository::ReplayRepository;
use crate::service::identity_service::{IdentityResolver, FALLBACK_DISPLAY_NAME};
use crate::service::redaction_service::{RedactionService, RedactionSummary};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// ログイン処理の結果
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub account: account_model::Model,
    /// このログインでアカウントが新規作成されたか
    pub created: bool,
    /// 外部IDの解決に失敗し、センチネル表示名で続行したか
    pub resolution_degraded: bool,
}

/// 削除処理の結果。恒久削除では縮約サマリーを運ぶ
#[derive(Debug, Clone)]
pub struct DeletionOutcome {
    pub redaction: Option<RedactionSummary>,
}

impl DeletionOutcome {
    /// 縮約が完了しなかった「成功扱いだが要フォローアップ」の状態か
    pub fn is_degraded(&self) -> bool {
        self.redaction
            .as_ref()
            .is_some_and(|summary| !summary.is_complete())
    }
}

/// アカウントの詳細（プロフィール＋設定＋履歴）
#[derive(Debug, Clone)]
pub struct AccountDetails {
    pub account: account_model::Model,
    pub settings: account_settings_model::Model,
    pub history: Vec<history_entry_model::Model>,
}

/// アカウントのライフサイクル全体を編成するサービス。
/// 識別子の論理状態は Unknown -> Active -> {Unknown(通常削除), Tombstoned(恒久削除)}
/// で、Tombstoned は終端
#[derive(Clone)]
pub struct AccountService {
    account_repo: Arc<AccountRepository>,
    history_repo: Arc<HistoryRepository>,
    gdpr_repo: Arc<GdprRequestRepository>,
    replay_repo: Arc<ReplayRepository>,
    redaction: RedactionService,
    resolver: Arc<dyn IdentityResolver>,
}

impl AccountService {
    pub fn new(db: DbPool, resolver: Arc<dyn IdentityResolver>) -> Self {
        Self {
            account_repo: Arc::new(AccountRepository::new(db.clone())),
            history_repo: Arc::new(HistoryRepository::new(db.clone())),
            gdpr_repo: Arc::new(GdprRequestRepository::new(db.clone())),
            replay_repo: Arc::new(ReplayRepository::new(db.clone())),
            redaction: RedactionService::new(db),
            resolver,
        }
    }

    /// ログイン時のアカウント作成・更新。
    ///
    /// 墓標があるGUIDは `Forbidden` で拒否され、アカウントは作られない。
    /// 初回ログインではアカウント・設定・"created" 履歴が1単位で作成され、
    /// 以降のログインでは解決済み表示名が変わっていれば更新して "renamed" を
    /// 追記する。外部IDの解決失敗はログインを妨げず、センチネル表示名で続行する
    pub async fn on_login(&self, guid: Uuid) -> AppResult<LoginOutcome> {
        if self.gdpr_repo.exists(guid).await? {
            warn!(%guid, "Login rejected: identifier is tombstoned by a GDPR request");
            return Err(AppError::Forbidden(
                "You have requested to be deleted from the database. You cannot create an account."
                    .to_string(),
            ));
        }

        let (username, resolution_degraded) = match self.resolver.fetch_display_name(guid).await {
            Ok(name) => (name, false),
            Err(err) => {
                warn!(%guid, error = %err, "Identity lookup failed, using fallback display name");
                (FALLBACK_DISPLAY_NAME.to_string(), true)
            }
        };

        match self.account_repo.find_by_guid(guid).await? {
            None => {
                // 同時初回ログインは guid の一意制約で直列化される。
                // 敗者は挿入に失敗するので、勝者の行を拾って続行する
                let account = match self.account_repo.create_with_settings(guid, &username).await {
                    Ok(account) => account,
                    Err(err) => match self.account_repo.find_by_guid(guid).await? {
                        Some(existing) => existing,
                        None => return Err(err.into()),
                    },
                };
                info!(%guid, username = %account.username, "Created new account");
                Ok(LoginOutcome {
                    account,
                    created: true,
                    resolution_degraded,
                })
            }
            Some(account) if account.username != username => {
                let account = self.account_repo.rename(account, &username).await?;
                info!(%guid, username = %username, "Updated username");
                Ok(LoginOutcome {
                    account,
                    created: false,
                    resolution_degraded,
                })
            }
            Some(account) => Ok(LoginOutcome {
                account,
                created: false,
                resolution_degraded,
            }),
        }
    }

    /// プロフィール・設定・履歴をまとめて取得
    pub async fn get_account(&self, guid: Uuid) -> AppResult<AccountDetails> {
        let account = self
            .account_repo
            .find_by_guid(guid)
            .await?
            .ok_or_else(|| AppError::NotFound("No account exists for this identifier".to_string()))?;

        // 設定はアカウントと同一トランザクションで作られるので、欠けていたら不変条件違反
        let settings = self
            .account_repo
            .find_settings(account.id)
            .await?
            .ok_or_else(|| {
                AppError::InternalServerError("Account settings row is missing".to_string())
            })?;

        let history = self.history_repo.find_by_account(account.id).await?;

        Ok(AccountDetails {
            account,
            settings,
            history,
        })
    }

    /// 自分のアカウントを削除する。
    ///
    /// `permanent` の場合は墓標挿入 -> 縮約 -> アカウント行削除の順で進む。
    /// この順序により、途中でクラッシュしても「墓標のみ」「墓標＋縮約済みで
    /// 行だけ残存」という再開可能な状態にしかならない。縮約の部分失敗は
    /// 削除を止めず、結果に載せて返す。
    ///
    /// 恒久削除の再実行（行は消えたが墓標が在る）はエラーではなく、
    /// 縮約が完了していることの確認に降格する
    pub async fn delete_own(&self, guid: Uuid, permanent: bool) -> AppResult<DeletionOutcome> {
        let account = match self.account_repo.find_by_guid(guid).await? {
            Some(account) => account,
            None => {
                if permanent && self.gdpr_repo.exists(guid).await? {
                    info!(%guid, "Repeated permanent deletion; ensuring redaction has completed");
                    let summary = self.redaction.redact(guid).await?;
                    return Ok(DeletionOutcome {
                        redaction: Some(summary),
                    });
                }
                return Err(AppError::NotFound(
                    "No account exists for this identifier".to_string(),
                ));
            }
        };

        let redaction = if permanent {
            self.tombstone_and_redact(guid).await?
        } else {
            None
        };

        self.account_repo.delete_by_id(account.id).await?;
        info!(%guid, permanent, "Deleted account");

        let outcome = DeletionOutcome { redaction };
        if outcome.is_degraded() {
            warn!(%guid, "Account removed but redaction is incomplete; operator follow-up required");
        }
        Ok(outcome)
    }

    /// 管理者による削除。対象アカウントが存在しなくても成功する必要がある
    /// （一度もログインしていないGUIDを先回りで墓標化できる）
    pub async fn admin_delete(
        &self,
        requester_guid: Uuid,
        target_guid: Uuid,
        permanent: bool,
    ) -> AppResult<DeletionOutcome> {
        self.ensure_admin(requester_guid).await?;

        let target = self.account_repo.find_by_guid(target_guid).await?;

        let redaction = if permanent {
            self.tombstone_and_redact(target_guid).await?
        } else {
            None
        };

        if let Some(account) = target {
            self.account_repo.delete_by_id(account.id).await?;
        }
        info!(
            requester = %requester_guid,
            target = %target_guid,
            permanent,
            "Admin deleted account"
        );

        let outcome = DeletionOutcome { redaction };
        if outcome.is_degraded() {
            warn!(
                target = %target_guid,
                "Account removed but redaction is incomplete; operator follow-up required"
            );
        }
        Ok(outcome)
    }

    /// 要求者が管理者アカウントであることを確認する
    pub async fn ensure_admin(&self, guid: Uuid) -> AppResult<account_model::Model> {
        let requester = self
            .account_repo
            .find_by_guid(guid)
            .await?
            .ok_or_else(|| AppError::Forbidden("You are not an admin.".to_string()))?;

        if !requester.is_admin {
            return Err(AppError::Forbidden("You are not an admin.".to_string()));
        }
        Ok(requester)
    }

    /// 設定を書き換え、履歴を追記する
    pub async fn update_settings(
        &self,
        guid: Uuid,
        redact_information: bool,
        friends: Vec<Uuid>,
    ) -> AppResult<account_settings_model::Model> {
        let account = self
            .account_repo
            .find_by_guid(guid)
            .await?
            .ok_or_else(|| AppError::NotFound("No account exists for this identifier".to_string()))?;

        let details = format!(
            "redact_information={}, friends={}",
            redact_information,
            friends.len()
        );
        let settings = self
            .account_repo
            .update_settings(
                account.id,
                redact_information,
                friends,
                ACTION_SETTINGS_UPDATED,
                &details,
            )
            .await?;
        Ok(settings)
    }

    /// お気に入りの付け外し。戻り値は新しい所属状態（true = 追加された）
    pub async fn toggle_favorite(&self, guid: Uuid, replay_id: i32) -> AppResult<bool> {
        let account = self
            .account_repo
            .find_by_guid(guid)
            .await?
            .ok_or_else(|| AppError::NotFound("No account exists for this identifier".to_string()))?;

        if !self.replay_repo.exists(replay_id).await? {
            return Err(AppError::NotFound("Replay not found".to_string()));
        }

        let mut favorites = account.favorite_replays.0.clone();
        let added = if let Some(position) = favorites.iter().position(|id| *id == replay_id) {
            favorites.remove(position);
            false
        } else {
            favorites.push(replay_id);
            true
        };

        let (action, details) = if added {
            (ACTION_FAVORITE_ADDED, format!("Replay {}", replay_id))
        } else {
            (ACTION_FAVORITE_REMOVED, format!("Replay {}", replay_id))
        };
        self.account_repo
            .set_favorites(account, favorites, action, &details)
            .await?;
        Ok(added)
    }

    /// 墓標挿入と縮約を規定の順序で実行する。
    /// 墓標の重複は冪等成功（同時恒久削除の敗者は「縮約が走ったことの確認」に
    /// 降格するだけで、利用者にはエラーにならない）
    async fn tombstone_and_redact(&self, guid: Uuid) -> AppResult<Option<RedactionSummary>> {
        let inserted = self.gdpr_repo.insert_if_absent(guid).await?;
        if !inserted {
            info!(%guid, "Tombstone already present; ensuring redaction has completed");
        }
        let summary = self.redaction.redact(guid).await?;
        Ok(Some(summary))
    }
}
