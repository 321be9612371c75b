// src/repository/account_repository.rs

use crate::domain::account_model::{self, Entity as AccountEntity, ReplayIdList};
use crate::domain::account_settings_model::{self, Entity as SettingsEntity, GuidList};
use crate::domain::history_entry_model::{self, ACTION_CREATED, ACTION_RENAMED};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter,
    Set, TransactionTrait,
};
use uuid::Uuid;

#[derive(Debug)]
pub struct AccountRepository {
    db: DbConn,
}

impl AccountRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// アカウントを安定識別子で検索
    pub async fn find_by_guid(&self, guid: Uuid) -> Result<Option<account_model::Model>, DbErr> {
        AccountEntity::find()
            .filter(account_model::Column::Guid.eq(guid))
            .one(&self.db)
            .await
    }

    /// 所有される設定行を取得
    pub async fn find_settings(
        &self,
        account_id: Uuid,
    ) -> Result<Option<account_settings_model::Model>, DbErr> {
        SettingsEntity::find_by_id(account_id).one(&self.db).await
    }

    /// アカウント・デフォルト設定・"created" 履歴を1トランザクションで作成する。
    /// 設定の無いアカウントが読者から観測されることはない
    pub async fn create_with_settings(
        &self,
        guid: Uuid,
        username: &str,
    ) -> Result<account_model::Model, DbErr> {
        let txn = self.db.begin().await?;

        let account = account_model::ActiveModel {
            guid: Set(guid),
            username: Set(username.to_string()),
            ..account_model::ActiveModel::new()
        }
        .insert(&txn)
        .await?;

        account_settings_model::ActiveModel {
            account_id: Set(account.id),
            ..account_settings_model::ActiveModel::new()
        }
        .insert(&txn)
        .await?;

        history_entry_model::ActiveModel {
            account_id: Set(account.id),
            action: Set(ACTION_CREATED.to_string()),
            details: Set(format!("Account created with username {}", username)),
            ..history_entry_model::ActiveModel::new()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(account)
    }

    /// 表示名を更新し、"renamed" 履歴を同一トランザクションで追記する
    pub async fn rename(
        &self,
        account: account_model::Model,
        new_username: &str,
    ) -> Result<account_model::Model, DbErr> {
        let txn = self.db.begin().await?;

        let old_username = account.username.clone();
        let account_id = account.id;

        let mut active: account_model::ActiveModel = account.into();
        active.username = Set(new_username.to_string());
        let updated = active.update(&txn).await?;

        history_entry_model::ActiveModel {
            account_id: Set(account_id),
            action: Set(ACTION_RENAMED.to_string()),
            details: Set(format!("Renamed from {} to {}", old_username, new_username)),
            ..history_entry_model::ActiveModel::new()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// 設定行を書き換え、履歴を同一トランザクションで追記する
    pub async fn update_settings(
        &self,
        account_id: Uuid,
        redact_information: bool,
        friends: Vec<Uuid>,
        history_action: &str,
        history_details: &str,
    ) -> Result<account_settings_model::Model, DbErr> {
        let txn = self.db.begin().await?;

        let settings = SettingsEntity::find_by_id(account_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("account settings missing".to_string()))?;

        let mut active: account_settings_model::ActiveModel = settings.into();
        active.redact_information = Set(redact_information);
        active.friends = Set(GuidList(friends));
        let updated = active.update(&txn).await?;

        history_entry_model::ActiveModel {
            account_id: Set(account_id),
            action: Set(history_action.to_string()),
            details: Set(history_details.to_string()),
            ..history_entry_model::ActiveModel::new()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// お気に入り集合を置き換え、履歴を同一トランザクションで追記する
    pub async fn set_favorites(
        &self,
        account: account_model::Model,
        favorites: Vec<i32>,
        history_action: &str,
        history_details: &str,
    ) -> Result<account_model::Model, DbErr> {
        let txn = self.db.begin().await?;

        let account_id = account.id;
        let mut active: account_model::ActiveModel = account.into();
        active.favorite_replays = Set(ReplayIdList(favorites));
        let updated = active.update(&txn).await?;

        history_entry_model::ActiveModel {
            account_id: Set(account_id),
            action: Set(history_action.to_string()),
            details: Set(history_details.to_string()),
            ..history_entry_model::ActiveModel::new()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// アカウント行を削除する。設定と履歴は外部キーのカスケードで消える
    pub async fn delete_by_id(&self, account_id: Uuid) -> Result<(), DbErr> {
        AccountEntity::delete_by_id(account_id)
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
