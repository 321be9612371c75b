// src/repository/history_repository.rs

use crate::domain::history_entry_model::{self, Entity as HistoryEntity};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, Order,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

#[derive(Debug)]
pub struct HistoryRepository {
    db: DbConn,
}

impl HistoryRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// 履歴を追記する。既存エントリは決して書き換えない
    pub async fn append(
        &self,
        account_id: Uuid,
        action: &str,
        details: &str,
    ) -> Result<history_entry_model::Model, DbErr> {
        history_entry_model::ActiveModel {
            account_id: Set(account_id),
            action: Set(action.to_string()),
            details: Set(details.to_string()),
            ..history_entry_model::ActiveModel::new()
        }
        .insert(&self.db)
        .await
    }

    /// アカウントの履歴を古い順で取得
    pub async fn find_by_account(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<history_entry_model::Model>, DbErr> {
        HistoryEntity::find()
            .filter(history_entry_model::Column::AccountId.eq(account_id))
            .order_by(history_entry_model::Column::Time, Order::Asc)
            .all(&self.db)
            .await
    }
}
