// src/domain/history_entry_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

// このサブシステムが書き込む操作ラベル
pub const ACTION_CREATED: &str = "created";
pub const ACTION_RENAMED: &str = "renamed";
pub const ACTION_SETTINGS_UPDATED: &str = "settings-updated";
pub const ACTION_FAVORITE_ADDED: &str = "favorite-added";
pub const ACTION_FAVORITE_REMOVED: &str = "favorite-removed";

/// 追記専用の監査レコード。書き込み後は不変で、所有アカウントの削除でのみ消える
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "history_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub account_id: Uuid,

    pub action: String,

    pub details: String,

    pub time: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::account_model::Entity",
        from = "Column::AccountId",
        to = "crate::domain::account_model::Column::Id"
    )]
    Account,
}

impl Related<crate::domain::account_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            time: Set(Utc::now()),
            ..ActiveModelTrait::default()
        }
    }
}
