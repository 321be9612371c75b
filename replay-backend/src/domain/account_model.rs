// src/domain/account_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{FromJsonQueryResult, Set};
use serde::{Deserialize, Serialize};

/// お気に入りリプレイのID集合（JSONカラム）
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ReplayIdList(pub Vec<i32>);

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// 外部認証が発行する安定識別子。作成後は不変
    #[sea_orm(unique)]
    pub guid: Uuid,

    pub username: String,

    pub is_admin: bool,

    pub favorite_replays: ReplayIdList,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "crate::domain::account_settings_model::Entity")]
    Settings,

    #[sea_orm(has_many = "crate::domain::history_entry_model::Entity")]
    History,
}

impl Related<crate::domain::account_settings_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Settings.def()
    }
}

impl Related<crate::domain::history_entry_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::History.def()
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            is_admin: Set(false),
            favorite_replays: Set(ReplayIdList::default()),
            created_at: Set(Utc::now()),
            ..ActiveModelTrait::default()
        }
    }
}

impl Model {
    pub fn is_favorite(&self, replay_id: i32) -> bool {
        self.favorite_replays.0.contains(&replay_id)
    }
}
