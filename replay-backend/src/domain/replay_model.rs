// src/domain/replay_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 終了したラウンドの不変レコード。このサブシステムからは一切削除されない
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "replays")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(nullable)]
    pub link: Option<String>,

    #[sea_orm(nullable)]
    pub map: Option<String>,

    #[sea_orm(nullable)]
    pub gamemode: Option<String>,

    pub server_id: String,

    #[sea_orm(nullable)]
    pub server_name: Option<String>,

    #[sea_orm(nullable)]
    pub duration: Option<String>,

    #[sea_orm(nullable)]
    pub date: Option<DateTime<Utc>>,

    #[sea_orm(nullable)]
    pub round_id: Option<i32>,

    pub end_tick: i32,

    #[sea_orm(nullable)]
    pub end_time: Option<String>,

    pub file_count: i32,

    pub size: i32,

    pub uncompressed_size: i32,

    #[sea_orm(nullable)]
    pub round_end_text: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::domain::player_model::Entity")]
    Players,
}

impl Related<crate::domain::player_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Players.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
