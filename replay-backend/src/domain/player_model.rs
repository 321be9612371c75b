// src/domain/player_model.rs

use sea_orm::entity::prelude::*;
use sea_orm::{FromJsonQueryResult, Set};
use serde::{Deserialize, Serialize};

/// 個人フィールドの縮約時に書き込まれる固定センチネル
pub const REDACTED_SENTINEL: &str = "Removed by GDPR request";

/// ジョブ・アンタグのプロトタイプID集合（JSONカラム）
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct PrototypeList(pub Vec<String>);

/// 1リプレイ内の参加レコード。個人フィールドは GUID と IC/OOC 名の3つで、
/// 縮約はこの3つとredactedフラグだけを書き換える
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "players")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub replay_id: i32,

    pub player_guid: Uuid,

    pub player_ic_name: String,

    pub player_ooc_name: String,

    pub antag: bool,

    pub job_prototypes: PrototypeList,

    pub antag_prototypes: PrototypeList,

    pub redacted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::replay_model::Entity",
        from = "Column::ReplayId",
        to = "crate::domain::replay_model::Column::Id"
    )]
    Replay,
}

impl Related<crate::domain::replay_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Replay.def()
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            antag: Set(false),
            job_prototypes: Set(PrototypeList::default()),
            antag_prototypes: Set(PrototypeList::default()),
            redacted: Set(false),
            ..ActiveModelTrait::default()
        }
    }
}
