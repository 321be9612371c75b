// src/domain/account_settings_model.rs

use sea_orm::entity::prelude::*;
use sea_orm::{FromJsonQueryResult, Set};
use serde::{Deserialize, Serialize};

/// 縮約表示を免除するフレンドGUIDの集合（JSONカラム）
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct GuidList(pub Vec<Uuid>);

/// アカウントと1:1で所有される設定行。アカウント削除で連動して消える
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub account_id: Uuid,

    pub redact_information: bool,

    pub friends: GuidList,
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
            redact_information: Set(false),
            friends: Set(GuidList::default()),
            ..ActiveModelTrait::default()
        }
    }
}
