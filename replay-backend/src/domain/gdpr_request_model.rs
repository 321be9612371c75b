// src/domain/gdpr_request_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

/// 恒久削除の墓標。GUIDごとに高々1行で、作成後は更新も削除もされない。
/// この行が存在する限り、同じGUIDのアカウントは二度と作成できない。
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gdpr_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub guid: Uuid,

    pub requested_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            requested_at: Set(Utc::now()),
            ..ActiveModelTrait::default()
        }
    }
}
