// src/repository/gdpr_request_repository.rs

use crate::domain::gdpr_request_model::{self, Entity as GdprRequestEntity};
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, DbConn, DbErr, EntityTrait, PaginatorTrait, Set};
use uuid::Uuid;

#[derive(Debug)]
pub struct GdprRequestRepository {
    db: DbConn,
}

impl GdprRequestRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// 墓標が存在するか
    pub async fn exists(&self, guid: Uuid) -> Result<bool, DbErr> {
        let count = GdprRequestEntity::find_by_id(guid).count(&self.db).await?;
        Ok(count > 0)
    }

    /// 墓標を挿入する。主キー衝突は「既に墓標あり」として Ok(false) に畳む。
    /// 同一GUIDへの同時恒久削除はこの一意キーで直列化される
    pub async fn insert_if_absent(&self, guid: Uuid) -> Result<bool, DbErr> {
        let request = gdpr_request_model::ActiveModel {
            guid: Set(guid),
            ..gdpr_request_model::ActiveModel::new()
        };

        match request.insert(&self.db).await {
            Ok(_) => Ok(true),
            Err(err) => {
                if self.exists(guid).await? {
                    Ok(false)
                } else {
                    Err(err)
                }
            }
        }
    }
}
