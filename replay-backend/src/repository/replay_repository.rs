// src/repository/replay_repository.rs

use crate::domain::player_model::{self, Entity as PlayerEntity};
use crate::domain::replay_model::{self, Entity as ReplayEntity};
use sea_orm::{
    ColumnTrait, DbConn, DbErr, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

#[derive(Debug)]
pub struct ReplayRepository {
    db: DbConn,
}

impl ReplayRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<replay_model::Model>, DbErr> {
        ReplayEntity::find_by_id(id).one(&self.db).await
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        let count = ReplayEntity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    /// リプレイと参加レコードをまとめて取得
    pub async fn find_with_players(
        &self,
        id: i32,
    ) -> Result<Option<(replay_model::Model, Vec<player_model::Model>)>, DbErr> {
        let mut pairs = ReplayEntity::find_by_id(id)
            .find_with_related(PlayerEntity)
            .all(&self.db)
            .await?;
        Ok(pairs.pop())
    }

    /// 指定GUIDが参加しているリプレイIDの一貫スナップショットを取る。
    /// エクスポートと縮約の対象集合はこの1クエリで確定する
    pub async fn find_ids_by_participant(&self, guid: Uuid) -> Result<Vec<i32>, DbErr> {
        PlayerEntity::find()
            .select_only()
            .column(player_model::Column::ReplayId)
            .filter(player_model::Column::PlayerGuid.eq(guid))
            .distinct()
            .order_by(player_model::Column::ReplayId, Order::Asc)
            .into_tuple::<i32>()
            .all(&self.db)
            .await
    }

    /// 新しい順のページングされた一覧
    pub async fn find_most_recent(
        &self,
        page: u64,
        page_size: u64,
    ) -> Result<(Vec<replay_model::Model>, u64), DbErr> {
        let page_size = std::cmp::min(page_size, 100); // 最大100件
        let page = std::cmp::max(page, 1);
        let offset = (page - 1) * page_size;

        let replays = ReplayEntity::find()
            .order_by(replay_model::Column::Date, Order::Desc)
            .limit(page_size)
            .offset(offset)
            .all(&self.db)
            .await?;

        let total_count = ReplayEntity::find().count(&self.db).await?;

        Ok((replays, total_count))
    }
}
