// src/repository/player_repository.rs

use crate::domain::player_model::{self, Entity as PlayerEntity, REDACTED_SENTINEL};
use sea_orm::prelude::Expr;
use sea_orm::{
    ColumnTrait, DbConn, DbErr, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

#[derive(Debug)]
pub struct PlayerRepository {
    db: DbConn,
}

impl PlayerRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// リプレイの参加レコードをID順で取得
    pub async fn find_by_replay(&self, replay_id: i32) -> Result<Vec<player_model::Model>, DbErr> {
        PlayerEntity::find()
            .filter(player_model::Column::ReplayId.eq(replay_id))
            .order_by(player_model::Column::Id, Order::Asc)
            .all(&self.db)
            .await
    }

    /// 1リプレイ内の、指定GUIDの参加レコードだけを取得。
    /// エクスポートが他参加者の個人データを含まないための絞り込み
    pub async fn find_by_replay_and_guid(
        &self,
        replay_id: i32,
        guid: Uuid,
    ) -> Result<Vec<player_model::Model>, DbErr> {
        PlayerEntity::find()
            .filter(player_model::Column::ReplayId.eq(replay_id))
            .filter(player_model::Column::PlayerGuid.eq(guid))
            .order_by(player_model::Column::Id, Order::Asc)
            .all(&self.db)
            .await
    }

    /// GUIDが一致する参加レコードIDを、カーソル位置から1ページ分返す。
    /// コレクションは際限なく伸びるので、スキャンは再開可能なカーソル方式にする
    pub async fn find_matching_page(
        &self,
        guid: Uuid,
        after_id: Option<i32>,
        limit: u64,
    ) -> Result<Vec<i32>, DbErr> {
        let mut query = PlayerEntity::find()
            .select_only()
            .column(player_model::Column::Id)
            .filter(player_model::Column::PlayerGuid.eq(guid));

        if let Some(after_id) = after_id {
            query = query.filter(player_model::Column::Id.gt(after_id));
        }

        query
            .order_by(player_model::Column::Id, Order::Asc)
            .limit(limit)
            .into_tuple::<i32>()
            .all(&self.db)
            .await
    }

    /// 1レコードの個人フィールドをセンチネルで上書きする。条件付きUPDATE
    /// 1文なので行単位で原子的であり、縮約済みの行には触れない（冪等）。
    /// 戻り値は影響行数: 1 = 新規に縮約, 0 = 縮約済みだった
    pub async fn redact_one(&self, player_id: i32) -> Result<u64, DbErr> {
        let result = PlayerEntity::update_many()
            .col_expr(player_model::Column::PlayerGuid, Expr::value(Uuid::nil()))
            .col_expr(
                player_model::Column::PlayerIcName,
                Expr::value(REDACTED_SENTINEL),
            )
            .col_expr(
                player_model::Column::PlayerOocName,
                Expr::value(REDACTED_SENTINEL),
            )
            .col_expr(player_model::Column::Redacted, Expr::value(true))
            .filter(player_model::Column::Id.eq(player_id))
            .filter(player_model::Column::Redacted.eq(false))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
