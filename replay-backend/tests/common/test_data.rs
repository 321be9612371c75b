// tests/common/test_data.rs

use replay_backend::domain::{account_model, player_model, replay_model};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

pub async fn seed_replay(
    db: &DatabaseConnection,
    server_id: &str,
    map: &str,
) -> replay_model::Model {
    replay_model::ActiveModel {
        link: Set(Some(format!(
            "https://replays.example.com/{}-round_1.zip",
            server_id
        ))),
        map: Set(Some(map.to_string())),
        gamemode: Set(Some("Traitor".to_string())),
        server_id: Set(server_id.to_string()),
        server_name: Set(Some("Test Server".to_string())),
        duration: Set(Some("01:30:00".to_string())),
        end_tick: Set(120_000),
        file_count: Set(1),
        size: Set(1024),
        uncompressed_size: Set(4096),
        round_end_text: Set(Some("Round over!".to_string())),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert replay")
}

pub async fn seed_player(
    db: &DatabaseConnection,
    replay_id: i32,
    guid: Uuid,
    ic_name: &str,
    ooc_name: &str,
) -> player_model::Model {
    player_model::ActiveModel {
        replay_id: Set(replay_id),
        player_guid: Set(guid),
        player_ic_name: Set(ic_name.to_string()),
        player_ooc_name: Set(ooc_name.to_string()),
        antag: Set(false),
        job_prototypes: Set(player_model::PrototypeList(vec!["Captain".to_string()])),
        antag_prototypes: Set(player_model::PrototypeList::default()),
        redacted: Set(false),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert player")
}

/// 既存アカウントに管理者フラグを立てる（運用側のDB操作に相当）
pub async fn make_admin(db: &DatabaseConnection, guid: Uuid) {
    let account = account_model::Entity::find()
        .filter(account_model::Column::Guid.eq(guid))
        .one(db)
        .await
        .expect("query account")
        .expect("account exists");

    let mut active: account_model::ActiveModel = account.into();
    active.is_admin = Set(true);
    active.update(db).await.expect("set admin flag");
}
