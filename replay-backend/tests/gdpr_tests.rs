// tests/gdpr_tests.rs

mod common;

use common::db::TestDatabase;
use common::test_data;
use common::StubResolver;
use replay_backend::domain::player_model::REDACTED_SENTINEL;
use replay_backend::domain::{account_model, gdpr_request_model, player_model};
use replay_backend::error::AppError;
use replay_backend::service::account_service::AccountService;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use std::sync::Arc;
use uuid::Uuid;

fn service_for(db: &TestDatabase, resolver: Arc<StubResolver>) -> AccountService {
    AccountService::new(db.connection.clone(), resolver)
}

/// 恒久削除のエンドツーエンド: 墓標・縮約・行削除・再ログイン拒否
#[tokio::test]
async fn test_permanent_delete_tombstones_redacts_and_removes_account() {
    let db = TestDatabase::new().await;
    let u1 = Uuid::new_v4();
    let resolver = Arc::new(StubResolver::new());
    resolver.set(u1, "Alice");
    let service = service_for(&db, resolver);

    service.on_login(u1).await.unwrap();
    let r1 = test_data::seed_replay(&db.connection, "leviathan", "Saltern").await;
    let player = test_data::seed_player(&db.connection, r1.id, u1, "Alice Vimes", "AliceOoc").await;

    let outcome = service.delete_own(u1, true).await.unwrap();
    assert!(!outcome.is_degraded());
    let summary = outcome.redaction.unwrap();
    assert_eq!(summary.scanned, 1);
    assert_eq!(summary.redacted, 1);

    // 墓標が存在する
    let tombstone = gdpr_request_model::Entity::find_by_id(u1)
        .one(&db.connection)
        .await
        .unwrap();
    assert!(tombstone.is_some());

    // 参加レコードの個人フィールドはセンチネルで上書きされている
    let redacted = player_model::Entity::find_by_id(player.id)
        .one(&db.connection)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(redacted.player_guid, Uuid::nil());
    assert_eq!(redacted.player_ic_name, REDACTED_SENTINEL);
    assert_eq!(redacted.player_ooc_name, REDACTED_SENTINEL);
    assert!(redacted.redacted);

    // アカウント行は消えている
    let account = account_model::Entity::find()
        .filter(account_model::Column::Guid.eq(u1))
        .one(&db.connection)
        .await
        .unwrap();
    assert!(account.is_none());

    // 再ログインは拒否され、アカウントは作られない
    let err = service.on_login(u1).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    let count = account_model::Entity::find()
        .filter(account_model::Column::Guid.eq(u1))
        .count(&db.connection)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_permanent_delete_is_idempotent() {
    let db = TestDatabase::new().await;
    let guid = Uuid::new_v4();
    let resolver = Arc::new(StubResolver::new());
    resolver.set(guid, "Alice");
    let service = service_for(&db, resolver);

    service.on_login(guid).await.unwrap();
    service.delete_own(guid, true).await.unwrap();

    // 2回目は利用者に見えるエラーにならず、縮約確認に降格する
    let second = service.delete_own(guid, true).await.unwrap();
    assert!(second.redaction.is_some());
    assert_eq!(second.redaction.unwrap().redacted, 0);

    // 墓標はちょうど1行
    let count = gdpr_request_model::Entity::find()
        .filter(gdpr_request_model::Column::Guid.eq(guid))
        .count(&db.connection)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

/// 通常削除は墓標も縮約も発生させない
#[tokio::test]
async fn test_ordinary_delete_never_touches_players_or_ledger() {
    let db = TestDatabase::new().await;
    let guid = Uuid::new_v4();
    let resolver = Arc::new(StubResolver::new());
    resolver.set(guid, "Alice");
    let service = service_for(&db, resolver);

    service.on_login(guid).await.unwrap();
    let replay = test_data::seed_replay(&db.connection, "leviathan", "Saltern").await;
    let player =
        test_data::seed_player(&db.connection, replay.id, guid, "Alice Vimes", "AliceOoc").await;

    let outcome = service.delete_own(guid, false).await.unwrap();
    assert!(outcome.redaction.is_none());

    let tombstones = gdpr_request_model::Entity::find()
        .count(&db.connection)
        .await
        .unwrap();
    assert_eq!(tombstones, 0);

    let untouched = player_model::Entity::find_by_id(player.id)
        .one(&db.connection)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched.player_guid, guid);
    assert_eq!(untouched.player_ic_name, "Alice Vimes");
    assert!(!untouched.redacted);
}

#[tokio::test]
async fn test_admin_delete_requires_admin_flag() {
    let db = TestDatabase::new().await;
    let requester = Uuid::new_v4();
    let target = Uuid::new_v4();
    let resolver = Arc::new(StubResolver::new());
    resolver.set(requester, "Mallory");
    resolver.set(target, "Alice");
    let service = service_for(&db, resolver);

    service.on_login(requester).await.unwrap();
    service.on_login(target).await.unwrap();

    // 管理者フラグなし
    let err = service
        .admin_delete(requester, target, true)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // アカウントの無い要求者も拒否
    let err = service
        .admin_delete(Uuid::new_v4(), target, true)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

/// モデレーション削除はアカウント行だけを消す
#[tokio::test]
async fn test_admin_delete_non_gdpr_leaves_player_data() {
    let db = TestDatabase::new().await;
    let admin = Uuid::new_v4();
    let target = Uuid::new_v4();
    let resolver = Arc::new(StubResolver::new());
    resolver.set(admin, "AdminUser");
    resolver.set(target, "Alice");
    let service = service_for(&db, resolver);

    service.on_login(admin).await.unwrap();
    test_data::make_admin(&db.connection, admin).await;
    service.on_login(target).await.unwrap();

    let replay = test_data::seed_replay(&db.connection, "lizard", "Bagel").await;
    let player =
        test_data::seed_player(&db.connection, replay.id, target, "Alice Vimes", "AliceOoc").await;

    let outcome = service.admin_delete(admin, target, false).await.unwrap();
    assert!(outcome.redaction.is_none());

    let account = account_model::Entity::find()
        .filter(account_model::Column::Guid.eq(target))
        .one(&db.connection)
        .await
        .unwrap();
    assert!(account.is_none());

    let untouched = player_model::Entity::find_by_id(player.id)
        .one(&db.connection)
        .await
        .unwrap()
        .unwrap();
    assert!(!untouched.redacted);
    assert_eq!(untouched.player_guid, target);

    // 対象が既に消えていても成功する
    service.admin_delete(admin, target, false).await.unwrap();
}

/// 一度もログインしていないGUIDを先回りで墓標化できる
#[tokio::test]
async fn test_admin_can_preemptively_tombstone_unknown_guid() {
    let db = TestDatabase::new().await;
    let admin = Uuid::new_v4();
    let target = Uuid::new_v4();
    let resolver = Arc::new(StubResolver::new());
    resolver.set(admin, "AdminUser");
    resolver.set(target, "Ghost");
    let service = service_for(&db, resolver);

    service.on_login(admin).await.unwrap();
    test_data::make_admin(&db.connection, admin).await;

    let replay = test_data::seed_replay(&db.connection, "marathon", "Core").await;
    let player =
        test_data::seed_player(&db.connection, replay.id, target, "Ghost Crew", "GhostOoc").await;

    let outcome = service.admin_delete(admin, target, true).await.unwrap();
    let summary = outcome.redaction.unwrap();
    assert_eq!(summary.redacted, 1);

    let tombstone = gdpr_request_model::Entity::find_by_id(target)
        .one(&db.connection)
        .await
        .unwrap();
    assert!(tombstone.is_some());

    let redacted = player_model::Entity::find_by_id(player.id)
        .one(&db.connection)
        .await
        .unwrap()
        .unwrap();
    assert!(redacted.redacted);

    // そのGUIDでのログインは以後拒否される
    let err = service.on_login(target).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}
