// tests/account_lifecycle_tests.rs

mod common;

use common::db::TestDatabase;
use common::test_data;
use common::{FailingResolver, StubResolver};
use replay_backend::domain::{account_settings_model, history_entry_model};
use replay_backend::error::AppError;
use replay_backend::service::account_service::AccountService;
use replay_backend::service::identity_service::FALLBACK_DISPLAY_NAME;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use std::sync::Arc;
use uuid::Uuid;

#[tokio::test]
async fn test_first_login_creates_account_with_settings_and_history() {
    let db = TestDatabase::new().await;
    let guid = Uuid::new_v4();
    let resolver = Arc::new(StubResolver::new());
    resolver.set(guid, "Bob");
    let service = AccountService::new(db.connection.clone(), resolver);

    let outcome = service.on_login(guid).await.unwrap();

    assert!(outcome.created);
    assert!(!outcome.resolution_degraded);
    assert_eq!(outcome.account.guid, guid);
    assert_eq!(outcome.account.username, "Bob");
    assert!(!outcome.account.is_admin);

    // 設定行が同時に作られている
    let settings = account_settings_model::Entity::find_by_id(outcome.account.id)
        .one(&db.connection)
        .await
        .unwrap();
    assert!(settings.is_some());
    assert!(!settings.unwrap().redact_information);

    // "created" 履歴が1件だけ
    let history = history_entry_model::Entity::find()
        .filter(history_entry_model::Column::AccountId.eq(outcome.account.id))
        .all(&db.connection)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action, "created");
}

#[tokio::test]
async fn test_second_login_with_changed_name_renames_and_appends_history() {
    let db = TestDatabase::new().await;
    let guid = Uuid::new_v4();
    let resolver = Arc::new(StubResolver::new());
    resolver.set(guid, "Bob");
    let service = AccountService::new(db.connection.clone(), resolver.clone());

    let first = service.on_login(guid).await.unwrap();
    let first_history = history_entry_model::Entity::find()
        .filter(history_entry_model::Column::AccountId.eq(first.account.id))
        .all(&db.connection)
        .await
        .unwrap();

    // 外部ソース側で表示名が変わった
    resolver.set(guid, "Bobby");
    let second = service.on_login(guid).await.unwrap();

    assert!(!second.created);
    assert_eq!(second.account.id, first.account.id);
    assert_eq!(second.account.username, "Bobby");

    let history = service.get_account(guid).await.unwrap().history;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].action, "created");
    assert_eq!(history[1].action, "renamed");

    // 既存の履歴エントリは書き換えられていない
    assert_eq!(history[0].id, first_history[0].id);
    assert_eq!(history[0].details, first_history[0].details);
    assert_eq!(history[0].time, first_history[0].time);
}

#[tokio::test]
async fn test_login_with_unchanged_name_appends_no_history() {
    let db = TestDatabase::new().await;
    let guid = Uuid::new_v4();
    let resolver = Arc::new(StubResolver::new());
    resolver.set(guid, "Bob");
    let service = AccountService::new(db.connection.clone(), resolver);

    service.on_login(guid).await.unwrap();
    let outcome = service.on_login(guid).await.unwrap();

    assert!(!outcome.created);
    let history = service.get_account(guid).await.unwrap().history;
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn test_failed_identity_lookup_falls_back_to_sentinel_name() {
    let db = TestDatabase::new().await;
    let guid = Uuid::new_v4();
    let service = AccountService::new(db.connection.clone(), Arc::new(FailingResolver));

    // 外部API障害でもログインは通る
    let outcome = service.on_login(guid).await.unwrap();

    assert!(outcome.created);
    assert!(outcome.resolution_degraded);
    assert_eq!(outcome.account.username, FALLBACK_DISPLAY_NAME);
}

#[tokio::test]
async fn test_ordinary_delete_then_login_creates_fresh_account() {
    let db = TestDatabase::new().await;
    let guid = Uuid::new_v4();
    let resolver = Arc::new(StubResolver::new());
    resolver.set(guid, "Alice");
    let service = AccountService::new(db.connection.clone(), resolver);

    let first = service.on_login(guid).await.unwrap();
    service.delete_own(guid, false).await.unwrap();

    // 設定と履歴もカスケードで消えている
    let settings = account_settings_model::Entity::find_by_id(first.account.id)
        .one(&db.connection)
        .await
        .unwrap();
    assert!(settings.is_none());
    let history = history_entry_model::Entity::find()
        .filter(history_entry_model::Column::AccountId.eq(first.account.id))
        .all(&db.connection)
        .await
        .unwrap();
    assert!(history.is_empty());

    // 同じGUIDで再ログインすると真新しいアカウントになる
    let second = service.on_login(guid).await.unwrap();
    assert!(second.created);
    assert_ne!(second.account.id, first.account.id);

    let fresh_history = service.get_account(guid).await.unwrap().history;
    assert_eq!(fresh_history.len(), 1);
    assert_eq!(fresh_history[0].action, "created");
}

#[tokio::test]
async fn test_delete_own_without_account_is_not_found() {
    let db = TestDatabase::new().await;
    let service = AccountService::new(db.connection.clone(), Arc::new(StubResolver::new()));

    let err = service.delete_own(Uuid::new_v4(), false).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_update_settings_changes_row_and_appends_history() {
    let db = TestDatabase::new().await;
    let guid = Uuid::new_v4();
    let resolver = Arc::new(StubResolver::new());
    resolver.set(guid, "Alice");
    let service = AccountService::new(db.connection.clone(), resolver);

    service.on_login(guid).await.unwrap();

    let friend = Uuid::new_v4();
    let settings = service
        .update_settings(guid, true, vec![friend])
        .await
        .unwrap();
    assert!(settings.redact_information);
    assert_eq!(settings.friends.0, vec![friend]);

    let history = service.get_account(guid).await.unwrap().history;
    assert_eq!(history.last().unwrap().action, "settings-updated");
}

#[tokio::test]
async fn test_toggle_favorite_adds_and_removes() {
    let db = TestDatabase::new().await;
    let guid = Uuid::new_v4();
    let resolver = Arc::new(StubResolver::new());
    resolver.set(guid, "Alice");
    let service = AccountService::new(db.connection.clone(), resolver);

    service.on_login(guid).await.unwrap();
    let replay = test_data::seed_replay(&db.connection, "leviathan", "Saltern").await;

    let added = service.toggle_favorite(guid, replay.id).await.unwrap();
    assert!(added);
    let details = service.get_account(guid).await.unwrap();
    assert_eq!(details.account.favorite_replays.0, vec![replay.id]);
    assert_eq!(details.history.last().unwrap().action, "favorite-added");

    let added_again = service.toggle_favorite(guid, replay.id).await.unwrap();
    assert!(!added_again);
    let details = service.get_account(guid).await.unwrap();
    assert!(details.account.favorite_replays.0.is_empty());
    assert_eq!(details.history.last().unwrap().action, "favorite-removed");
}

#[tokio::test]
async fn test_toggle_favorite_unknown_replay_is_not_found() {
    let db = TestDatabase::new().await;
    let guid = Uuid::new_v4();
    let resolver = Arc::new(StubResolver::new());
    resolver.set(guid, "Alice");
    let service = AccountService::new(db.connection.clone(), resolver);

    service.on_login(guid).await.unwrap();
    let err = service.toggle_favorite(guid, 9999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
