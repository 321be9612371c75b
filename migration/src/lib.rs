// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// リプレイアーカイブ関連マイグレーション
mod m20260801_000001_create_replays_table;
mod m20260801_000002_create_players_table;

// アカウント関連マイグレーション
mod m20260801_000003_create_accounts_table;
mod m20260801_000004_create_account_settings_table;
mod m20260801_000005_create_history_entries_table;

// GDPR関連マイグレーション
mod m20260801_000006_create_gdpr_requests_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. リプレイ本体と参加者（依存順）
            Box::new(m20260801_000001_create_replays_table::Migration),
            Box::new(m20260801_000002_create_players_table::Migration),
            // 2. アカウントと所有テーブル
            Box::new(m20260801_000003_create_accounts_table::Migration),
            Box::new(m20260801_000004_create_account_settings_table::Migration),
            Box::new(m20260801_000005_create_history_entries_table::Migration),
            // 3. 墓標テーブル（依存関係なし）
            Box::new(m20260801_000006_create_gdpr_requests_table::Migration),
        ]
    }
}
