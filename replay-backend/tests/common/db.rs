//! Async TestDatabase helper for SeaORM over in-memory SQLite.

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub struct TestDatabase {
    pub connection: DatabaseConnection,
}

impl TestDatabase {
    pub async fn new() -> Self {
        // インメモリSQLiteは接続ごとに別DBになるので、プールを1接続に固定する
        let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
        opt.max_connections(1).sqlx_logging(false);

        let connection = Database::connect(opt).await.expect("connect to sqlite");

        // マイグレーションを適用
        Migrator::up(&connection, None)
            .await
            .expect("run migrations");

        Self { connection }
    }
}
