use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HistoryEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HistoryEntries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(HistoryEntries::AccountId).uuid().not_null())
                    .col(
                        ColumnDef::new(HistoryEntries::Action)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(HistoryEntries::Details).text().not_null())
                    .col(
                        ColumnDef::new(HistoryEntries::Time)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_history_entries_account_id")
                            .from(HistoryEntries::Table, HistoryEntries::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // アカウント別の履歴取得用インデックス
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(HistoryEntries::Table)
                    .name("idx_history_entries_account_id")
                    .col(HistoryEntries::AccountId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HistoryEntries::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(DeriveIden)]
enum HistoryEntries {
    Table,
    Id,
    AccountId,
    Action,
    Details,
    Time,
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
}
