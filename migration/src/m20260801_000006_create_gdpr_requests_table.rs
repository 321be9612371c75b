use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 恒久削除の墓標。GUIDを主キーにして再作成防止の一意性をそのまま担保する
        manager
            .create_table(
                Table::create()
                    .table(GdprRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GdprRequests::Guid)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GdprRequests::RequestedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GdprRequests::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(DeriveIden)]
enum GdprRequests {
    Table,
    Guid,
    RequestedAt,
}
