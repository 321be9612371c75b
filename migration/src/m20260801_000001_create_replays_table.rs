use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Replays::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Replays::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Replays::Link).text().null())
                    .col(ColumnDef::new(Replays::Map).string_len(255).null())
                    .col(ColumnDef::new(Replays::Gamemode).string_len(255).null())
                    .col(ColumnDef::new(Replays::ServerId).string_len(255).not_null())
                    .col(ColumnDef::new(Replays::ServerName).string_len(255).null())
                    .col(ColumnDef::new(Replays::Duration).string_len(64).null())
                    .col(ColumnDef::new(Replays::Date).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Replays::RoundId).integer().null())
                    .col(
                        ColumnDef::new(Replays::EndTick)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Replays::EndTime).string_len(64).null())
                    .col(
                        ColumnDef::new(Replays::FileCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Replays::Size)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Replays::UncompressedSize)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Replays::RoundEndText).text().null())
                    .to_owned(),
            )
            .await?;

        // 一覧・絞り込みで使う列のインデックス
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Replays::Table)
                    .name("idx_replays_map")
                    .col(Replays::Map)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Replays::Table)
                    .name("idx_replays_gamemode")
                    .col(Replays::Gamemode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Replays::Table)
                    .name("idx_replays_server_id")
                    .col(Replays::ServerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Replays::Table)
                    .name("idx_replays_server_name")
                    .col(Replays::ServerName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Replays::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(DeriveIden)]
enum Replays {
    Table,
    Id,
    Link,
    Map,
    Gamemode,
    ServerId,
    ServerName,
    Duration,
    Date,
    RoundId,
    EndTick,
    EndTime,
    FileCount,
    Size,
    UncompressedSize,
    RoundEndText,
}
