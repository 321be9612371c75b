use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Players::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Players::ReplayId).integer().not_null())
                    .col(ColumnDef::new(Players::PlayerGuid).uuid().not_null())
                    .col(
                        ColumnDef::new(Players::PlayerIcName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Players::PlayerOocName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Players::Antag)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Players::JobPrototypes).json().not_null())
                    .col(ColumnDef::new(Players::AntagPrototypes).json().not_null())
                    .col(
                        ColumnDef::new(Players::Redacted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_players_replay_id")
                            .from(Players::Table, Players::ReplayId)
                            .to(Replays::Table, Replays::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 参加者GUIDでの検索（削除カスケードとエクスポートの主経路）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Players::Table)
                    .name("idx_players_player_guid")
                    .col(Players::PlayerGuid)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Players::Table)
                    .name("idx_players_player_ic_name")
                    .col(Players::PlayerIcName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Players::Table)
                    .name("idx_players_player_ooc_name")
                    .col(Players::PlayerOocName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Players::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(DeriveIden)]
enum Players {
    Table,
    Id,
    ReplayId,
    PlayerGuid,
    PlayerIcName,
    PlayerOocName,
    Antag,
    JobPrototypes,
    AntagPrototypes,
    Redacted,
}

#[derive(DeriveIden)]
enum Replays {
    Table,
    Id,
}
