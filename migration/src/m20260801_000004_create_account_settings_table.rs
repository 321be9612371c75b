use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccountSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccountSettings::AccountId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AccountSettings::RedactInformation)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(AccountSettings::Friends).json().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_account_settings_account_id")
                            .from(AccountSettings::Table, AccountSettings::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AccountSettings::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(DeriveIden)]
enum AccountSettings {
    Table,
    AccountId,
    RedactInformation,
    Friends,
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
}
