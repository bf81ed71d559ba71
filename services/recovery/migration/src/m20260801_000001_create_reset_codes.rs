use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ResetCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ResetCodes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ResetCodes::Identifier).string().not_null())
                    .col(ColumnDef::new(ResetCodes::Code).string().not_null())
                    .col(
                        ColumnDef::new(ResetCodes::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ResetCodes::ConsumedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(ResetCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookups are always by (identifier, code); no FK — accounts live in
        // the accounts service.
        manager
            .create_index(
                Index::create()
                    .table(ResetCodes::Table)
                    .col(ResetCodes::Identifier)
                    .col(ResetCodes::Code)
                    .name("idx_reset_codes_identifier_code")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ResetCodes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ResetCodes {
    Table,
    Id,
    Identifier,
    Code,
    ExpiresAt,
    ConsumedAt,
    CreatedAt,
}
