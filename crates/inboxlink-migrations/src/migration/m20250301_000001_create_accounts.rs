use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accounts::Kind).string_len(50).not_null())
                    .col(ColumnDef::new(Accounts::Uid).string_len(255).not_null())
                    .col(ColumnDef::new(Accounts::Name).string_len(255).null())
                    .col(ColumnDef::new(Accounts::Token).text().null())
                    .col(ColumnDef::new(Accounts::TokenSecret).text().null())
                    .col(
                        ColumnDef::new(Accounts::TokenExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Accounts::Scope).text().null())
                    .col(
                        ColumnDef::new(Accounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Accounts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Sending looks accounts up by mailbox address
        manager
            .create_index(
                Index::create()
                    .name("idx_accounts_uid")
                    .table(Accounts::Table)
                    .col(Accounts::Uid)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Accounts {
    Table,
    Id,
    Kind,
    Uid,
    Name,
    Token,
    TokenSecret,
    TokenExpiresAt,
    Scope,
    CreatedAt,
    UpdatedAt,
}
