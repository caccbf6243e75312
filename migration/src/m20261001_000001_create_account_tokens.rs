use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Activation and password reset tokens share one shape: at most one row per
/// user, token values unique across the table.
fn token_table<T>(table: T, fk_name: &str) -> TableCreateStatement
where
    T: IntoIden + Copy + 'static,
{
    Table::create()
        .table(table)
        .if_not_exists()
        .col(ColumnDef::new(Tokens::Id).uuid().not_null().primary_key())
        .col(ColumnDef::new(Tokens::UserId).uuid().not_null().unique_key())
        .col(
            ColumnDef::new(Tokens::Token)
                .string_len(32)
                .not_null()
                .unique_key(),
        )
        .col(
            ColumnDef::new(Tokens::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .foreign_key(
            ForeignKey::create()
                .name(fk_name)
                .from(table, Tokens::UserId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .on_update(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(token_table(
                ActivationTokens::Table,
                "fk_activation_tokens_user_id",
            ))
            .await?;

        manager
            .create_table(token_table(
                PasswordResetTokens::Table,
                "fk_password_reset_tokens_user_id",
            ))
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PasswordResetTokens::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ActivationTokens::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum ActivationTokens {
    Table,
}

#[derive(DeriveIden, Clone, Copy)]
enum PasswordResetTokens {
    Table,
}

#[derive(DeriveIden)]
enum Tokens {
    Id,
    UserId,
    Token,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
