use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// (table, target column, target table)
const REACTION_TABLES: [(&str, &str, &str); 4] = [
    ("post_likes", "post_id", "posts"),
    ("post_dislikes", "post_id", "posts"),
    ("comment_likes", "comment_id", "comments"),
    ("comment_dislikes", "comment_id", "comments"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (table, target, target_table) in REACTION_TABLES {
            manager
                .create_table(
                    Table::create()
                        .table(Alias::new(table))
                        .if_not_exists()
                        .col(ColumnDef::new(Alias::new(target)).uuid().not_null())
                        .col(ColumnDef::new(Reactions::UserId).uuid().not_null())
                        .col(
                            ColumnDef::new(Reactions::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        // One record per (target, user)
                        .primary_key(
                            Index::create()
                                .col(Alias::new(target))
                                .col(Reactions::UserId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name(format!("fk_{table}_{target}"))
                                .from(Alias::new(table), Alias::new(target))
                                .to(Alias::new(target_table), Reactions::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name(format!("fk_{table}_user_id"))
                                .from(Alias::new(table), Reactions::UserId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (table, _, _) in REACTION_TABLES.iter().rev() {
            manager
                .drop_table(Table::drop().table(Alias::new(*table)).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Reactions {
    Id,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
