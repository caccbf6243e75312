pub use sea_orm_migration::prelude::*;

mod m20250304_105428_create_users_table;
mod m20261001_000001_create_account_tokens;
mod m20261001_000002_create_profiles;
mod m20261001_000003_create_blog_tables;
mod m20261001_000004_create_reaction_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250304_105428_create_users_table::Migration),
            Box::new(m20261001_000001_create_account_tokens::Migration),
            Box::new(m20261001_000002_create_profiles::Migration),
            Box::new(m20261001_000003_create_blog_tables::Migration),
            Box::new(m20261001_000004_create_reaction_tables::Migration),
        ]
    }
}
