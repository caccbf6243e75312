pub mod category_repository_postgres;
pub mod comment_repository_postgres;
pub mod interaction_ledger_postgres;
pub mod post_query_postgres;
pub mod post_repository_postgres;
pub mod sea_orm_entity;

pub use category_repository_postgres::CategoryRepositoryPostgres;
pub use comment_repository_postgres::CommentRepositoryPostgres;
pub use interaction_ledger_postgres::InteractionLedgerPostgres;
pub use post_query_postgres::PostQueryPostgres;
pub use post_repository_postgres::PostRepositoryPostgres;
