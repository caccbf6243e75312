pub mod category_repository;
pub mod comment_repository;
pub mod interaction_ledger;
pub mod post_query;
pub mod post_repository;

pub use category_repository::{CategoryRepository, CategoryRepositoryError, CreateCategoryData};
pub use comment_repository::{CommentRepository, CommentRepositoryError};
pub use interaction_ledger::{InteractionLedger, InteractionLedgerError};
pub use post_query::{PostQuery, PostQueryError};
pub use post_repository::{PostRepository, PostRepositoryError};
