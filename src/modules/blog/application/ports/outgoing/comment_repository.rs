use async_trait::async_trait;
use uuid::Uuid;

use crate::blog::application::domain::entities::{Comment, CommentView};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommentRepositoryError {
    #[error("Comment not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Active comments only, most recently updated first.
    async fn list_active(&self, post_id: Uuid) -> Result<Vec<CommentView>, CommentRepositoryError>;

    async fn find_by_id(&self, comment_id: Uuid) -> Result<Option<Comment>, CommentRepositoryError>;

    async fn create_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        body: String,
    ) -> Result<Comment, CommentRepositoryError>;

    async fn delete_comment(&self, comment_id: Uuid) -> Result<(), CommentRepositoryError>;

    async fn set_active(
        &self,
        comment_id: Uuid,
        active: bool,
    ) -> Result<Comment, CommentRepositoryError>;
}
