use async_trait::async_trait;
use uuid::Uuid;

use crate::blog::application::domain::entities::{Actor, Comment, ContentValidationError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AddCommentError {
    /// Missing or not published.
    #[error("Post not found")]
    PostNotFound,

    #[error("{0}")]
    Validation(#[from] ContentValidationError),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModerateCommentError {
    #[error("Comment not found")]
    NotFound,

    #[error("You don't have permission to change this comment")]
    PermissionDenied,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait AddCommentUseCase: Send + Sync {
    async fn execute(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        body: String,
    ) -> Result<Comment, AddCommentError>;
}

#[async_trait]
pub trait DeleteCommentUseCase: Send + Sync {
    /// The comment author or a superuser.
    async fn execute(&self, actor: Actor, comment_id: Uuid) -> Result<(), ModerateCommentError>;
}

#[async_trait]
pub trait ToggleCommentActiveUseCase: Send + Sync {
    /// Superusers only. Returns the comment with its new flag.
    async fn execute(&self, actor: Actor, comment_id: Uuid)
        -> Result<Comment, ModerateCommentError>;
}
