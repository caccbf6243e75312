use async_trait::async_trait;
use uuid::Uuid;

use crate::blog::application::domain::entities::{ContentValidationError, Post, PostDraft};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CreatePostError {
    #[error("{0}")]
    Validation(#[from] ContentValidationError),

    #[error("Category does not exist")]
    CategoryNotFound,

    #[error("A post with this slug is already published on that date")]
    SlugTaken,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UpdatePostError {
    #[error("Post not found")]
    NotFound,

    #[error("Only the author can edit this post")]
    PermissionDenied,

    #[error("{0}")]
    Validation(#[from] ContentValidationError),

    #[error("Category does not exist")]
    CategoryNotFound,

    #[error("A post with this slug is already published on that date")]
    SlugTaken,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeletePostError {
    #[error("Post not found")]
    NotFound,

    #[error("Only the author can delete this post")]
    PermissionDenied,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait CreatePostUseCase: Send + Sync {
    async fn execute(&self, author_id: Uuid, draft: PostDraft) -> Result<Post, CreatePostError>;
}

#[async_trait]
pub trait UpdatePostUseCase: Send + Sync {
    async fn execute(
        &self,
        actor: Uuid,
        post_id: Uuid,
        draft: PostDraft,
    ) -> Result<Post, UpdatePostError>;
}

#[async_trait]
pub trait DeletePostUseCase: Send + Sync {
    async fn execute(&self, actor: Uuid, post_id: Uuid) -> Result<(), DeletePostError>;
}
