use async_trait::async_trait;
use uuid::Uuid;

use crate::blog::application::domain::entities::{NormalizedPost, Post};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PostRepositoryError {
    #[error("Slug already used on this publish date")]
    SlugTaken,

    #[error("Category not found")]
    CategoryNotFound,

    #[error("Post not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create_post(
        &self,
        author_id: Uuid,
        post: NormalizedPost,
    ) -> Result<Post, PostRepositoryError>;

    async fn update_post(
        &self,
        post_id: Uuid,
        post: NormalizedPost,
    ) -> Result<Post, PostRepositoryError>;

    /// Comments and reactions go with it.
    async fn delete_post(&self, post_id: Uuid) -> Result<(), PostRepositoryError>;
}
