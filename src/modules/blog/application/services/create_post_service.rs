use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::blog::application::domain::entities::{Post, PostDraft};
use crate::blog::application::ports::{
    incoming::use_cases::{CreatePostError, CreatePostUseCase},
    outgoing::{CategoryRepository, PostQuery, PostRepository, PostRepositoryError},
};

pub struct CreatePostService<R, Q, C>
where
    R: PostRepository,
    Q: PostQuery,
    C: CategoryRepository,
{
    repository: R,
    query: Q,
    categories: C,
}

impl<R, Q, C> CreatePostService<R, Q, C>
where
    R: PostRepository,
    Q: PostQuery,
    C: CategoryRepository,
{
    pub fn new(repository: R, query: Q, categories: C) -> Self {
        Self {
            repository,
            query,
            categories,
        }
    }
}

#[async_trait]
impl<R, Q, C> CreatePostUseCase for CreatePostService<R, Q, C>
where
    R: PostRepository + Send + Sync,
    Q: PostQuery + Send + Sync,
    C: CategoryRepository + Send + Sync,
{
    async fn execute(&self, author_id: Uuid, draft: PostDraft) -> Result<Post, CreatePostError> {
        let post = draft.normalize(Utc::now())?;

        self.categories
            .find_by_id(post.category_id)
            .await
            .map_err(|e| CreatePostError::RepositoryError(e.to_string()))?
            .ok_or(CreatePostError::CategoryNotFound)?;

        let taken = self
            .query
            .slug_taken(&post.slug, post.publish.date_naive(), None)
            .await
            .map_err(|e| CreatePostError::RepositoryError(e.to_string()))?;
        if taken {
            return Err(CreatePostError::SlugTaken);
        }

        let created = self
            .repository
            .create_post(author_id, post)
            .await
            .map_err(|e| match e {
                PostRepositoryError::SlugTaken => CreatePostError::SlugTaken,
                PostRepositoryError::CategoryNotFound => CreatePostError::CategoryNotFound,
                other => CreatePostError::RepositoryError(other.to_string()),
            })?;

        info!(post_id = %created.id, author_id = %author_id, slug = %created.slug, "Post created");
        Ok(created)
    }
}
