use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::blog::application::domain::entities::{Post, PostDraft};
use crate::blog::application::ports::{
    incoming::use_cases::{UpdatePostError, UpdatePostUseCase},
    outgoing::{CategoryRepository, PostQuery, PostRepository, PostRepositoryError},
};

pub struct UpdatePostService<R, Q, C>
where
    R: PostRepository,
    Q: PostQuery,
    C: CategoryRepository,
{
    repository: R,
    query: Q,
    categories: C,
}

impl<R, Q, C> UpdatePostService<R, Q, C>
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
impl<R, Q, C> UpdatePostUseCase for UpdatePostService<R, Q, C>
where
    R: PostRepository + Send + Sync,
    Q: PostQuery + Send + Sync,
    C: CategoryRepository + Send + Sync,
{
    async fn execute(
        &self,
        actor: Uuid,
        post_id: Uuid,
        draft: PostDraft,
    ) -> Result<Post, UpdatePostError> {
        let existing = self
            .query
            .find_by_id(post_id)
            .await
            .map_err(|e| UpdatePostError::RepositoryError(e.to_string()))?
            .ok_or(UpdatePostError::NotFound)?;

        if existing.author_id != actor {
            warn!(actor = %actor, post_id = %post_id, "Post edit by non-author");
            return Err(UpdatePostError::PermissionDenied);
        }

        // An omitted publish time keeps the original one.
        let post = draft.normalize(existing.publish)?;

        self.categories
            .find_by_id(post.category_id)
            .await
            .map_err(|e| UpdatePostError::RepositoryError(e.to_string()))?
            .ok_or(UpdatePostError::CategoryNotFound)?;

        let taken = self
            .query
            .slug_taken(&post.slug, post.publish.date_naive(), Some(post_id))
            .await
            .map_err(|e| UpdatePostError::RepositoryError(e.to_string()))?;
        if taken {
            return Err(UpdatePostError::SlugTaken);
        }

        let updated = self
            .repository
            .update_post(post_id, post)
            .await
            .map_err(|e| match e {
                PostRepositoryError::NotFound => UpdatePostError::NotFound,
                PostRepositoryError::SlugTaken => UpdatePostError::SlugTaken,
                PostRepositoryError::CategoryNotFound => UpdatePostError::CategoryNotFound,
                other => UpdatePostError::RepositoryError(other.to_string()),
            })?;

        info!(post_id = %post_id, slug = %updated.slug, "Post updated");
        Ok(updated)
    }
}
