use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::blog::application::ports::{
    incoming::use_cases::{DeletePostError, DeletePostUseCase},
    outgoing::{PostQuery, PostRepository, PostRepositoryError},
};

pub struct DeletePostService<R, Q>
where
    R: PostRepository,
    Q: PostQuery,
{
    repository: R,
    query: Q,
}

impl<R, Q> DeletePostService<R, Q>
where
    R: PostRepository,
    Q: PostQuery,
{
    pub fn new(repository: R, query: Q) -> Self {
        Self { repository, query }
    }
}

#[async_trait]
impl<R, Q> DeletePostUseCase for DeletePostService<R, Q>
where
    R: PostRepository + Send + Sync,
    Q: PostQuery + Send + Sync,
{
    async fn execute(&self, actor: Uuid, post_id: Uuid) -> Result<(), DeletePostError> {
        let post = self
            .query
            .find_by_id(post_id)
            .await
            .map_err(|e| DeletePostError::RepositoryError(e.to_string()))?
            .ok_or(DeletePostError::NotFound)?;

        if post.author_id != actor {
            warn!(actor = %actor, post_id = %post_id, "Post delete by non-author");
            return Err(DeletePostError::PermissionDenied);
        }

        self.repository
            .delete_post(post_id)
            .await
            .map_err(|e| match e {
                PostRepositoryError::NotFound => DeletePostError::NotFound,
                other => DeletePostError::RepositoryError(other.to_string()),
            })?;

        info!(post_id = %post_id, "Post deleted");
        Ok(())
    }
}
