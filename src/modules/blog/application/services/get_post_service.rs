use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::blog::application::domain::reaction::PostTarget;
use crate::blog::application::ports::{
    incoming::use_cases::{GetPostError, GetPostUseCase, PostDetail},
    outgoing::{CommentRepository, InteractionLedger, InteractionLedgerError, PostQuery},
};

pub struct GetPostService<Q, C, L>
where
    Q: PostQuery,
    C: CommentRepository,
    L: InteractionLedger<PostTarget>,
{
    posts: Q,
    comments: C,
    ledger: L,
}

impl<Q, C, L> GetPostService<Q, C, L>
where
    Q: PostQuery,
    C: CommentRepository,
    L: InteractionLedger<PostTarget>,
{
    pub fn new(posts: Q, comments: C, ledger: L) -> Self {
        Self {
            posts,
            comments,
            ledger,
        }
    }
}

#[async_trait]
impl<Q, C, L> GetPostUseCase for GetPostService<Q, C, L>
where
    Q: PostQuery + Send + Sync,
    C: CommentRepository + Send + Sync,
    L: InteractionLedger<PostTarget> + Send + Sync,
{
    async fn execute(
        &self,
        publish_date: NaiveDate,
        slug: &str,
        viewer: Option<Uuid>,
    ) -> Result<PostDetail, GetPostError> {
        let post = self
            .posts
            .find_published(publish_date, slug)
            .await
            .map_err(|e| GetPostError::QueryFailed(e.to_string()))?
            .ok_or(GetPostError::NotFound)?;

        let comments = self
            .comments
            .list_active(post.post.id)
            .await
            .map_err(|e| GetPostError::QueryFailed(e.to_string()))?;

        let reactions = self
            .ledger
            .summary(post.post.id, viewer)
            .await
            .map_err(|e| match e {
                InteractionLedgerError::TargetNotFound => GetPostError::NotFound,
                other => GetPostError::QueryFailed(other.to_string()),
            })?;

        Ok(PostDetail {
            post,
            comments,
            reactions,
        })
    }
}
