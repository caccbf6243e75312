use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::blog::application::domain::entities::{CommentView, PostView};
use crate::blog::application::domain::reaction::ReactionSummary;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostDetail {
    pub post: PostView,
    pub comments: Vec<CommentView>,
    pub reactions: ReactionSummary,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GetPostError {
    #[error("Post not found")]
    NotFound,

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

#[async_trait]
pub trait GetPostUseCase: Send + Sync {
    /// Published posts only. `viewer` fills in `reactions.viewer`.
    async fn execute(
        &self,
        publish_date: NaiveDate,
        slug: &str,
        viewer: Option<Uuid>,
    ) -> Result<PostDetail, GetPostError>;
}
